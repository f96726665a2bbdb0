use std::path::Path;

use sysinfo::System;

use crate::core::system_info::types::{unknown, Os};
use crate::platform::{default_source, read_trimmed, row_string, HardwareDataSource};
use crate::utils::strings::assignment_value;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";
pub const OSTYPE_PATH: &str = "/proc/sys/kernel/ostype";
pub const OSRELEASE_PATH: &str = "/proc/sys/kernel/osrelease";
pub const OPERATING_SYSTEM_QUERY: &str = "SELECT * FROM Win32_OperatingSystem";

/// Get the running operating system, completed with `sysinfo` where the
/// platform source leaves fields unknown.
pub fn get_all_os() -> Vec<Os> {
    let mut os = collect_from(default_source().as_ref());
    let fallback = get_fallback();

    match os.first_mut() {
        Some(record) => {
            let unknown = unknown();
            if record.name == unknown {
                record.name = fallback.name;
            }
            if record.version == unknown {
                record.version = fallback.version;
            }
            if record.kernel == unknown {
                record.kernel = fallback.kernel;
            }
        }
        None if fallback != Os::default() => os.push(fallback),
        None => {}
    }

    os
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Os> {
    let os_release = read_trimmed(source, OS_RELEASE_PATH);
    let kernel = kernel_from_proc(source);

    if os_release.is_some() || kernel.is_some() {
        let field = |key: &str| {
            os_release
                .as_deref()
                .and_then(|text| assignment_value(text, key))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        return vec![Os {
            name: field("NAME").unwrap_or_else(unknown),
            version: field("VERSION_ID")
                .or_else(|| field("VERSION"))
                .unwrap_or_else(unknown),
            kernel: kernel.unwrap_or_else(unknown),
            is_64bit: cfg!(target_pointer_width = "64"),
        }];
    }

    source
        .run_management_query(OPERATING_SYSTEM_QUERY)
        .unwrap_or_default()
        .iter()
        .take(1)
        .map(|row| {
            let version = row_string(row, "Version");
            Os {
                name: row_string(row, "Caption").unwrap_or_else(unknown),
                kernel: match (&version, row_string(row, "BuildNumber")) {
                    (Some(version), Some(build)) if !version.ends_with(&build) => {
                        format!("{} (build {})", version, build)
                    }
                    (Some(version), _) => version.clone(),
                    (None, Some(build)) => format!("build {}", build),
                    (None, None) => unknown(),
                },
                version: version.unwrap_or_else(unknown),
                is_64bit: row_string(row, "OSArchitecture")
                    .map(|arch| arch.contains("64"))
                    .unwrap_or(cfg!(target_pointer_width = "64")),
            }
        })
        .collect()
}

/// OS facts as seen by `sysinfo`.
pub fn get_fallback() -> Os {
    Os {
        name: System::name().unwrap_or_else(unknown),
        version: System::os_version().unwrap_or_else(unknown),
        kernel: System::kernel_version().unwrap_or_else(unknown),
        is_64bit: cfg!(target_pointer_width = "64"),
    }
}

/// `Linux 6.8.0-45-generic`
fn kernel_from_proc(source: &dyn HardwareDataSource) -> Option<String> {
    let release = read_trimmed(source, Path::new(OSRELEASE_PATH))?;
    Some(match read_trimmed(source, Path::new(OSTYPE_PATH)) {
        Some(ostype) => format!("{} {}", ostype, release),
        None => release,
    })
}
