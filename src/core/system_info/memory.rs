use std::path::Path;

use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use crate::core::system_info::types::{unknown, Memory, MemoryModule, UNKNOWN_NUMBER};
use crate::platform::{default_source, row_i64, row_string, HardwareDataSource, ManagementRow};
use crate::utils::strings::{parse_leading_int, split_key_value};

pub const MEMINFO_PATH: &str = "/proc/meminfo";
pub const PHYSICAL_MEMORY_QUERY: &str = "SELECT * FROM Win32_PhysicalMemory";
pub const COMPUTER_SYSTEM_QUERY: &str = "SELECT TotalPhysicalMemory FROM Win32_ComputerSystem";
pub const FREE_MEMORY_QUERY: &str = "SELECT FreePhysicalMemory FROM Win32_OperatingSystem";

/// Get the installed RAM of this machine.
///
/// Falls back to `sysinfo` totals when the platform source reports nothing.
pub fn get_all_memory() -> Vec<Memory> {
    let memory = collect_from(default_source().as_ref());
    if memory.iter().any(|m| m.total_bytes > 0) {
        return memory;
    }

    let fallback = get_fallback();
    if fallback.total_bytes > 0 {
        vec![fallback]
    } else {
        memory
    }
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Memory> {
    let mut memory = match source.read_text(Path::new(MEMINFO_PATH)) {
        Some(meminfo) => parse_meminfo(&meminfo),
        None => totals_from_queries(source),
    };

    if let Some(rows) = source.run_management_query(PHYSICAL_MEMORY_QUERY) {
        memory.modules = modules_from_rows(&rows);
    }

    if memory == Memory::default() {
        Vec::new()
    } else {
        vec![memory]
    }
}

/// Totals as seen by `sysinfo`.
pub fn get_fallback() -> Memory {
    let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());
    let sys = System::new_with_specifics(refresh);

    let as_known = |bytes: u64| {
        if bytes > 0 {
            i64::try_from(bytes).unwrap_or(UNKNOWN_NUMBER)
        } else {
            UNKNOWN_NUMBER
        }
    };

    Memory {
        total_bytes: as_known(sys.total_memory()),
        free_bytes: as_known(sys.free_memory()),
        available_bytes: as_known(sys.available_memory()),
        modules: Vec::new(),
    }
}

fn parse_meminfo(meminfo: &str) -> Memory {
    let mut memory = Memory::default();

    for (key, value) in meminfo.lines().filter_map(split_key_value) {
        let target = match key {
            "MemTotal" => &mut memory.total_bytes,
            "MemFree" => &mut memory.free_bytes,
            "MemAvailable" => &mut memory.available_bytes,
            _ => continue,
        };

        match parse_leading_int("meminfo", value) {
            Ok(kib) => match kib.checked_mul(1024) {
                Some(bytes) => *target = bytes,
                None => log::debug!("meminfo {} overflows: {} kB", key, kib),
            },
            Err(e) => log::debug!("{}", e),
        }
    }

    memory
}

fn totals_from_queries(source: &dyn HardwareDataSource) -> Memory {
    let first_row = |query: &str| -> Option<ManagementRow> {
        source
            .run_management_query(query)
            .and_then(|rows| rows.into_iter().next())
    };

    let total_bytes = first_row(COMPUTER_SYSTEM_QUERY)
        .and_then(|row| row_i64(&row, "TotalPhysicalMemory"))
        .unwrap_or(UNKNOWN_NUMBER);
    // Reported in KiB
    let free_bytes = first_row(FREE_MEMORY_QUERY)
        .and_then(|row| row_i64(&row, "FreePhysicalMemory"))
        .and_then(|kib| kib.checked_mul(1024))
        .unwrap_or(UNKNOWN_NUMBER);

    Memory {
        total_bytes,
        free_bytes,
        // Windows counts standby pages as free
        available_bytes: free_bytes,
        modules: Vec::new(),
    }
}

fn modules_from_rows(rows: &[ManagementRow]) -> Vec<MemoryModule> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| MemoryModule {
            id: index as i64,
            vendor: row_string(row, "Manufacturer").unwrap_or_else(unknown),
            name: row_string(row, "DeviceLocator")
                .or_else(|| row_string(row, "BankLabel"))
                .unwrap_or_else(unknown),
            model: row_string(row, "PartNumber").unwrap_or_else(unknown),
            serial_number: row_string(row, "SerialNumber").unwrap_or_else(unknown),
            total_bytes: row_i64(row, "Capacity").unwrap_or(UNKNOWN_NUMBER),
            // MHz
            frequency_hz: row_i64(row, "Speed")
                .filter(|mhz| *mhz > 0)
                .and_then(|mhz| mhz.checked_mul(1_000_000))
                .unwrap_or(UNKNOWN_NUMBER),
        })
        .collect()
}
