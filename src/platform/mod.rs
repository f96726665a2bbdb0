//! Platform data sources.
//!
//! Every extractor in [`crate::core::system_info`] reads the machine through
//! the [`HardwareDataSource`] trait. A source only fetches raw material
//! (pseudo-file contents, WMI rows, device handles); all parsing lives in the
//! extractors, so the same parsing code runs against the live system, a fake
//! sysfs tree on disk or an in-memory fixture.

pub mod displays;
pub mod fixture;
#[cfg(target_os = "macos")]
pub mod macos;
pub mod sysfs;
#[cfg(windows)]
pub mod windows;

use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::strings::non_empty;

pub use fixture::FixtureDataSource;
#[cfg(target_os = "macos")]
pub use macos::CoreGraphicsDataSource;
pub use sysfs::SysfsDataSource;
#[cfg(windows)]
pub use windows::WmiDataSource;

/// One row of a management query, keyed by property name.
pub type ManagementRow = serde_json::Map<String, serde_json::Value>;

/// Kinds of devices a source can enumerate natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    DisplayConnector,
    NetworkInterface,
}

/// A device reported by [`HardwareDataSource::enumerate_devices`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeviceHandle {
    Display(DisplayConnector),
    NetworkInterface(NetworkInterface),
}

/// A display mode as reported by the platform's own mode enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
    pub refresh_hz: Option<u32>,
}

/// A display output (DRM connector, desktop monitor, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DisplayConnector {
    /// Platform name, e.g. `card0-HDMI-A-1`.
    pub name: String,
    pub connected: bool,
    /// Modes in platform order; the first one is the active/preferred mode.
    pub modes: Vec<DisplayMode>,
    /// Where the raw EDID block can be read, if the platform exposes it.
    pub edid_path: Option<PathBuf>,
    // Identity reported by the platform itself, used when EDID is absent.
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
}

/// A network interface together with the addresses bound to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub name: String,
    pub addresses: Vec<IpAddr>,
}

/// Raw access to the hardware facts of one machine.
///
/// None of the methods fail on absence: a missing file, an unknown query or
/// a platform without the concept simply yields `None` or an empty list.
pub trait HardwareDataSource: Send + Sync {
    /// Read a text pseudo-file such as `/proc/cpuinfo`.
    fn read_text(&self, path: &Path) -> Option<String>;

    /// Read a binary blob such as a connector's EDID.
    fn read_binary(&self, path: &Path) -> Option<Vec<u8>>;

    /// Run a management (WMI-style) query and return its rows.
    fn run_management_query(&self, query: &str) -> Option<Vec<ManagementRow>>;

    /// Enumerate devices of `kind` through the platform's native API.
    fn enumerate_devices(&self, kind: DeviceKind) -> Vec<DeviceHandle>;

    /// List the entry names of a directory, sorted.
    fn list_directory(&self, path: &Path) -> Vec<String>;

    /// Resolve a symbolic link without following it further.
    fn read_link(&self, path: &Path) -> Option<PathBuf>;
}

/// Get the data source for the platform this crate was built for.
///
/// - Windows: WMI queries, GDI display enumeration, plain file access
/// - macOS: CoreGraphics displays, `sysinfo` network interfaces
/// - everything else: procfs/sysfs rooted at `/`
pub fn default_source() -> Box<dyn HardwareDataSource> {
    #[cfg(windows)]
    {
        Box::new(WmiDataSource::new())
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(CoreGraphicsDataSource::new())
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        Box::new(SysfsDataSource::new())
    }
}

/// Read a pseudo-file and return its trimmed content, `None` when missing or
/// empty.
pub fn read_trimmed(source: &dyn HardwareDataSource, path: impl AsRef<Path>) -> Option<String> {
    source
        .read_text(path.as_ref())
        .and_then(|content| non_empty(&content))
}

/// Read a pseudo-file holding a single integer.
pub fn read_number(source: &dyn HardwareDataSource, path: impl AsRef<Path>) -> Option<i64> {
    let path = path.as_ref();
    let content = read_trimmed(source, path)?;
    match content.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::debug!("Ignoring non-numeric content in {}: {:?}", path.display(), content);
            None
        }
    }
}

/// Extract the display connectors from a device enumeration.
pub fn display_connectors(handles: Vec<DeviceHandle>) -> Vec<DisplayConnector> {
    handles
        .into_iter()
        .filter_map(|handle| match handle {
            DeviceHandle::Display(connector) => Some(connector),
            _ => None,
        })
        .collect()
}

/// Extract the network interfaces from a device enumeration.
pub fn network_interfaces(handles: Vec<DeviceHandle>) -> Vec<NetworkInterface> {
    handles
        .into_iter()
        .filter_map(|handle| match handle {
            DeviceHandle::NetworkInterface(interface) => Some(interface),
            _ => None,
        })
        .collect()
}

/// String property of a management row. Numbers are rendered in decimal;
/// blank strings and nulls count as missing.
pub fn row_string(row: &ManagementRow, key: &str) -> Option<String> {
    match row.get(key)? {
        serde_json::Value::String(s) => non_empty(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer property of a management row.
///
/// 64-bit WMI properties (`Capacity`, `Size`, ...) arrive as strings, so
/// numeric strings are accepted too.
pub fn row_i64(row: &ManagementRow, key: &str) -> Option<i64> {
    match row.get(key)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|v| i64::try_from(v).ok())),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub fn row_u64(row: &ManagementRow, key: &str) -> Option<u64> {
    row_i64(row, key).and_then(|v| u64::try_from(v).ok())
}

// Plain filesystem access shared by the on-disk sources.

pub(crate) fn fs_read_text(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            log::trace!("Cannot read {}: {}", path.display(), e);
            None
        }
    }
}

pub(crate) fn fs_read_binary(path: &Path) -> Option<Vec<u8>> {
    fs::read(path).ok()
}

pub(crate) fn fs_list_directory(path: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

pub(crate) fn fs_read_link(path: &Path) -> Option<PathBuf> {
    fs::read_link(path).ok()
}
