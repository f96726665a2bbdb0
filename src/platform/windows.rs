//! WMI data source (Windows).

use std::collections::HashMap;
use std::mem;
use std::path::{Path, PathBuf};
use std::ptr;

use serde_json::Value;
use windows_sys::Win32::Graphics::Gdi::{
    EnumDisplayDevicesW, EnumDisplaySettingsW, DEVMODEW, DISPLAY_DEVICEW, DISPLAY_DEVICE_ACTIVE,
    ENUM_CURRENT_SETTINGS,
};
use wmi::{Variant, WMIConnection};

use super::displays::{connectors_from, ActiveDisplay};
use super::{
    fs_list_directory, fs_read_binary, fs_read_link, fs_read_text, DeviceHandle, DeviceKind,
    DisplayMode, HardwareDataSource, ManagementRow,
};
use crate::error::{HwInfoError, Result};

const DESKTOP_MONITOR_QUERY: &str = "SELECT DeviceID, MonitorManufacturer, Name, PNPDeviceID, \
     ScreenWidth, ScreenHeight FROM Win32_DesktopMonitor";

/// Runs WMI queries against `root\cimv2`.
///
/// A connection is opened per query and dropped before returning, so no COM
/// state outlives a single extractor call.
#[derive(Debug, Default, Clone, Copy)]
pub struct WmiDataSource;

impl WmiDataSource {
    pub fn new() -> Self {
        Self
    }

    fn query(&self, query: &str) -> Result<Vec<ManagementRow>> {
        let wmi_con = WMIConnection::new()
            .map_err(|e| HwInfoError::wmi(format!("Failed to connect to WMI: {}", e)))?;

        let rows: Vec<HashMap<String, Variant>> = wmi_con
            .raw_query(query)
            .map_err(|e| HwInfoError::wmi(format!("WMI query failed: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|(key, value)| (key, variant_to_json(value)))
                    .collect()
            })
            .collect())
    }

    fn display_connectors(&self) -> Vec<DeviceHandle> {
        let monitors = self.run_management_query(DESKTOP_MONITOR_QUERY).unwrap_or_default();
        connectors_from(active_displays(), &monitors)
    }
}

impl HardwareDataSource for WmiDataSource {
    fn read_text(&self, path: &Path) -> Option<String> {
        fs_read_text(path)
    }

    fn read_binary(&self, path: &Path) -> Option<Vec<u8>> {
        fs_read_binary(path)
    }

    fn run_management_query(&self, query: &str) -> Option<Vec<ManagementRow>> {
        match self.query(query) {
            Ok(rows) => Some(rows),
            Err(e) => {
                log::warn!("{} ({})", e, query);
                None
            }
        }
    }

    fn enumerate_devices(&self, kind: DeviceKind) -> Vec<DeviceHandle> {
        match kind {
            DeviceKind::DisplayConnector => self.display_connectors(),
            // Adapters are read from Win32_NetworkAdapterConfiguration instead.
            DeviceKind::NetworkInterface => Vec::new(),
        }
    }

    fn list_directory(&self, path: &Path) -> Vec<String> {
        fs_list_directory(path)
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        fs_read_link(path)
    }
}

/// Displays attached to the desktop, each with its current mode.
fn active_displays() -> Vec<ActiveDisplay> {
    let mut displays = Vec::new();

    for index in 0.. {
        let mut adapter = empty_display_device();
        // Zero once the index runs past the last adapter
        if unsafe { EnumDisplayDevicesW(ptr::null(), index, &mut adapter, 0) } == 0 {
            break;
        }
        if adapter.StateFlags & DISPLAY_DEVICE_ACTIVE == 0 {
            continue;
        }

        let mut monitor = empty_display_device();
        let has_monitor =
            unsafe { EnumDisplayDevicesW(adapter.DeviceName.as_ptr(), 0, &mut monitor, 0) } != 0;

        let mut mode: DEVMODEW = unsafe { mem::zeroed() };
        mode.dmSize = mem::size_of::<DEVMODEW>() as u16;
        let has_mode = unsafe {
            EnumDisplaySettingsW(adapter.DeviceName.as_ptr(), ENUM_CURRENT_SETTINGS, &mut mode)
        } != 0;

        let name = wide_to_string(&adapter.DeviceName)
            .unwrap_or_else(|| format!("DISPLAY{}", index + 1));
        if !has_mode {
            log::debug!("No current mode for {}", name);
        }

        displays.push(ActiveDisplay {
            name,
            monitor: has_monitor.then(|| wide_to_string(&monitor.DeviceString)).flatten(),
            device_id: has_monitor.then(|| wide_to_string(&monitor.DeviceID)).flatten(),
            vendor: None,
            serial_number: None,
            mode: (has_mode && mode.dmPelsWidth > 0 && mode.dmPelsHeight > 0).then(|| DisplayMode {
                width: mode.dmPelsWidth,
                height: mode.dmPelsHeight,
                // 0 and 1 both mean "hardware default"
                refresh_hz: (mode.dmDisplayFrequency > 1).then_some(mode.dmDisplayFrequency),
            }),
        });
    }

    displays
}

fn empty_display_device() -> DISPLAY_DEVICEW {
    let mut device: DISPLAY_DEVICEW = unsafe { mem::zeroed() };
    device.cb = mem::size_of::<DISPLAY_DEVICEW>() as u32;
    device
}

/// NUL-terminated UTF-16 buffer to a trimmed string.
fn wide_to_string(buffer: &[u16]) -> Option<String> {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    let text = String::from_utf16_lossy(&buffer[..len]);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn variant_to_json(value: Variant) -> Value {
    match value {
        Variant::String(s) => Value::String(s),
        Variant::Bool(b) => Value::Bool(b),
        Variant::I1(v) => Value::from(v),
        Variant::I2(v) => Value::from(v),
        Variant::I4(v) => Value::from(v),
        Variant::I8(v) => Value::from(v),
        Variant::UI1(v) => Value::from(v),
        Variant::UI2(v) => Value::from(v),
        Variant::UI4(v) => Value::from(v),
        Variant::UI8(v) => Value::from(v),
        Variant::R4(v) => Value::from(v as f64),
        Variant::R8(v) => Value::from(v),
        Variant::Array(items) => Value::Array(items.into_iter().map(variant_to_json).collect()),
        _ => Value::Null,
    }
}
