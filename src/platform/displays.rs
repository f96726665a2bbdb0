//! Displays reported by a native display API (GDI, CoreGraphics).
//!
//! Each active display carries its own current mode, so nothing here pairs
//! monitors with graphics adapters by position.

use super::{row_string, row_u64, DeviceHandle, DisplayConnector, DisplayMode, ManagementRow};

/// One active display as enumerated by the platform.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActiveDisplay {
    /// Device name, e.g. `\\.\DISPLAY1`
    pub name: String,
    /// Monitor description, e.g. `Generic PnP Monitor`
    pub monitor: Option<String>,
    /// Plug and Play id of the attached monitor, e.g.
    /// `MONITOR\DEL40F4\{4d36e96e-e325-11ce-bfc1-08002be10318}\0001`
    pub device_id: Option<String>,
    pub vendor: Option<String>,
    pub serial_number: Option<String>,
    /// Current mode, `None` when the platform refused to report it
    pub mode: Option<DisplayMode>,
}

/// Turn active displays into connectors. Identity left open by the display
/// API is completed from the `Win32_DesktopMonitor` row with the same
/// hardware id. Without any active display, every desktop monitor row is
/// reported with the geometry it carries itself.
pub fn connectors_from(
    displays: Vec<ActiveDisplay>,
    desktop_monitors: &[ManagementRow],
) -> Vec<DeviceHandle> {
    if displays.is_empty() {
        return desktop_monitors
            .iter()
            .enumerate()
            .map(|(index, row)| DeviceHandle::Display(connector_from_row(index, row)))
            .collect();
    }

    displays
        .into_iter()
        .map(|display| {
            let row = display
                .device_id
                .as_deref()
                .and_then(hardware_id)
                .and_then(|id| {
                    desktop_monitors.iter().find(|row| {
                        row_string(row, "PNPDeviceID")
                            .as_deref()
                            .and_then(hardware_id)
                            .map_or(false, |other| other.eq_ignore_ascii_case(id))
                    })
                });
            let from_row = |key: &str| row.and_then(|row| row_string(row, key));

            DeviceHandle::Display(DisplayConnector {
                name: display.name,
                connected: true,
                modes: display.mode.into_iter().collect(),
                edid_path: None,
                vendor: display.vendor.or_else(|| from_row("MonitorManufacturer")),
                model: display.monitor.or_else(|| from_row("Name")),
                serial_number: display
                    .serial_number
                    .or_else(|| from_row("PNPDeviceID"))
                    .or(display.device_id),
            })
        })
        .collect()
}

fn connector_from_row(index: usize, row: &ManagementRow) -> DisplayConnector {
    let width = row_u64(row, "ScreenWidth").filter(|w| *w > 0);
    let height = row_u64(row, "ScreenHeight").filter(|h| *h > 0);
    let mode = match (width, height) {
        (Some(width), Some(height)) => Some(DisplayMode {
            width: u32::try_from(width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
            refresh_hz: None,
        }),
        _ => None,
    };

    DisplayConnector {
        name: row_string(row, "DeviceID").unwrap_or_else(|| format!("DesktopMonitor{}", index + 1)),
        connected: true,
        modes: mode.into_iter().collect(),
        edid_path: None,
        vendor: row_string(row, "MonitorManufacturer"),
        model: row_string(row, "Name"),
        serial_number: row_string(row, "PNPDeviceID"),
    }
}

/// The hardware id segment of a Plug and Play id: `DEL40F4` in both
/// `MONITOR\DEL40F4\{...}\0001` and `DISPLAY\DEL40F4\5&2f5a1b&0&UID4352`.
fn hardware_id(pnp_id: &str) -> Option<&str> {
    pnp_id.split('\\').nth(1).filter(|id| !id.is_empty())
}
