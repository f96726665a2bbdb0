//! CoreGraphics data source (macOS).

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use core_graphics::display::CGDisplay;
use sysinfo::Networks;

use super::displays::{connectors_from, ActiveDisplay};
use super::{
    fs_list_directory, fs_read_binary, fs_read_link, fs_read_text, DeviceHandle, DeviceKind,
    DisplayMode, HardwareDataSource, ManagementRow, NetworkInterface,
};

/// Enumerates displays through CoreGraphics and network interfaces through
/// `sysinfo`. There is no procfs/sysfs, so file reads only succeed for
/// ordinary files.
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreGraphicsDataSource;

impl CoreGraphicsDataSource {
    pub fn new() -> Self {
        Self
    }

    fn display_connectors(&self) -> Vec<DeviceHandle> {
        let ids = match CGDisplay::active_displays() {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!("Failed to list active displays: CGError {}", e);
                return Vec::new();
            }
        };

        let displays = ids
            .into_iter()
            .map(|id| {
                let display = CGDisplay::new(id);
                let number = |value: u32| (value != 0).then(|| value.to_string());

                ActiveDisplay {
                    name: format!("display{}", id),
                    monitor: number(display.model_number()),
                    device_id: None,
                    vendor: None,
                    serial_number: number(display.serial_number()),
                    mode: display.display_mode().and_then(|mode| {
                        let width = u32::try_from(mode.width()).ok().filter(|w| *w > 0)?;
                        let height = u32::try_from(mode.height()).ok().filter(|h| *h > 0)?;
                        let refresh = mode.refresh_rate().round();
                        Some(DisplayMode {
                            width,
                            height,
                            // Built-in panels report 0
                            refresh_hz: (refresh >= 1.0).then(|| refresh as u32),
                        })
                    }),
                }
            })
            .collect();

        connectors_from(displays, &[])
    }

    fn network_interfaces(&self) -> Vec<DeviceHandle> {
        let networks = Networks::new_with_refreshed_list();

        let mut interfaces: Vec<NetworkInterface> = networks
            .list()
            .iter()
            .map(|(name, data)| NetworkInterface {
                name: name.clone(),
                addresses: data.ip_networks().iter().map(|net| net.addr).collect::<Vec<IpAddr>>(),
            })
            .collect();
        interfaces.sort_by(|a, b| a.name.cmp(&b.name));

        interfaces.into_iter().map(DeviceHandle::NetworkInterface).collect()
    }
}

impl HardwareDataSource for CoreGraphicsDataSource {
    fn read_text(&self, path: &Path) -> Option<String> {
        fs_read_text(path)
    }

    fn read_binary(&self, path: &Path) -> Option<Vec<u8>> {
        fs_read_binary(path)
    }

    fn run_management_query(&self, _query: &str) -> Option<Vec<ManagementRow>> {
        None
    }

    fn enumerate_devices(&self, kind: DeviceKind) -> Vec<DeviceHandle> {
        match kind {
            DeviceKind::DisplayConnector => self.display_connectors(),
            DeviceKind::NetworkInterface => self.network_interfaces(),
        }
    }

    fn list_directory(&self, path: &Path) -> Vec<String> {
        fs_list_directory(path)
    }

    fn read_link(&self, path: &Path) -> Option<PathBuf> {
        fs_read_link(path)
    }
}
