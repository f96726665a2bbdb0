use crate::core::system_info::edid::{self, EdidInfo};
use crate::core::system_info::types::{unknown, Monitor};
use crate::platform::{
    default_source, display_connectors, DeviceKind, DisplayConnector, HardwareDataSource,
};

/// Get all connected monitors of this machine.
pub fn get_all_monitors() -> Vec<Monitor> {
    collect_from(default_source().as_ref())
}

/// One record per display connector that is connected and reports at
/// least one mode. Displays enumerated by a native display API have no EDID
/// path and are kept even when their mode could not be read.
pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Monitor> {
    display_connectors(source.enumerate_devices(DeviceKind::DisplayConnector))
        .into_iter()
        .filter(|connector| {
            connector.connected && (!connector.modes.is_empty() || connector.edid_path.is_none())
        })
        .map(|connector| {
            let edid = connector
                .edid_path
                .as_deref()
                .and_then(|path| source.read_binary(path))
                .map(|blob| edid::decode(&blob))
                .unwrap_or_default();
            monitor_from(&connector, edid)
        })
        .collect()
}

fn monitor_from(connector: &DisplayConnector, edid: EdidInfo) -> Monitor {
    let (resolution, refresh_rate) = match (edid.resolution_string(), edid.refresh_hz) {
        (Some(resolution), Some(refresh_hz)) => (resolution, refresh_hz.to_string()),
        // Take the active mode as a whole rather than mixing it with half
        // of the EDID timing.
        _ => match connector.modes.first() {
            Some(mode) => (
                format!("{}x{}", mode.width, mode.height),
                mode.refresh_hz
                    .map(|hz| hz.to_string())
                    .unwrap_or_else(unknown),
            ),
            None => (unknown(), unknown()),
        },
    };

    Monitor {
        vendor: edid
            .vendor
            .or_else(|| connector.vendor.clone())
            .unwrap_or_else(unknown),
        model: edid
            .model
            .or_else(|| connector.model.clone())
            .unwrap_or_else(unknown),
        resolution,
        refresh_rate,
        serial_number: edid
            .serial_number
            .or_else(|| connector.serial_number.clone())
            .unwrap_or_else(unknown),
    }
}

/// Name of a DRM connector type as used in `/sys/class/drm` entry names.
pub fn connector_type_name(connector_type: u32) -> &'static str {
    match connector_type {
        1 => "VGA",
        2 => "DVI-I",
        3 => "DVI-D",
        4 => "DVI-A",
        5 => "Composite",
        6 => "S-Video",
        7 => "LVDS",
        8 => "Component",
        9 => "9PinDIN",
        10 => "DP",
        11 => "HDMI-A",
        12 => "HDMI-B",
        13 => "TV",
        14 => "eDP",
        15 => "Virtual",
        16 => "DSI",
        17 => "DPI",
        18 => "Writeback",
        19 => "SPI",
        20 => "USB",
        _ => "<unknown>",
    }
}
