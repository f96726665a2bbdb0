use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::system_info::types::{unknown, Gpu, UNKNOWN_NUMBER};
use crate::platform::{
    default_source, read_number, read_trimmed, row_i64, row_string, HardwareDataSource,
    ManagementRow,
};
use crate::utils::strings::{assignment_value, normalize_hex};

pub const DRM_CLASS_DIR: &str = "/sys/class/drm";
pub const VIDEO_CONTROLLER_QUERY: &str = "SELECT * FROM Win32_VideoController";

/// `card0`, `card1`, ... (connectors carry a `-<type>-<n>` suffix)
static CARD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^card(\d+)$").expect("card pattern is valid"));

/// `PCI\VEN_10DE&DEV_2484&SUBSYS_...`
static PNP_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)VEN_([0-9A-F]{4})&DEV_([0-9A-F]{4})").expect("PNP id pattern is valid")
});

/// Get all graphics adapters of this machine.
pub fn get_all_gpus() -> Vec<Gpu> {
    collect_from(default_source().as_ref())
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Gpu> {
    let cards: Vec<(i64, String)> = source
        .list_directory(Path::new(DRM_CLASS_DIR))
        .into_iter()
        .filter_map(|name| {
            let index = CARD_RE.captures(&name)?.get(1)?.as_str().parse().ok()?;
            Some((index, name))
        })
        .collect();

    if !cards.is_empty() {
        return cards
            .iter()
            .map(|(index, name)| gpu_from_sysfs(source, *index, name))
            .collect();
    }

    source
        .run_management_query(VIDEO_CONTROLLER_QUERY)
        .map(|rows| from_video_controller_rows(&rows))
        .unwrap_or_default()
}

/// Vendor name for a PCI vendor id such as `0x10de`.
pub fn pci_vendor_name(vendor_id: &str) -> Option<&'static str> {
    let name = match normalize_hex(vendor_id).as_str() {
        "0x10de" => "NVIDIA",
        "0x1002" | "0x1022" => "AMD",
        "0x8086" => "Intel",
        "0x13b5" => "ARM",
        "0x5143" => "Qualcomm",
        "0x1a03" => "ASPEED",
        "0x102b" => "Matrox",
        "0x15ad" => "VMware",
        "0x80ee" => "VirtualBox",
        "0x1af4" => "Red Hat (virtio)",
        "0x1234" => "QEMU",
        "0x1414" => "Microsoft",
        _ => return None,
    };
    Some(name)
}

fn gpu_from_sysfs(source: &dyn HardwareDataSource, index: i64, card: &str) -> Gpu {
    let device_dir = Path::new(DRM_CLASS_DIR).join(card).join("device");

    let vendor_id = read_trimmed(source, device_dir.join("vendor")).map(|id| normalize_hex(&id));
    let device_id = read_trimmed(source, device_dir.join("device")).map(|id| normalize_hex(&id));
    let driver = read_trimmed(source, device_dir.join("uevent"))
        .and_then(|uevent| assignment_value(&uevent, "DRIVER").map(str::to_string));

    // Modules that export a version (nvidia) report it, others only their name.
    let driver_version = driver.map(|driver| {
        read_trimmed(source, format!("/sys/module/{}/version", driver)).unwrap_or(driver)
    });

    Gpu {
        id: index,
        vendor: vendor_id
            .as_deref()
            .and_then(pci_vendor_name)
            .map(str::to_string)
            .unwrap_or_else(unknown),
        name: read_trimmed(source, device_dir.join("product_name")).unwrap_or_else(unknown),
        driver_version: driver_version.unwrap_or_else(unknown),
        vendor_id: vendor_id.unwrap_or_else(unknown),
        device_id: device_id.unwrap_or_else(unknown),
        memory_bytes: read_number(source, device_dir.join("mem_info_vram_total"))
            .unwrap_or(UNKNOWN_NUMBER),
    }
}

fn from_video_controller_rows(rows: &[ManagementRow]) -> Vec<Gpu> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let pnp_ids = row_string(row, "PNPDeviceID").and_then(|pnp| {
                let caps = PNP_ID_RE.captures(&pnp)?;
                Some((normalize_hex(&caps[1]), normalize_hex(&caps[2])))
            });

            let vendor = row_string(row, "AdapterCompatibility").or_else(|| {
                pnp_ids
                    .as_ref()
                    .and_then(|(vendor_id, _)| pci_vendor_name(vendor_id))
                    .map(str::to_string)
            });

            Gpu {
                id: index as i64,
                vendor: vendor.unwrap_or_else(unknown),
                name: row_string(row, "Name").unwrap_or_else(unknown),
                driver_version: row_string(row, "DriverVersion").unwrap_or_else(unknown),
                vendor_id: pnp_ids
                    .as_ref()
                    .map(|(vendor_id, _)| vendor_id.clone())
                    .unwrap_or_else(unknown),
                device_id: pnp_ids
                    .map(|(_, device_id)| device_id)
                    .unwrap_or_else(unknown),
                // AdapterRAM is a 32-bit field and saturates at 4 GiB
                memory_bytes: row_i64(row, "AdapterRAM")
                    .filter(|bytes| *bytes > 0)
                    .unwrap_or(UNKNOWN_NUMBER),
            }
        })
        .collect()
}
