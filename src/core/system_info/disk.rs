use std::collections::HashMap;
use std::path::Path;

use sysinfo::Disks;

use crate::core::system_info::types::{unknown, Disk, UNKNOWN_NUMBER};
use crate::platform::{
    default_source, read_number, read_trimmed, row_i64, row_string, row_u64,
    HardwareDataSource, ManagementRow,
};

pub const BLOCK_CLASS_DIR: &str = "/sys/block";
pub const DISK_DRIVE_QUERY: &str = "SELECT * FROM Win32_DiskDrive";
pub const LOGICAL_DISK_QUERY: &str = "SELECT DeviceID, FreeSpace FROM Win32_LogicalDisk";
pub const LOGICAL_DISK_TO_PARTITION_QUERY: &str =
    "SELECT Antecedent, Dependent FROM Win32_LogicalDiskToPartition";
pub const DRIVE_TO_PARTITION_QUERY: &str =
    "SELECT Antecedent, Dependent FROM Win32_DiskDriveToDiskPartition";

/// Block devices that are not physical disks.
const VIRTUAL_DEVICE_PREFIXES: &[&str] = &["loop", "ram", "zram", "dm-", "sr", "fd"];

/// `size` is always counted in 512-byte sectors, whatever the device's
/// logical block size.
const SECTOR_SIZE: i64 = 512;

/// A mounted filesystem and the space still available on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Kernel device name without `/dev/`, e.g. `nvme0n1p2`
    pub device: String,
    pub available_bytes: u64,
}

/// Get all physical disks of this machine, with free space summed over
/// the mounted volumes on each of them.
pub fn get_all_disks() -> Vec<Disk> {
    collect_with_volumes(default_source().as_ref(), &mounted_volumes())
}

/// Disks as reported by `source`. Without mounted volumes, free space is
/// only known where the management queries link drives to logical disks.
pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Disk> {
    collect_with_volumes(source, &[])
}

pub fn collect_with_volumes(source: &dyn HardwareDataSource, volumes: &[Volume]) -> Vec<Disk> {
    let devices: Vec<String> = source
        .list_directory(Path::new(BLOCK_CLASS_DIR))
        .into_iter()
        .filter(|name| !is_virtual_device(name))
        .collect();

    if !devices.is_empty() {
        return devices
            .iter()
            .enumerate()
            .map(|(index, name)| disk_from_sysfs(source, index as i64, name, volumes))
            .collect();
    }

    source
        .run_management_query(DISK_DRIVE_QUERY)
        .map(|rows| from_disk_drive_rows(&rows, &physical_free_space(source)))
        .unwrap_or_default()
}

/// Volumes mounted on this machine according to `sysinfo`.
pub fn mounted_volumes() -> Vec<Volume> {
    let disks = Disks::new_with_refreshed_list();

    disks
        .list()
        .iter()
        .map(|disk| {
            let name = disk.name().to_string_lossy().to_string();
            Volume {
                device: name.trim_start_matches("/dev/").to_string(),
                available_bytes: disk.available_space(),
            }
        })
        .collect()
}

/// Sum of the available space of every volume living on `device`
/// (`sda` owns `sda1`, `nvme0n1` owns `nvme0n1p2`).
pub fn free_bytes_on(device: &str, volumes: &[Volume]) -> Option<u64> {
    let mut matching = volumes
        .iter()
        .filter(|volume| is_volume_of(&volume.device, device))
        .peekable();
    matching.peek()?;
    Some(matching.map(|volume| volume.available_bytes).sum())
}

/// A filesystem on the whole device, or a partition named after it: a
/// number suffix, preceded by `p` when the device name itself ends in a
/// digit (`nvme0n1p2`, `mmcblk0p1`).
fn is_volume_of(volume: &str, device: &str) -> bool {
    let Some(suffix) = volume.strip_prefix(device) else {
        return false;
    };
    if suffix.is_empty() {
        return true;
    }

    let number = if device.ends_with(|c: char| c.is_ascii_digit()) {
        match suffix.strip_prefix('p') {
            Some(number) => number,
            None => return false,
        }
    } else {
        suffix
    };
    !number.is_empty() && number.chars().all(|c| c.is_ascii_digit())
}

fn is_virtual_device(name: &str) -> bool {
    VIRTUAL_DEVICE_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

fn disk_from_sysfs(
    source: &dyn HardwareDataSource,
    id: i64,
    name: &str,
    volumes: &[Volume],
) -> Disk {
    let dir = Path::new(BLOCK_CLASS_DIR).join(name);
    let device_dir = dir.join("device");

    Disk {
        id,
        vendor: read_trimmed(source, device_dir.join("vendor")).unwrap_or_else(unknown),
        model: read_trimmed(source, device_dir.join("model")).unwrap_or_else(unknown),
        serial_number: read_trimmed(source, device_dir.join("serial"))
            .or_else(|| read_trimmed(source, dir.join("serial")))
            .unwrap_or_else(unknown),
        size_bytes: read_number(source, dir.join("size"))
            .and_then(|sectors| sectors.checked_mul(SECTOR_SIZE))
            .unwrap_or(UNKNOWN_NUMBER),
        free_bytes: free_bytes_on(name, volumes)
            .and_then(|bytes| i64::try_from(bytes).ok())
            .unwrap_or(UNKNOWN_NUMBER),
    }
}

fn from_disk_drive_rows(rows: &[ManagementRow], free_space: &HashMap<String, u64>) -> Vec<Disk> {
    rows.iter()
        .enumerate()
        .map(|(position, row)| Disk {
            id: row_i64(row, "Index").unwrap_or(position as i64),
            vendor: row_string(row, "Manufacturer").unwrap_or_else(unknown),
            model: row_string(row, "Model").unwrap_or_else(unknown),
            serial_number: row_string(row, "SerialNumber").unwrap_or_else(unknown),
            size_bytes: row_i64(row, "Size").unwrap_or(UNKNOWN_NUMBER),
            free_bytes: row_string(row, "DeviceID")
                .and_then(|id| free_space.get(&collapse_backslashes(&id)).copied())
                .and_then(|bytes| i64::try_from(bytes).ok())
                .unwrap_or(UNKNOWN_NUMBER),
        })
        .collect()
}

/// Free space per physical drive, keyed by the drive's `DeviceID` with
/// backslash runs collapsed. Logical disks map to partitions, partitions
/// map to drives, and the free space of every logical disk on a drive is
/// summed.
fn physical_free_space(source: &dyn HardwareDataSource) -> HashMap<String, u64> {
    let mut totals = HashMap::new();

    let Some(logical_disks) = source.run_management_query(LOGICAL_DISK_QUERY) else {
        return totals;
    };
    let free_by_letter: HashMap<String, u64> = logical_disks
        .iter()
        .filter_map(|row| Some((row_string(row, "DeviceID")?, row_u64(row, "FreeSpace")?)))
        .collect();

    // partition -> logical disk letters
    let mut letters_by_partition: HashMap<String, Vec<String>> = HashMap::new();
    for link in source
        .run_management_query(LOGICAL_DISK_TO_PARTITION_QUERY)
        .unwrap_or_default()
    {
        let partition = row_string(&link, "Antecedent").and_then(|path| quoted_value(&path));
        let letter = row_string(&link, "Dependent").and_then(|path| quoted_value(&path));
        if let (Some(partition), Some(letter)) = (partition, letter) {
            letters_by_partition.entry(partition).or_default().push(letter);
        }
    }

    for link in source
        .run_management_query(DRIVE_TO_PARTITION_QUERY)
        .unwrap_or_default()
    {
        let drive = row_string(&link, "Antecedent").and_then(|path| quoted_value(&path));
        let partition = row_string(&link, "Dependent").and_then(|path| quoted_value(&path));
        let (Some(drive), Some(partition)) = (drive, partition) else {
            continue;
        };

        let free: u64 = letters_by_partition
            .get(&partition)
            .into_iter()
            .flatten()
            .filter_map(|letter| free_by_letter.get(letter))
            .sum();
        *totals.entry(collapse_backslashes(&drive)).or_insert(0) += free;
    }

    totals
}

/// The key inside a WMI object path: everything between the first and the
/// last double quote.
fn quoted_value(path: &str) -> Option<String> {
    let start = path.find('"')?;
    let end = path.rfind('"')?;
    (end > start + 1).then(|| path[start + 1..end].to_string())
}

/// Object paths escape backslashes, plain `DeviceID` values don't.
fn collapse_backslashes(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' && collapsed.ends_with('\\') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}
