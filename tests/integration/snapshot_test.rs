use super::support::{edid_block, FakeTree};
use hwinfo::{collect_system_info_from, SystemInfo, UNKNOWN};

fn laptop_tree() -> FakeTree {
    let tree = FakeTree::new();
    tree.file(
        "/proc/cpuinfo",
        "processor\t: 0\nvendor_id\t: AuthenticAMD\nmodel name\t: AMD Ryzen 7 PRO 6850U\nphysical id\t: 0\nsiblings\t: 16\ncpu cores\t: 8\n",
    )
    .file("/proc/meminfo", "MemTotal: 32000000 kB\nMemFree: 8000000 kB\nMemAvailable: 16000000 kB\n")
    .file("/etc/os-release", "NAME=Fedora Linux\nVERSION_ID=40\n")
    .file("/proc/sys/kernel/osrelease", "6.10.6-200.fc40.x86_64\n")
    .file("/sys/class/dmi/id/board_vendor", "LENOVO\n")
    .file("/sys/class/dmi/id/board_name", "21CM\n")
    .file("/sys/class/drm/card0/device/vendor", "0x1002\n")
    .file("/sys/class/drm/card0-eDP-1/status", "connected\n")
    .file("/sys/class/drm/card0-eDP-1/modes", "1920x1200\n")
    .file(
        "/sys/class/drm/card0-eDP-1/edid",
        edid_block("LEN", 0x40A9, 0, (1920, 1200), (160, 35), 15400),
    )
    .file("/sys/block/nvme0n1/size", "1000215216\n")
    .file("/sys/class/net/wlp1s0/type", "1\n")
    .file("/sys/class/net/wlp1s0/wireless/stub", "")
    .file("/sys/class/power_supply/BAT0/capacity", "87\n")
    .file("/sys/class/power_supply/BAT0/status", "Full\n");
    tree
}

#[test]
fn test_full_snapshot_from_tree() {
    let tree = laptop_tree();
    let info = collect_system_info_from(&tree.source());

    assert_eq!(info.cpus.len(), 1);
    assert_eq!(info.cpus[0].num_physical_cores, 8);
    assert_eq!(info.memory[0].available_bytes, 16_000_000 * 1024);
    assert_eq!(info.os[0].name, "Fedora Linux");
    assert_eq!(info.os[0].version, "40");
    assert_eq!(info.os[0].kernel, "6.10.6-200.fc40.x86_64");
    assert_eq!(info.mainboards[0].vendor, "LENOVO");
    assert_eq!(info.gpus.len(), 1);
    assert_eq!(info.gpus[0].vendor, "AMD");
    assert_eq!(info.disks.len(), 1);
    assert_eq!(info.networks[0].interface_type, "WiFi");
    assert_eq!(info.batteries[0].capacity_percent, 87.0);
    assert_eq!(info.batteries[0].charging, Some(false));

    assert_eq!(info.monitors.len(), 1);
    assert_eq!(info.monitors[0].vendor, "LEN");
    assert_eq!(info.monitors[0].resolution, "1920x1200");
    // 154 MHz over 2080x1235 total pixels
    assert_eq!(info.monitors[0].refresh_rate, "60");
    // Zero serial in the EDID block
    assert_eq!(info.monitors[0].serial_number, UNKNOWN);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let tree = laptop_tree();
    let info = collect_system_info_from(&tree.source());

    let json = serde_json::to_string_pretty(&info).unwrap();
    let parsed: SystemInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, info);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["disks"][0]["free_bytes"], -1);
    assert_eq!(value["mainboards"][0]["serial_number"], "<unknown>");
}

#[test]
fn test_empty_tree_gives_empty_snapshot() {
    let tree = FakeTree::new();
    let info = collect_system_info_from(&tree.source());
    assert_eq!(info, SystemInfo::default());
}
