use super::support::{edid_block, FakeTree};
use hwinfo::core::system_info::{battery, disk, gpu, mainboard, memory, monitor, network, os};
use hwinfo::{UNKNOWN, UNKNOWN_NUMBER};

#[test]
fn test_monitor_from_connector_with_edid() {
    let tree = FakeTree::new();
    tree.dir("/sys/class/drm/card0")
        .file("/sys/class/drm/card0-DP-1/status", "connected\n")
        .file("/sys/class/drm/card0-DP-1/modes", "1920x1080\n1280x720\n")
        .file(
            "/sys/class/drm/card0-DP-1/edid",
            edid_block("DEL", 0xA0C4, 0x3232_4C4B, (1920, 1080), (280, 45), 14850),
        )
        .file("/sys/class/drm/card0-HDMI-A-1/status", "disconnected\n")
        .file("/sys/class/drm/card0-HDMI-A-1/modes", "");

    let monitors = monitor::collect_from(&tree.source());

    assert_eq!(monitors.len(), 1);
    assert_eq!(monitors[0].vendor, "DEL");
    assert_eq!(monitors[0].model, "41156");
    assert_eq!(monitors[0].serial_number, "842157131");
    assert_eq!(monitors[0].resolution, "1920x1080");
    assert_eq!(monitors[0].refresh_rate, "60");
}

#[test]
fn test_monitor_without_edid_uses_mode() {
    let tree = FakeTree::new();
    tree.file("/sys/class/drm/card1-eDP-1/status", "connected\n")
        .file("/sys/class/drm/card1-eDP-1/modes", "2560x1600\n")
        .file("/sys/class/drm/card1-eDP-1/edid", "");

    let monitors = monitor::collect_from(&tree.source());

    assert_eq!(monitors.len(), 1);
    assert_eq!(monitors[0].resolution, "2560x1600");
    assert_eq!(monitors[0].refresh_rate, UNKNOWN);
    assert_eq!(monitors[0].vendor, UNKNOWN);
}

#[test]
fn test_connected_without_modes_is_skipped() {
    let tree = FakeTree::new();
    tree.file("/sys/class/drm/card0-DP-2/status", "connected\n")
        .file("/sys/class/drm/card0-DP-2/modes", "");

    assert!(monitor::collect_from(&tree.source()).is_empty());
}

#[test]
fn test_gpu_from_drm_card() {
    let tree = FakeTree::new();
    tree.file("/sys/class/drm/card0/device/vendor", "0x1002\n")
        .file("/sys/class/drm/card0/device/device", "0x73bf\n")
        .file("/sys/class/drm/card0/device/uevent", "DRIVER=amdgpu\nPCI_CLASS=30000\n")
        .file("/sys/class/drm/card0/device/product_name", "Radeon RX 6800\n")
        .file("/sys/class/drm/card0/device/mem_info_vram_total", "17163091968\n")
        .file("/sys/class/drm/card0-DP-1/status", "disconnected\n");

    let gpus = gpu::collect_from(&tree.source());

    assert_eq!(gpus.len(), 1);
    assert_eq!(gpus[0].id, 0);
    assert_eq!(gpus[0].vendor, "AMD");
    assert_eq!(gpus[0].vendor_id, "0x1002");
    assert_eq!(gpus[0].device_id, "0x73bf");
    assert_eq!(gpus[0].name, "Radeon RX 6800");
    assert_eq!(gpus[0].driver_version, "amdgpu");
    assert_eq!(gpus[0].memory_bytes, 17_163_091_968);
}

#[test]
fn test_gpu_driver_module_version() {
    let tree = FakeTree::new();
    tree.file("/sys/class/drm/card1/device/vendor", "0x10de\n")
        .file("/sys/class/drm/card1/device/uevent", "DRIVER=nvidia\n")
        .file("/sys/module/nvidia/version", "550.54.14\n");

    let gpus = gpu::collect_from(&tree.source());

    assert_eq!(gpus.len(), 1);
    assert_eq!(gpus[0].id, 1);
    assert_eq!(gpus[0].vendor, "NVIDIA");
    assert_eq!(gpus[0].driver_version, "550.54.14");
    assert_eq!(gpus[0].name, UNKNOWN);
    assert_eq!(gpus[0].memory_bytes, UNKNOWN_NUMBER);
}

#[test]
fn test_network_interfaces_from_sysfs() {
    let tree = FakeTree::new();
    tree.file("/sys/class/net/eth0/ifindex", "2\n")
        .file("/sys/class/net/eth0/address", "52:54:00:12:34:56\n")
        .file("/sys/class/net/eth0/type", "1\n")
        .file("/sys/class/net/lo/ifindex", "1\n")
        .file("/sys/class/net/lo/address", "00:00:00:00:00:00\n")
        .file("/sys/class/net/lo/type", "772\n")
        .file("/sys/class/net/wlan0/ifindex", "3\n")
        .file("/sys/class/net/wlan0/type", "1\n")
        .file("/sys/class/net/wlan0/wireless/stub", "")
        .file("/sys/class/net/br0/type", "1\n")
        .file("/sys/class/net/br0/bridge/stp_state", "0\n");

    let networks = network::collect_from(&tree.source());
    let by_name = |name: &str| {
        networks
            .iter()
            .find(|network| network.description == name)
            .unwrap()
    };

    assert_eq!(networks.len(), 4);
    assert_eq!(by_name("eth0").interface_type, "Ethernet");
    assert_eq!(by_name("eth0").index, "2");
    assert_eq!(by_name("eth0").mac, "52:54:00:12:34:56");
    assert_eq!(by_name("lo").interface_type, "Loopback");
    assert_eq!(by_name("wlan0").interface_type, "WiFi");
    assert_eq!(by_name("br0").interface_type, "Bridge");
    assert_eq!(by_name("br0").index, UNKNOWN);

    // Addresses are only read from the live system
    assert_eq!(by_name("eth0").ip4, UNKNOWN);
    assert_eq!(by_name("eth0").ip6, UNKNOWN);
}

#[test]
fn test_disks_skip_virtual_devices() {
    let tree = FakeTree::new();
    tree.file("/sys/block/nvme0n1/size", "1000215216\n")
        .file("/sys/block/nvme0n1/device/model", "Samsung SSD 980 PRO 1TB\n")
        .file("/sys/block/nvme0n1/device/serial", "S5GXNX0T123456\n")
        .file("/sys/block/sda/size", "3907029168\n")
        .file("/sys/block/sda/device/vendor", "ATA     \n")
        .file("/sys/block/sda/device/model", "WDC WD20EZRZ\n")
        .file("/sys/block/loop0/size", "8\n")
        .file("/sys/block/zram0/size", "16777216\n");

    let disks = disk::collect_from(&tree.source());

    assert_eq!(disks.len(), 2);
    assert_eq!(disks[0].model, "Samsung SSD 980 PRO 1TB");
    assert_eq!(disks[0].serial_number, "S5GXNX0T123456");
    assert_eq!(disks[0].size_bytes, 1_000_215_216 * 512);
    assert_eq!(disks[0].vendor, UNKNOWN);
    assert_eq!(disks[1].vendor, "ATA");
    assert_eq!(disks[1].free_bytes, UNKNOWN_NUMBER);
}

#[test]
fn test_disk_free_space_from_volumes() {
    let tree = FakeTree::new();
    tree.file("/sys/block/sda/size", "2048\n");

    let volumes = vec![
        disk::Volume {
            device: "sda1".to_string(),
            available_bytes: 4096,
        },
        disk::Volume {
            device: "sda2".to_string(),
            available_bytes: 1024,
        },
        disk::Volume {
            device: "sdb1".to_string(),
            available_bytes: 99,
        },
        disk::Volume {
            device: "sdaa1".to_string(),
            available_bytes: 77,
        },
    ];

    let disks = disk::collect_with_volumes(&tree.source(), &volumes);
    assert_eq!(disks[0].free_bytes, 5120);
}

#[test]
fn test_mainboard_from_dmi() {
    let tree = FakeTree::new();
    tree.file("/sys/class/dmi/id/board_vendor", "ASUSTeK COMPUTER INC.\n")
        .file("/sys/class/dmi/id/board_name", "ROG STRIX B550-F GAMING\n")
        .file("/sys/class/dmi/id/board_version", "Default string\n");

    let boards = mainboard::collect_from(&tree.source());

    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].vendor, "ASUSTeK COMPUTER INC.");
    assert_eq!(boards[0].name, "ROG STRIX B550-F GAMING");
    assert_eq!(boards[0].version, UNKNOWN);
    assert_eq!(boards[0].serial_number, UNKNOWN);
}

#[test]
fn test_battery_from_power_supply() {
    let tree = FakeTree::new();
    tree.file("/sys/class/power_supply/AC/online", "1\n")
        .file("/sys/class/power_supply/BAT0/manufacturer", "SMP\n")
        .file("/sys/class/power_supply/BAT0/model_name", "5B10W13930\n")
        .file("/sys/class/power_supply/BAT0/technology", "Li-poly\n")
        .file("/sys/class/power_supply/BAT0/energy_full", "50000000\n")
        .file("/sys/class/power_supply/BAT0/energy_full_design", "57000000\n")
        .file("/sys/class/power_supply/BAT0/energy_now", "25000000\n")
        .file("/sys/class/power_supply/BAT0/capacity", "50\n")
        .file("/sys/class/power_supply/BAT0/status", "Charging\n");

    let batteries = battery::collect_from(&tree.source());

    assert_eq!(batteries.len(), 1);
    let bat = &batteries[0];
    assert_eq!(bat.vendor, "SMP");
    assert_eq!(bat.technology, "Li-poly");
    assert_eq!(bat.energy_full_mwh, 50_000);
    assert_eq!(bat.energy_design_mwh, 57_000);
    assert_eq!(bat.energy_now_mwh, 25_000);
    assert_eq!(bat.capacity_percent, 50.0);
    assert_eq!(bat.charging, Some(true));
    assert_eq!(bat.serial_number, UNKNOWN);
}

#[test]
fn test_battery_charge_counters() {
    let tree = FakeTree::new();
    tree.file("/sys/class/power_supply/BAT1/charge_full", "4000000\n")
        .file("/sys/class/power_supply/BAT1/charge_now", "1000000\n")
        .file("/sys/class/power_supply/BAT1/voltage_min_design", "11400000\n")
        .file("/sys/class/power_supply/BAT1/status", "Discharging\n");

    let batteries = battery::collect_from(&tree.source());

    assert_eq!(batteries.len(), 1);
    // 4 Ah at 11.4 V
    assert_eq!(batteries[0].energy_full_mwh, 45_600);
    assert_eq!(batteries[0].energy_now_mwh, 11_400);
    assert_eq!(batteries[0].capacity_percent, 25.0);
    assert_eq!(batteries[0].charging, Some(false));
    assert_eq!(batteries[0].energy_design_mwh, UNKNOWN_NUMBER);
}

#[test]
fn test_memory_from_meminfo() {
    let tree = FakeTree::new();
    tree.file(
        "/proc/meminfo",
        "MemTotal:       16318412 kB\nMemFree:         1204396 kB\nMemAvailable:    9456712 kB\nBuffers:          412332 kB\n",
    );

    let memory = memory::collect_from(&tree.source());

    assert_eq!(memory.len(), 1);
    assert_eq!(memory[0].total_bytes, 16_318_412 * 1024);
    assert_eq!(memory[0].free_bytes, 1_204_396 * 1024);
    assert_eq!(memory[0].available_bytes, 9_456_712 * 1024);
    assert!(memory[0].modules.is_empty());
}

#[test]
fn test_os_from_release_files() {
    let tree = FakeTree::new();
    tree.file(
        "/etc/os-release",
        "NAME=\"Ubuntu\"\nVERSION=\"24.04.1 LTS (Noble Numbat)\"\nVERSION_ID=\"24.04\"\nID=ubuntu\n",
    )
    .file("/proc/sys/kernel/ostype", "Linux\n")
    .file("/proc/sys/kernel/osrelease", "6.8.0-45-generic\n");

    let os = os::collect_from(&tree.source());

    assert_eq!(os.len(), 1);
    assert_eq!(os[0].name, "Ubuntu");
    assert_eq!(os[0].version, "24.04");
    assert_eq!(os[0].kernel, "Linux 6.8.0-45-generic");
    assert_eq!(os[0].is_64bit, cfg!(target_pointer_width = "64"));
}
