use super::support::FakeTree;
use hwinfo::core::system_info::{cpu, disk, memory, mainboard, monitor, network, os};
use hwinfo::platform::fixture::{row, FixtureDataSource};
use hwinfo::platform::{
    DeviceHandle, DeviceKind, DisplayConnector, DisplayMode, HardwareDataSource,
};
use hwinfo::{collect_system_info_from, UNKNOWN};
use serde_json::json;
use std::path::Path;

/// A source shaped like a Windows machine: no files, only query rows and
/// natively enumerated displays.
fn management_source() -> FixtureDataSource {
    FixtureDataSource::new()
        .with_query(
            cpu::PROCESSOR_QUERY,
            vec![row(json!({
                "DeviceID": "CPU0",
                "Manufacturer": "GenuineIntel",
                "Name": "Intel(R) Core(TM) i7-10700K CPU @ 3.80GHz",
                "NumberOfCores": 8,
                "NumberOfLogicalProcessors": 16,
                "MaxClockSpeed": 3792,
                "CurrentClockSpeed": 3792,
                "L3CacheSize": 16384
            }))],
        )
        .with_query(
            memory::COMPUTER_SYSTEM_QUERY,
            vec![row(json!({ "TotalPhysicalMemory": "34289332224" }))],
        )
        .with_query(
            memory::FREE_MEMORY_QUERY,
            vec![row(json!({ "FreePhysicalMemory": "20971520" }))],
        )
        .with_query(
            memory::PHYSICAL_MEMORY_QUERY,
            vec![
                row(json!({
                    "Manufacturer": "Kingston",
                    "DeviceLocator": "DIMM1",
                    "PartNumber": "KF3200C16D4/16GX",
                    "Capacity": "17179869184",
                    "Speed": 3200
                })),
                row(json!({
                    "BankLabel": "BANK 2",
                    "Capacity": "17179869184"
                })),
            ],
        )
        .with_query(
            mainboard::BASEBOARD_QUERY,
            vec![row(json!({
                "Manufacturer": "Micro-Star International Co., Ltd.",
                "Product": "MPG Z490 GAMING PLUS (MS-7C75)",
                "Version": "1.0",
                "SerialNumber": "To be filled by O.E.M."
            }))],
        )
        .with_query(
            disk::DISK_DRIVE_QUERY,
            vec![row(json!({
                "Index": 0,
                "DeviceID": r"\\.\PHYSICALDRIVE0",
                "Model": "WDC WDS500G2B0A",
                "SerialNumber": "19106A802117",
                "Size": "500105249280"
            }))],
        )
        .with_query(
            disk::LOGICAL_DISK_QUERY,
            vec![row(json!({ "DeviceID": "C:", "FreeSpace": "212345679872" }))],
        )
        .with_query(
            disk::LOGICAL_DISK_TO_PARTITION_QUERY,
            vec![row(json!({
                "Antecedent": r#"\\DESKTOP\root\cimv2:Win32_DiskPartition.DeviceID="Disk #0, Partition #2""#,
                "Dependent": r#"\\DESKTOP\root\cimv2:Win32_LogicalDisk.DeviceID="C:""#
            }))],
        )
        .with_query(
            disk::DRIVE_TO_PARTITION_QUERY,
            vec![row(json!({
                "Antecedent": r#"\\DESKTOP\root\cimv2:Win32_DiskDrive.DeviceID="\\\\.\\PHYSICALDRIVE0""#,
                "Dependent": r#"\\DESKTOP\root\cimv2:Win32_DiskPartition.DeviceID="Disk #0, Partition #2""#
            }))],
        )
        .with_query(
            network::ADAPTER_CONFIGURATION_QUERY,
            vec![row(json!({
                "InterfaceIndex": 12,
                "Description": "Intel(R) Ethernet Connection (11) I219-V",
                "MACAddress": "00:D8:61:AB:CD:EF",
                "IPAddress": ["192.168.0.10", "fe80::a1b2:c3d4:e5f6:1234"]
            }))],
        )
        .with_query(
            network::ADAPTER_QUERY,
            vec![row(json!({
                "Index": 1,
                "AdapterTypeID": 0,
                "Name": "Intel(R) Ethernet Connection (11) I219-V",
                "PNPDeviceID": "PCI\\VEN_8086&DEV_15F3",
                "InterfaceIndex": 12
            }))],
        )
        .with_query(
            os::OPERATING_SYSTEM_QUERY,
            vec![row(json!({
                "Caption": "Microsoft Windows 11 Pro",
                "Version": "10.0.22631",
                "BuildNumber": "22631",
                "OSArchitecture": "64-bit"
            }))],
        )
        .with_device(DeviceHandle::Display(DisplayConnector {
            name: "DesktopMonitor1".to_string(),
            connected: true,
            modes: vec![DisplayMode {
                width: 2560,
                height: 1440,
                refresh_hz: Some(144),
            }],
            edid_path: None,
            vendor: Some("Dell Inc.".to_string()),
            model: Some("DELL S2721DGF".to_string()),
            serial_number: None,
        }))
}

#[test]
fn test_snapshot_from_management_rows() {
    let info = collect_system_info_from(&management_source());

    assert_eq!(info.cpus.len(), 1);
    assert_eq!(info.cpus[0].id, 0);
    assert_eq!(info.cpus[0].num_physical_cores, 8);
    assert_eq!(info.cpus[0].num_logical_cores, 16);
    assert_eq!(info.cpus[0].l3_cache_size_bytes, 16384 * 1024);

    assert_eq!(info.memory.len(), 1);
    assert_eq!(info.memory[0].total_bytes, 34_289_332_224);
    assert_eq!(info.memory[0].free_bytes, 20_971_520 * 1024);
    assert_eq!(info.memory[0].modules.len(), 2);
    assert_eq!(info.memory[0].modules[0].frequency_hz, 3_200_000_000);
    assert_eq!(info.memory[0].modules[1].name, "BANK 2");
    assert_eq!(info.memory[0].modules[1].vendor, UNKNOWN);

    assert_eq!(info.mainboards.len(), 1);
    assert_eq!(info.mainboards[0].version, "1.0");
    assert_eq!(info.mainboards[0].serial_number, UNKNOWN);

    assert_eq!(info.disks.len(), 1);
    assert_eq!(info.disks[0].size_bytes, 500_105_249_280);
    assert_eq!(info.disks[0].free_bytes, 212_345_679_872);

    assert_eq!(info.networks.len(), 1);
    assert_eq!(info.networks[0].index, "12");
    assert_eq!(info.networks[0].ip4, "192.168.0.10");
    assert_eq!(info.networks[0].ip6, "fe80::a1b2:c3d4:e5f6:1234");
    assert_eq!(info.networks[0].interface_type, "Ethernet");

    assert_eq!(info.monitors.len(), 1);
    assert_eq!(info.monitors[0].vendor, "Dell Inc.");
    assert_eq!(info.monitors[0].resolution, "2560x1440");
    assert_eq!(info.monitors[0].refresh_rate, "144");
    assert_eq!(info.monitors[0].serial_number, UNKNOWN);

    assert_eq!(info.os.len(), 1);
    assert_eq!(info.os[0].name, "Microsoft Windows 11 Pro");
    assert!(info.os[0].is_64bit);

    assert!(info.gpus.is_empty());
    assert!(info.batteries.is_empty());
}

#[test]
fn test_disconnected_display_is_ignored() {
    let source = FixtureDataSource::new().with_device(DeviceHandle::Display(DisplayConnector {
        name: "DesktopMonitor2".to_string(),
        connected: false,
        modes: vec![DisplayMode {
            width: 1920,
            height: 1080,
            refresh_hz: Some(60),
        }],
        ..Default::default()
    }));

    assert!(monitor::collect_from(&source).is_empty());
}

#[test]
fn test_sysfs_lists_directories_sorted() {
    let tree = FakeTree::new();
    tree.dir("/sys/class/net/wlan0")
        .dir("/sys/class/net/eth0")
        .dir("/sys/class/net/lo");

    let source = tree.source();
    assert_eq!(
        source.list_directory(Path::new("/sys/class/net")),
        vec!["eth0", "lo", "wlan0"]
    );
    assert!(source.list_directory(Path::new("/sys/class/missing")).is_empty());
    assert!(source.run_management_query(cpu::PROCESSOR_QUERY).is_none());
}

#[cfg(unix)]
#[test]
fn test_sysfs_read_link_and_usb_interface() {
    let tree = FakeTree::new();
    tree.file("/sys/class/net/enx00e04c/type", "1\n")
        .dir("/sys/bus/usb/drivers/r8152");
    std::os::unix::fs::symlink(
        "../../../bus/usb/drivers/r8152",
        tree.root().join("sys/class/net/enx00e04c/device"),
    )
    .unwrap();

    let source = tree.source();
    let target = source
        .read_link(Path::new("/sys/class/net/enx00e04c/device"))
        .unwrap();
    assert!(target.to_string_lossy().contains("usb"));

    let handles = source.enumerate_devices(DeviceKind::NetworkInterface);
    assert_eq!(handles.len(), 1);

    let networks = network::collect_from(&source);
    assert_eq!(networks[0].interface_type, "USB Ethernet");
}
