use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use crate::core::system_info::types::{unknown, Network};
use crate::platform::{
    default_source, network_interfaces, read_number, read_trimmed, row_i64, row_string,
    DeviceKind, HardwareDataSource, ManagementRow, NetworkInterface,
};

pub const NET_CLASS_DIR: &str = "/sys/class/net";
pub const ADAPTER_CONFIGURATION_QUERY: &str =
    "SELECT InterfaceIndex, IPAddress, Description, MACAddress FROM Win32_NetworkAdapterConfiguration";
pub const ADAPTER_QUERY: &str =
    "SELECT Index, AdapterTypeID, Name, PNPDeviceID, InterfaceIndex FROM Win32_NetworkAdapter";

/// `ARPHRD_ETHER`
const ARPHRD_ETHER: i64 = 1;
/// `ARPHRD_LOOPBACK`
const ARPHRD_LOOPBACK: i64 = 772;

/// Get all network adapters of this machine.
pub fn get_all_networks() -> Vec<Network> {
    collect_from(default_source().as_ref())
}

pub fn collect_from(source: &dyn HardwareDataSource) -> Vec<Network> {
    let interfaces = network_interfaces(source.enumerate_devices(DeviceKind::NetworkInterface));
    if !interfaces.is_empty() {
        return interfaces
            .iter()
            .map(|interface| network_from_sysfs(source, interface))
            .collect();
    }

    match source.run_management_query(ADAPTER_CONFIGURATION_QUERY) {
        Some(rows) => {
            let types = adapter_types(source);
            rows.iter()
                .map(|row| network_from_configuration(row, &types))
                .collect()
        }
        None => Vec::new(),
    }
}

fn network_from_sysfs(source: &dyn HardwareDataSource, interface: &NetworkInterface) -> Network {
    let dir = Path::new(NET_CLASS_DIR).join(&interface.name);

    let ip4 = interface.addresses.iter().find(|addr| addr.is_ipv4());
    // Only the link-local address identifies the adapter itself.
    let ip6 = interface.addresses.iter().find(|addr| is_link_local_v6(addr));

    Network {
        index: read_number(source, dir.join("ifindex"))
            .map(|index| index.to_string())
            .unwrap_or_else(unknown),
        description: interface.name.clone(),
        mac: read_trimmed(source, dir.join("address")).unwrap_or_else(unknown),
        ip4: ip4.map(IpAddr::to_string).unwrap_or_else(unknown),
        ip6: ip6.map(IpAddr::to_string).unwrap_or_else(unknown),
        interface_type: interface_type(source, &interface.name, &dir),
    }
}

fn is_link_local_v6(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) == 0xfe80,
        IpAddr::V4(_) => false,
    }
}

/// Classify an interface from the shape of its sysfs directory.
fn interface_type(source: &dyn HardwareDataSource, name: &str, dir: &Path) -> String {
    let link_mentions_usb = |path: PathBuf| {
        source
            .read_link(&path)
            .map(|target| target.to_string_lossy().contains("usb"))
            .unwrap_or(false)
    };
    let arp_type = read_number(source, dir.join("type"));

    let kind = if exists(source, &dir.join("wireless")) {
        "WiFi"
    } else if arp_type == Some(ARPHRD_LOOPBACK) || name == "lo" {
        "Loopback"
    } else if link_mentions_usb(dir.join("device/driver/module"))
        || link_mentions_usb(dir.join("device"))
    {
        "USB Ethernet"
    } else if exists(source, &dir.join("bridge")) {
        "Bridge"
    } else if exists(source, &dir.join("tun_flags")) {
        "TUN/TAP"
    } else if arp_type == Some(ARPHRD_ETHER) {
        "Ethernet"
    } else {
        return unknown();
    };

    kind.to_string()
}

fn exists(source: &dyn HardwareDataSource, path: &Path) -> bool {
    source.read_text(path).is_some() || !source.list_directory(path).is_empty()
}

/// Adapter type per `InterfaceIndex`, from `Win32_NetworkAdapter`.
fn adapter_types(source: &dyn HardwareDataSource) -> HashMap<i64, String> {
    source
        .run_management_query(ADAPTER_QUERY)
        .unwrap_or_default()
        .iter()
        .filter_map(|row| {
            let interface_index = row_i64(row, "InterfaceIndex").filter(|index| *index > 0)?;
            let kind = adapter_type_name(
                row_i64(row, "AdapterTypeID").unwrap_or(0),
                &row_string(row, "Name").unwrap_or_default(),
                &row_string(row, "PNPDeviceID").unwrap_or_default(),
            );
            Some((interface_index, kind))
        })
        .collect()
}

/// Map a WMI `AdapterTypeID` plus name hints to an interface type.
pub fn adapter_type_name(type_id: i64, name: &str, pnp_device_id: &str) -> String {
    let kind = match type_id {
        0 if name.contains("Hyper-V") => "Hyper-V Virtual Adapter",
        0 if name.contains("Kernel Debug") => "Kernel Debug Adapter",
        0 if name.contains("Switch") => "Virtual Switch Adapter",
        0 => "Ethernet",
        9 => "WiFi",
        _ if name.contains("Loopback") => "Loopback",
        _ if name.contains("TAP-Windows") || name.contains("TUN") => "TUN/TAP",
        _ if name.contains("Bridge") => "Bridge",
        _ if name.contains("Hyper-V") => "Hyper-V Virtual Adapter",
        _ if pnp_device_id.contains("USB") || name.contains("USB") => "USB Ethernet",
        _ => return unknown(),
    };
    kind.to_string()
}

fn network_from_configuration(row: &ManagementRow, types: &HashMap<i64, String>) -> Network {
    let index = row_i64(row, "InterfaceIndex");

    let addresses: Vec<IpAddr> = match row.get("IPAddress") {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str()?.parse().ok())
            .collect(),
        _ => Vec::new(),
    };

    Network {
        index: index.map(|i| i.to_string()).unwrap_or_else(unknown),
        description: row_string(row, "Description").unwrap_or_else(unknown),
        mac: row_string(row, "MACAddress").unwrap_or_else(unknown),
        ip4: addresses
            .iter()
            .find(|addr| addr.is_ipv4())
            .map(IpAddr::to_string)
            .unwrap_or_else(unknown),
        ip6: addresses
            .iter()
            .find(|addr| is_link_local_v6(addr))
            .map(IpAddr::to_string)
            .unwrap_or_else(unknown),
        interface_type: index
            .and_then(|i| types.get(&i).cloned())
            .unwrap_or_else(unknown),
    }
}
