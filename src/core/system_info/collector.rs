use crate::core::system_info::types::SystemInfo;
use crate::core::system_info::{
    battery, cpu, disk, gpu, mainboard, memory, monitor, network, os,
};
use crate::platform::HardwareDataSource;
use log::{debug, warn};

/// Collect every domain of this machine into one snapshot.
///
/// Each domain runs through its own facade, so the crate-level fallbacks
/// (`sysinfo`, `battery`) apply.
pub fn collect_system_info() -> SystemInfo {
    let info = SystemInfo {
        cpus: cpu::get_all_cpus(),
        memory: memory::get_all_memory(),
        gpus: gpu::get_all_gpus(),
        mainboards: mainboard::get_all_mainboards(),
        disks: disk::get_all_disks(),
        networks: network::get_all_networks(),
        monitors: monitor::get_all_monitors(),
        os: os::get_all_os(),
        batteries: battery::get_all_batteries(),
    };
    report_missing(&info);
    info
}

/// Collect every domain from one data source, without crate fallbacks.
pub fn collect_system_info_from(source: &dyn HardwareDataSource) -> SystemInfo {
    let info = SystemInfo {
        cpus: cpu::collect_from(source),
        memory: memory::collect_from(source),
        gpus: gpu::collect_from(source),
        mainboards: mainboard::collect_from(source),
        disks: disk::collect_from(source),
        networks: network::collect_from(source),
        monitors: monitor::collect_from(source),
        os: os::collect_from(source),
        batteries: battery::collect_from(source),
    };
    report_missing(&info);
    info
}

fn report_missing(info: &SystemInfo) {
    if info.cpus.is_empty() {
        warn!("Failed to collect CPU info");
    }
    if info.memory.is_empty() {
        warn!("Failed to collect memory info");
    }
    if info.os.is_empty() {
        warn!("Failed to collect OS info");
    }

    // Absent on plenty of machines
    if info.batteries.is_empty() {
        debug!("No battery found");
    }
    if info.monitors.is_empty() {
        debug!("No connected monitor found");
    }
}
