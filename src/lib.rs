// hwinfo Library - Public API

// Re-export error types
pub mod error;
pub use error::{HwInfoError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use core::system_info::{
    collect_system_info, collect_system_info_from, get_all_batteries, get_all_cpus,
    get_all_disks, get_all_gpus, get_all_mainboards, get_all_memory, get_all_monitors,
    get_all_networks, get_all_os, Battery, Cpu, CpuUtilizationSampler, Disk, Gpu, MainBoard,
    Memory, MemoryModule, Monitor, Network, Os, SystemInfo, UNKNOWN, UNKNOWN_NUMBER,
};
pub use platform::{default_source, HardwareDataSource};

// Initialize logging (Info by default, RUST_LOG takes precedence)
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
