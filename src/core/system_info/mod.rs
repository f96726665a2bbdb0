pub mod arm;
pub mod battery;
pub mod collector;
pub mod cpu;
pub mod disk;
pub mod edid;
pub mod gpu;
pub mod mainboard;
pub mod memory;
pub mod monitor;
pub mod network;
pub mod os;
pub mod types;
pub mod utilization;

pub use battery::get_all_batteries;
pub use collector::{collect_system_info, collect_system_info_from};
pub use cpu::get_all_cpus;
pub use disk::get_all_disks;
pub use gpu::get_all_gpus;
pub use mainboard::get_all_mainboards;
pub use memory::get_all_memory;
pub use monitor::get_all_monitors;
pub use network::get_all_networks;
pub use os::get_all_os;
pub use types::*;
pub use utilization::CpuUtilizationSampler;
