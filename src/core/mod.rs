// Core business logic module

pub mod system_info;

// Re-export commonly used items
pub use system_info::{collect_system_info, CpuUtilizationSampler, SystemInfo};
