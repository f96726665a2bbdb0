// UI and formatting module

pub mod formatters;
pub mod system_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_count, format_mhz, format_ratio, format_size};
pub use system_formatters::{format_system_info, format_utilization, DisplayFilter};
