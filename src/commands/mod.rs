// Command handlers module
pub mod completions;
pub mod info;
pub mod usage;
