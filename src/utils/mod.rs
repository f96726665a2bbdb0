// Shared helpers

pub mod strings;
