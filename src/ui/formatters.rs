use humansize::{format_size as human_format_size, BINARY};

use crate::core::system_info::types::UNKNOWN;

/// Format a byte count in binary units (KiB, MiB, GiB). Negative counts are
/// unknown.
pub fn format_size(bytes: i64) -> String {
    match u64::try_from(bytes) {
        Ok(bytes) => human_format_size(bytes, BINARY),
        Err(_) => UNKNOWN.to_string(),
    }
}

/// Format a clock speed given in MHz as GHz.
pub fn format_mhz(mhz: i64) -> String {
    if mhz < 0 {
        UNKNOWN.to_string()
    } else {
        format!("{:.2} GHz", mhz as f64 / 1000.0)
    }
}

/// Format a `[0, 1]` ratio as a percentage; `-1` means unavailable.
pub fn format_ratio(ratio: f64) -> String {
    if (0.0..=1.0).contains(&ratio) {
        format!("{:.1}%", ratio * 100.0)
    } else {
        "n/a".to_string()
    }
}

/// Format a plain count, rendering the unknown sentinel.
pub fn format_count(value: i64) -> String {
    if value < 0 {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}
