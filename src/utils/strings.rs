//! Small text helpers shared by every procfs/sysfs extractor.

use crate::error::{HwInfoError, Result};

/// Split `text` into blocks separated by a blank line, dropping blocks that
/// contain nothing but whitespace.
pub fn split_blocks(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .collect()
}

/// Parse a `key : value` line. Lines without a `:` yield `None`.
///
/// Only the first `:` separates key from value, so values such as MAC
/// addresses survive intact.
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    Some((key.trim(), value.trim()))
}

/// Parse a `KEY=value` line as found in `uevent` and `os-release` files,
/// removing one level of surrounding quotes from the value.
pub fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let value = value.trim();
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);
    Some((key.trim(), value))
}

/// Look up `key` in a blob of `KEY=value` lines.
pub fn assignment_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines()
        .filter_map(split_assignment)
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

/// Trim a value read from a pseudo-file and treat empty content as absent.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim().trim_matches(char::from(0)).trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse the first whitespace-separated token of `value` as an integer.
///
/// `"8192 KB"` parses to `8192`.
pub fn parse_leading_int(field: &'static str, value: &str) -> Result<i64> {
    value
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<i64>().ok())
        .ok_or_else(|| HwInfoError::parse(field, value))
}

/// Parse a trimmed decimal integer.
pub fn parse_int(field: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| HwInfoError::parse(field, value))
}

/// Normalize a hex code to lowercase `0x`-prefixed form: `"41"`, `"0x41"`
/// and `"0X41"` all become `"0x41"`.
pub fn normalize_hex(value: &str) -> String {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    format!("0x{}", digits.to_ascii_lowercase())
}
