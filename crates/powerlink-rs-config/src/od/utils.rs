// crates/powerlink-rs-config/src/od/utils.rs
//! Parsing and formatting helpers for the textual ids and values found in
//! device description files.

use crate::error::ConfigError;
use alloc::format;
use alloc::string::{String, ToString};

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Parses a hex string (with or without `0x`) of at most `max_digits` digits.
fn parse_hex_digits(s: &str, max_digits: usize) -> Option<u64> {
    let digits = strip_hex_prefix(s.trim());
    if digits.is_empty() || digits.len() > max_digits {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Parses an index id such as `"1A00"`, `"1a00"` or `"0x1A00"`.
pub fn parse_index_id(s: &str) -> Result<u16, ConfigError> {
    parse_hex_digits(s, 4)
        .map(|v| v as u16)
        .ok_or_else(|| ConfigError::InvalidIndexId(s.to_string()))
}

/// Parses a subindex id such as `"01"` or `"0x1F"`.
pub fn parse_sub_index_id(s: &str) -> Result<u8, ConfigError> {
    parse_hex_digits(s, 2)
        .map(|v| v as u8)
        .ok_or_else(|| ConfigError::InvalidSubIndexId(s.to_string()))
}

/// Formats an index id as four uppercase hex digits.
pub fn format_index(index: u16) -> String {
    format!("{:04X}", index)
}

/// Formats a subindex id as two uppercase hex digits.
pub fn format_sub_index(sub_index: u8) -> String {
    format!("{:02X}", sub_index)
}

/// Parses a numeric attribute value.
///
/// Values with a `0x` prefix are hexadecimal, everything else is decimal
/// with an optional sign. Returns `None` for empty or non-numeric input.
pub fn parse_value(s: &str) -> Option<i128> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.is_empty() {
            return None;
        }
        return u128::from_str_radix(hex, 16).ok().map(|v| v as i128);
    }
    s.parse::<i128>().ok()
}
