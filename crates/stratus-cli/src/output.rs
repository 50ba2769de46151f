//! Formatted output helpers for CLI commands.
//!
//! Provides aligned key/value rows, limit and flag wording, and parsing of
//! human-readable memory sizes.

/// Width of the label column in key/value rows.
const LABEL_WIDTH: usize = 18;

/// Formats an aligned `label: value` row.
#[must_use]
pub fn row(label: &str, value: &str) -> String {
    format!("{:<LABEL_WIDTH$}{value}", format!("{label}:"))
}

/// Formats a megabyte count the way the API reports memory (e.g. "256M").
#[must_use]
pub fn format_megabytes(megabytes: u64) -> String {
    if megabytes >= 1024 && megabytes % 1024 == 0 {
        format!("{}G", megabytes / 1024)
    } else {
        format!("{megabytes}M")
    }
}

/// Formats a count limit where `-1` means no limit.
#[must_use]
pub fn format_limit(limit: i64) -> String {
    if limit < 0 {
        "unlimited".to_string()
    } else {
        limit.to_string()
    }
}

/// Wording for a permission flag.
#[must_use]
pub const fn allowed(flag: bool) -> &'static str {
    if flag { "allowed" } else { "disallowed" }
}

/// Parses a memory size into megabytes.
///
/// Accepts a plain number of megabytes or a number with an `M`, `MB`, `G`
/// or `GB` suffix (case-insensitive). Returns `None` for zero, overflow, or
/// anything else.
#[must_use]
pub fn parse_megabytes(s: &str) -> Option<u64> {
    let s = s.trim().to_ascii_uppercase();
    let (num_str, multiplier) = if let Some(n) = s.strip_suffix("GB") {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('G') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix("MB") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1)
    } else {
        (s.as_str(), 1)
    };
    num_str
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| n.checked_mul(multiplier))
}
