//! Table formatting helpers for CLI output.

use comfy_table::{ContentArrangement, Table};

use a3s_pod_core::ContentHash;

/// Digest characters shown by [`short_hash`].
const SHORT_DIGEST_LEN: usize = 12;

/// Create a styled table with the given headers.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_header(headers);
    table
}

/// Abbreviate a hash to its algorithm tag and leading digest characters.
pub fn short_hash(hash: &ContentHash) -> String {
    let full = hash.to_string();
    let keep = full.len() - hash.digest().len() + SHORT_DIGEST_LEN.min(hash.digest().len());
    full[..keep].to_string()
}

/// Binary size units above bytes.
const SIZE_UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Relative time units, largest first, with their length in seconds.
const AGE_UNITS: [(&str, i64); 5] = [
    ("year", 365 * 86_400),
    ("month", 30 * 86_400),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Format a byte count as a human-readable string.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

/// Age of a record timestamp, in the largest whole unit.
pub fn format_ago(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let secs = chrono::Utc::now().signed_duration_since(*dt).num_seconds();
    AGE_UNITS
        .iter()
        .find(|(_, len)| secs >= *len)
        .map(|(unit, len)| match secs / len {
            1 => format!("1 {unit} ago"),
            n => format!("{n} {unit}s ago"),
        })
        .unwrap_or_else(|| "just now".to_string())
}
