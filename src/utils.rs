//! Utility functions for common operations.

use chrono::{Local, NaiveDateTime};

/// Sortable storage format for entry timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp as YYYY-MM-DD HH:MM:SS
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current local wall-clock time
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// "On"/"Off" label for a toggle
pub fn on_off(enabled: bool) -> &'static str {
    if enabled { "On" } else { "Off" }
}
