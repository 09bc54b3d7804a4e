//! Relative-age labels for post timestamps.

use chrono::{DateTime, Utc};

/// Short relative age of `at` as seen from `now`: "now", "5s", "3m", "2h", "4d".
///
/// Timestamps in the future are clamped to "now".
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_elapsed((now - at).num_seconds())
}

/// Label for an elapsed duration in whole seconds.
pub fn format_elapsed(seconds: i64) -> String {
    if seconds < 5 {
        return "now".to_string();
    }
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h");
    }
    format!("{}d", hours / 24)
}
