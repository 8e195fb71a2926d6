//! Time formatting shared by widgets and tables.

use chrono::{DateTime, Utc};

/// Compact age of `then` relative to `now`: `42s`, `5m`, `3h`, `9d`.
///
/// Future timestamps read as `0s`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let s = (now - then).num_seconds().max(0);
    if s < 60 {
        return format!("{}s", s);
    }
    let m = s / 60;
    if m < 60 {
        return format!("{}m", m);
    }
    let h = m / 60;
    if h < 24 {
        return format!("{}h", h);
    }
    format!("{}d", h / 24)
}

/// Absolute date, e.g. `2026-10-19 14:05`.
pub fn absolute_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}
