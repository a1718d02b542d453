//! Timestamp display formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `MM/DD/YYYY, HH:MM AM/PM`, always en-US style.
const DISPLAY_FORMAT: &str = "%m/%d/%Y, %I:%M %p";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Render a server timestamp for display.
///
/// Offset-qualified timestamps are shown in UTC, naive ones as written and
/// a bare date as midnight. Anything unparseable comes back unchanged.
pub fn format_for_display(input: &str) -> String {
    match parse_timestamp(input.trim()) {
        Some(parsed) => parsed.format(DISPLAY_FORMAT).to_string(),
        None => input.to_string(),
    }
}

/// Whether table text looks like a raw ISO-8601 date-time.
pub fn looks_like_timestamp(text: &str) -> bool {
    text.contains('T')
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
