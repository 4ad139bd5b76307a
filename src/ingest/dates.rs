//! Relative date normalization for `since` / `until` blocks.

use chrono::{Days, NaiveDate};

use crate::core::catalog::types;

/// Output format expected by the date operators
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve `today` / `yesterday` (case-insensitive) against a calendar day
pub fn resolve_relative(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    match value.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    }
}

/// Normalized value for a block, or `None` when it should stay as given.
///
/// Only date-range types are touched.
pub fn normalize(block_type: &str, value: &str, today: NaiveDate) -> Option<String> {
    if block_type != types::SINCE && block_type != types::UNTIL {
        return None;
    }

    resolve_relative(value, today).map(|date| date.format(DATE_FORMAT).to_string())
}
