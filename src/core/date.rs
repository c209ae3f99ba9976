//! Epoch-millisecond to calendar date conversion.

use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last year that still fits in four digits.
pub const MAX_YEAR: i32 = 9999;

/// Zone used to truncate a timestamp to a calendar day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    /// The zone of the running process.
    #[default]
    Local,
    Utc,
}

impl fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneMode::Local => f.write_str("local"),
            TimeZoneMode::Utc => f.write_str("utc"),
        }
    }
}

/// Formats `millis` as `YYYY-MM-DD`. Returns `None` when the day falls after
/// year 9999 in the chosen zone, or outside chrono's range.
pub fn epoch_millis_to_date(millis: i64, zone: TimeZoneMode) -> Option<String> {
    let instant = DateTime::<Utc>::from_timestamp_millis(millis)?;
    let date = match zone {
        TimeZoneMode::Utc => instant.date_naive(),
        TimeZoneMode::Local => instant.with_timezone(&Local).date_naive(),
    };
    if date.year() > MAX_YEAR {
        return None;
    }
    Some(date.format(DATE_FORMAT).to_string())
}
