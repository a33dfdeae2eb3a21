//! Human labels for week offsets and dates

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// Label for a week `weeks_ago` weeks before the current one
#[must_use]
pub fn week_label(weeks_ago: u32) -> String {
    match weeks_ago {
        0 => "This Week".to_string(),
        1 => "Last Week".to_string(),
        n => format!("{n} Weeks Ago"),
    }
}

/// `M/D/YYYY` date of `instant` in its own timezone, e.g. `10/13/2026`
#[must_use]
pub fn short_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    instant.format("%-m/%-d/%Y").to_string()
}

/// [`short_date`] of a stored timestamp, in the local timezone
#[must_use]
pub fn local_short_date(instant: &DateTime<Utc>) -> String {
    short_date(&instant.with_timezone(&Local))
}
