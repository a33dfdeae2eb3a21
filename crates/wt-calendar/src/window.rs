//! Monday-aligned week windows
//!
//! A window covers Monday 00:00:00.000 through Sunday 23:59:59.999 in the
//! timezone of the instant it was derived from. Both bounds are inclusive.

use crate::label::week_label;
use chrono::{
    DateTime, Datelike, Days, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};

/// Largest local-time gap (DST transition) a bound is moved across
const MAX_GAP_STEPS: u32 = 16;
const GAP_STEP_MINUTES: i64 = 15;

/// Inclusive week window, `weeks_ago` weeks before the week containing "now"
#[derive(Debug, Clone)]
pub struct WeekWindow<Tz: TimeZone> {
    weeks_ago: u32,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl WeekWindow<Local> {
    /// Window relative to the current local time
    #[must_use]
    pub fn current(weeks_ago: u32) -> Self {
        Self::at(&Local::now(), weeks_ago)
    }
}

impl<Tz: TimeZone> WeekWindow<Tz> {
    /// Window `weeks_ago` weeks before the week containing `now`
    ///
    /// Sunday belongs to the week that started the previous Monday. Offsets
    /// reaching past the calendar's range pin to its earliest week.
    #[must_use]
    pub fn at(now: &DateTime<Tz>, weeks_ago: u32) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let since_monday = u64::from(today.weekday().num_days_from_monday());

        let monday = today
            .checked_sub_days(Days::new(since_monday + 7 * u64::from(weeks_ago)))
            .unwrap_or_else(earliest_monday);
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);

        Self {
            weeks_ago,
            start: resolve_start(&tz, monday.and_time(NaiveTime::MIN)),
            end: resolve_end(&tz, sunday.and_time(last_millisecond())),
        }
    }

    /// Offset this window was derived with (0 = current week)
    #[inline]
    #[must_use]
    pub fn weeks_ago(&self) -> u32 {
        self.weeks_ago
    }

    /// Monday 00:00:00.000
    #[inline]
    #[must_use]
    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    /// Sunday 23:59:59.999
    #[inline]
    #[must_use]
    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Start bound in UTC
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    /// End bound in UTC
    #[must_use]
    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// Whether `instant` falls inside the window, both ends inclusive
    #[must_use]
    pub fn contains<Other: TimeZone>(&self, instant: &DateTime<Other>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Human label ("This Week", "Last Week", "{n} Weeks Ago")
    #[must_use]
    pub fn label(&self) -> String {
        week_label(self.weeks_ago)
    }

    /// Formatted range, e.g. `Oct 12, 2026 - Oct 18, 2026`
    #[must_use]
    pub fn date_range(&self) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        format!(
            "{} - {}",
            self.start.format("%b %-d, %Y"),
            self.end.format("%b %-d, %Y")
        )
    }
}

// First Monday the calendar can represent; `NaiveDate::MIN` itself is not one.
fn earliest_monday() -> NaiveDate {
    let ahead = (7 - NaiveDate::MIN.weekday().num_days_from_monday()) % 7;
    NaiveDate::MIN
        .checked_add_days(Days::new(u64::from(ahead)))
        .unwrap_or(NaiveDate::MIN)
}

fn last_millisecond() -> NaiveTime {
    NaiveTime::MIN - Duration::milliseconds(1)
}

// Midnight inside a DST gap moves forward to the first valid local instant.
fn resolve_start<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..MAX_GAP_STEPS {
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant;
        }
        candidate += Duration::minutes(GAP_STEP_MINUTES);
    }
    tz.from_utc_datetime(&naive)
}

// End of day inside a DST gap moves backward to the last valid local instant.
fn resolve_end<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    let mut candidate = naive;
    for _ in 0..MAX_GAP_STEPS {
        if let Some(instant) = tz.from_local_datetime(&candidate).latest() {
            return instant;
        }
        candidate -= Duration::minutes(GAP_STEP_MINUTES);
    }
    tz.from_utc_datetime(&naive)
}
