//! Property tests for week windows.
//!
//! Every window spans exactly 6 days 23:59:59.999 of wall-clock time, starts
//! on a Monday at midnight, and consecutive windows are contiguous.

use chrono::{DateTime, Datelike, Duration, FixedOffset, TimeZone, Timelike, Utc, Weekday};
use proptest::prelude::*;
use wt_calendar::WeekWindow;

fn instant(secs: i64, offset_minutes: i32) -> DateTime<FixedOffset> {
    let tz = FixedOffset::east_opt(offset_minutes * 60).unwrap();
    tz.from_utc_datetime(&DateTime::from_timestamp(secs, 0).unwrap().naive_utc())
}

fn full_week() -> Duration {
    Duration::days(7) - Duration::milliseconds(1)
}

proptest! {
    #[test]
    fn prop_window_spans_one_week_minus_a_millisecond(
        secs in 0i64..4_102_444_800,
        offset in -720i32..=840,
        weeks_ago in 0u32..520,
    ) {
        let window = WeekWindow::at(&instant(secs, offset), weeks_ago);
        prop_assert_eq!(*window.end() - *window.start(), full_week());
    }

    #[test]
    fn prop_window_starts_monday_midnight(
        secs in 0i64..4_102_444_800,
        offset in -720i32..=840,
        weeks_ago in 0u32..520,
    ) {
        let window = WeekWindow::at(&instant(secs, offset), weeks_ago);
        let start = window.start();

        prop_assert_eq!(start.weekday(), Weekday::Mon);
        prop_assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
        prop_assert_eq!(start.nanosecond(), 0);
    }

    #[test]
    fn prop_consecutive_windows_are_seven_days_apart(
        secs in 0i64..4_102_444_800,
        weeks_ago in 0u32..520,
    ) {
        let now = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
        let newer = WeekWindow::at(&now, weeks_ago);
        let older = WeekWindow::at(&now, weeks_ago + 1);

        prop_assert_eq!(*newer.start(), *older.start() + Duration::days(7));
        prop_assert_eq!(*older.end() + Duration::milliseconds(1), *newer.start());
    }

    #[test]
    fn prop_current_window_contains_now(
        secs in 0i64..4_102_444_800,
        offset in -720i32..=840,
    ) {
        let now = instant(secs, offset);
        prop_assert!(WeekWindow::at(&now, 0).contains(&now));
    }
}
