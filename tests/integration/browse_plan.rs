//! Functional tests for the terminal browser.
//!
//! Guarantees exercised here:
//! - Paged browsing starts on the current week and moves one week per
//!   command, never past the current week.
//! - A failed load shows the error panel and leaves the previous week
//!   selected for the next command.
//! - A week that takes a while to arrive is announced while it loads.
//! - The all-weeks listing keeps week order and reports partial failures.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use wt_cli::browse::browse;
use wt_cli::CliError;
use wt_navigation::PaginationStrategy;
use wt_test_utils::{payload, record, StaticWeekSource};

async fn run(
    source: Arc<StaticWeekSource>,
    strategy: PaginationStrategy,
    input: &str,
) -> (String, Result<(), CliError>) {
    let mut out = Vec::new();
    let result = browse(source, strategy, input.as_bytes(), &mut out).await;
    (String::from_utf8(out).unwrap(), result)
}

fn source() -> StaticWeekSource {
    StaticWeekSource::new()
        .with_week(
            0,
            payload("Oct 12, 2026 - Oct 18, 2026", vec![record("a", "Sprint plan", Utc::now())]),
        )
        .with_week(
            1,
            payload("Oct 5, 2026 - Oct 11, 2026", vec![record("b", "Offsite recap", Utc::now())]),
        )
}

/// Previous and next walk the weeks; next on the current week is refused.
#[tokio::test]
async fn paged_browsing_walks_weeks() {
    let weeks = Arc::new(source());

    let (text, result) = run(Arc::clone(&weeks), PaginationStrategy::Paged, "n\np\nn\nq\n").await;

    assert!(result.is_ok());
    assert_eq!(weeks.calls(), vec![0, 1, 0]);
    assert!(text.contains("▾ This Week (1 page)"));
    assert!(text.contains("Sprint plan"));
    assert!(text.contains("Already showing the current week."));
    assert!(text.contains("▾ Last Week (1 page)"));
    assert!(text.contains("Offsite recap"));
    assert!(text.contains("[p] ← Previous week       Next week →"));
}

/// A slow week shows the loading line before the week itself.
#[tokio::test(start_paused = true)]
async fn slow_week_shows_loading_first() {
    let weeks = Arc::new(source().delayed_week(1, Duration::from_millis(50)));

    let (text, result) = run(Arc::clone(&weeks), PaginationStrategy::Paged, "p\nq\n").await;

    assert!(result.is_ok());
    let loading = text.find("Loading Last Week...").unwrap();
    let loaded = text.find("▾ Last Week (1 page)").unwrap();
    assert!(loading < loaded);
    assert!(!text.contains("Loading This Week..."));
}

/// A failing week shows the error and the next step starts from the week
/// that was on screen before.
#[tokio::test]
async fn failed_week_keeps_previous_selection() {
    let weeks = Arc::new(source().failing_week(2));

    let (text, result) = run(Arc::clone(&weeks), PaginationStrategy::Paged, "p\np\np\n").await;

    assert!(result.is_ok());
    assert_eq!(weeks.calls(), vec![0, 1, 2, 2]);
    assert!(text.contains("Error loading data: HTTP 500: Internal Server Error"));
}

/// Unknown input is reported and does not load anything.
#[tokio::test]
async fn unknown_command_is_ignored() {
    let weeks = Arc::new(source());

    let (text, _) = run(Arc::clone(&weeks), PaginationStrategy::Paged, "jump\n\nquit\n").await;

    assert!(text.contains("Unknown command: jump"));
    assert_eq!(weeks.calls(), vec![0]);
}

/// The listing prints weeks newest first, with failures summarised on top.
#[tokio::test]
async fn all_weeks_listing_orders_and_warns() {
    let weeks = Arc::new(source().failing_week(3));

    let (text, result) = run(weeks, PaginationStrategy::AllWeeks { count: 5 }, "").await;

    assert!(result.is_ok());
    assert!(text.starts_with("Warning: 1 week could not be loaded"));
    let this_week = text.find("▾ This Week").unwrap();
    let last_week = text.find("▸ Last Week").unwrap();
    let four_ago = text.find("▸ 4 Weeks Ago").unwrap();
    assert!(this_week < last_week && last_week < four_ago);
    assert!(!text.contains("3 Weeks Ago"));
}

/// When no week loads at all the listing fails.
#[tokio::test]
async fn all_weeks_listing_total_failure() {
    let weeks = Arc::new(StaticWeekSource::new().failing_week(0).failing_week(1));

    let (text, result) = run(weeks, PaginationStrategy::AllWeeks { count: 2 }, "").await;

    assert!(matches!(result, Err(CliError::NothingLoaded { weeks: 2 })));
    assert!(text.contains("Error loading data:"));
}
