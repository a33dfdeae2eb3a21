//! Functional tests for the static JSON export.
//!
//! Guarantees exercised here:
//! - One `week-<N>.json` per week, in a directory created on demand.
//! - Each file carries `{week, weekLabel, dateRange, start, end, pages,
//!   generatedAt}` with ISO-8601 timestamps.
//! - A search failure stops the export with an error and no partial file.

use chrono::{DateTime, Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;
use wt_calendar::WeekWindow;
use wt_cli::export::{export_weeks, week_file_name};
use wt_test_utils::{InMemoryWorkspace, PageBuilder};
use wt_workspace::RecordFetcher;

fn read(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Every requested week lands in its own complete file.
#[tokio::test]
async fn export_writes_one_file_per_week() {
    let now = Utc::now();
    let monday = WeekWindow::at(&now, 0).start_utc();
    let workspace = InMemoryWorkspace::new()
        .with_page(PageBuilder::new("now", monday + Duration::hours(5)).titled("Fresh"))
        .with_page(
            PageBuilder::new("then", monday - Duration::days(6))
                .titled("Older")
                .in_database("db"),
        )
        .with_database("db", "Journal");
    let fetcher = RecordFetcher::new(workspace);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("docs").join("data");

    let mut progress = Vec::new();
    let written = export_weeks(&fetcher, &now, 3, &target, &mut progress).await.unwrap();

    assert_eq!(
        written,
        (0..3).map(|w| target.join(week_file_name(w))).collect::<Vec<_>>()
    );

    let current = read(&written[0]);
    assert_eq!(current["week"], 0);
    assert_eq!(current["weekLabel"], "This Week");
    assert_eq!(current["pages"][0]["title"], "Fresh");
    assert!(current["generatedAt"].as_str().unwrap().parse::<DateTime<Utc>>().is_ok());
    let start: DateTime<Utc> = current["start"].as_str().unwrap().parse().unwrap();
    assert_eq!(start, monday);

    let previous = read(&written[1]);
    assert_eq!(previous["weekLabel"], "Last Week");
    assert_eq!(previous["pages"][0]["parentInfo"]["title"], "Journal");

    let oldest = read(&written[2]);
    assert_eq!(oldest["pages"], Value::Array(Vec::new()));

    let progress = String::from_utf8(progress).unwrap();
    assert!(progress.contains("✅ This Week: 1 pages"));
    assert!(progress.contains("Data generation complete!"));
}

/// Exported files are pretty-printed.
#[tokio::test]
async fn export_files_are_indented() {
    let fetcher = RecordFetcher::new(InMemoryWorkspace::new());
    let dir = tempfile::tempdir().unwrap();

    let written = export_weeks(&fetcher, &Utc::now(), 1, dir.path(), &mut std::io::sink())
        .await
        .unwrap();

    let text = std::fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("{\n  \"week\": 0,"));
}

/// A failing search aborts the export before anything is written.
#[tokio::test]
async fn search_failure_aborts_export() {
    let fetcher = RecordFetcher::new(InMemoryWorkspace::new().failing_search());
    let dir = tempfile::tempdir().unwrap();

    let err = export_weeks(&fetcher, &Utc::now(), 10, dir.path(), &mut std::io::sink())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    assert!(!dir.path().join("week-0.json").exists());
}
