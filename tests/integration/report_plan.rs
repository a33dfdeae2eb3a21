//! Functional tests for the single-week text report.
//!
//! Guarantees exercised here:
//! - The report lists exactly the pages created inside the requested week,
//!   numbered in the workspace's own order.
//! - Parent containers and link properties appear when known; a parent that
//!   cannot be resolved drops the line instead of failing the report.
//! - A missing credential is reported as its own error kind.

use chrono::{Duration, Utc};
use wt_calendar::WeekWindow;
use wt_cli::report::{write_header, write_pages, NO_PAGES_MESSAGE};
use wt_cli::{workspace_fetcher, TrackerConfig};
use wt_test_utils::{InMemoryWorkspace, PageBuilder};
use wt_workspace::RecordFetcher;

async fn report_text(workspace: InMemoryWorkspace, weeks_ago: u32) -> String {
    let now = Utc::now();
    let window = WeekWindow::at(&now, weeks_ago);
    let fetcher = RecordFetcher::new(workspace);

    let mut out = Vec::new();
    write_header(&mut out, &window.label(), &window.date_range()).unwrap();
    let report = fetcher.collect_week(&now, weeks_ago).await.unwrap();
    write_pages(&mut out, &report.pages).unwrap();
    String::from_utf8(out).unwrap()
}

/// The report shows this week's pages with their metadata, and nothing from
/// neighbouring weeks.
#[tokio::test]
async fn report_lists_only_this_weeks_pages() {
    let monday = WeekWindow::at(&Utc::now(), 0).start_utc();
    let workspace = InMemoryWorkspace::new()
        .with_page(
            PageBuilder::new("a", monday + Duration::hours(30))
                .titled("Design review")
                .in_database("meetings")
                .link("https://docs.example.com/review"),
        )
        .with_page(
            PageBuilder::new("b", monday + Duration::hours(10))
                .titled("Inbox zero")
                .under_page("locked"),
        )
        .with_page(PageBuilder::new("c", monday - Duration::days(3)).titled("Old news"))
        .with_database("meetings", "Meetings")
        .failing_lookup("locked");

    let text = report_text(workspace, 0).await;

    assert!(text.contains("📅 This Week"));
    assert!(text.contains("Found 2 new page(s):"));
    assert!(text.contains("1. Design review"));
    assert!(text.contains("📊 Parent: Meetings"));
    assert!(text.contains("Link: https://docs.example.com/review"));
    assert!(text.contains("2. Inbox zero"));
    assert!(!text.contains("Old news"));
    assert_eq!(text.matches("Parent:").count(), 1);
}

/// A week without new pages says so instead of printing an empty list.
#[tokio::test]
async fn empty_week_prints_notice() {
    let monday = WeekWindow::at(&Utc::now(), 0).start_utc();
    let workspace =
        InMemoryWorkspace::new().with_page(PageBuilder::new("a", monday + Duration::hours(1)));

    let text = report_text(workspace, 3).await;

    assert!(text.contains("📅 3 Weeks Ago"));
    assert!(text.contains(NO_PAGES_MESSAGE));
}

/// Without a credential no client is built and the error is recognisable.
#[test]
fn missing_credential_is_distinct() {
    let config = TrackerConfig::new().apply_env(|_| None);

    let err = workspace_fetcher(&config).err().unwrap();

    assert!(err.is_missing_credential());
    assert_eq!(err.to_string(), "NOTION_TOKEN environment variable is required");
}

/// A configured credential is enough to build the workspace client.
#[test]
fn configured_credential_builds_fetcher() {
    let config = TrackerConfig::new().apply_env(|_| None).with_token("secret_test");

    assert_eq!(config.require_token().unwrap(), "secret_test");
    assert!(workspace_fetcher(&config).is_ok());
}
