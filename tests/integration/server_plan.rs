//! Functional tests for the knowledge-base endpoint.
//!
//! Guarantees exercised here:
//! - `GET /knowledge-base` answers with `{dateRange, pages, totalCount}` for
//!   the requested week, defaulting to the current one.
//! - A malformed `weeksAgo` is a client error and never reaches the
//!   workspace.
//! - Workspace failures surface as 502 with the upstream message.
//! - Unknown paths and methods are JSON errors as well.

use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use wt_calendar::WeekWindow;
use wt_cli::server::routes;
use wt_test_utils::{InMemoryWorkspace, PageBuilder};
use wt_workspace::{KnowledgeBaseResponse, RecordFetcher};

fn seeded_workspace() -> InMemoryWorkspace {
    let monday = WeekWindow::current(0).start_utc();
    InMemoryWorkspace::new()
        .with_page(PageBuilder::new("fresh", monday + Duration::hours(2)).titled("Standup notes"))
        .with_page(
            PageBuilder::new("older", monday - Duration::days(2))
                .titled("Retro")
                .in_database("db"),
        )
        .with_database("db", "Team")
}

fn body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

/// Without `weeksAgo` the current week is served.
#[tokio::test]
async fn serves_current_week_by_default() {
    let filter = routes(Arc::new(RecordFetcher::new(seeded_workspace())));

    let response = warp::test::request().path("/knowledge-base").reply(&filter).await;

    assert_eq!(response.status(), 200);
    let payload: KnowledgeBaseResponse = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(payload.total_count, 1);
    assert_eq!(payload.pages[0].title, "Standup notes");
    assert_eq!(payload.date_range, WeekWindow::current(0).date_range());
}

/// `weeksAgo` selects an earlier week, parents included.
#[tokio::test]
async fn serves_requested_week() {
    let filter = routes(Arc::new(RecordFetcher::new(seeded_workspace())));

    let response = warp::test::request()
        .path("/knowledge-base?weeksAgo=1")
        .reply(&filter)
        .await;

    assert_eq!(response.status(), 200);
    let json = body(response.body());
    assert_eq!(json["totalCount"], 1);
    assert_eq!(json["pages"][0]["title"], "Retro");
    assert_eq!(json["pages"][0]["parentInfo"]["type"], "database");
    assert_eq!(json["pages"][0]["parentInfo"]["title"], "Team");
}

/// Bad offsets are rejected before any workspace call.
#[tokio::test]
async fn malformed_offset_is_bad_request() {
    let workspace = Arc::new(seeded_workspace());
    let filter = routes(Arc::new(RecordFetcher::new(Arc::clone(&workspace))));

    for query in ["weeksAgo=-1", "weeksAgo=soon", "weeksAgo=1.5"] {
        let response = warp::test::request()
            .path(&format!("/knowledge-base?{query}"))
            .reply(&filter)
            .await;

        assert_eq!(response.status(), 400, "{query}");
        assert!(body(response.body())["error"].as_str().unwrap().starts_with("weeksAgo must be"));
    }
    assert_eq!(workspace.search_calls(), 0);
}

/// Upstream failures become 502 with the upstream message.
#[tokio::test]
async fn workspace_failure_is_bad_gateway() {
    let filter = routes(Arc::new(RecordFetcher::new(InMemoryWorkspace::new().failing_search())));

    let response = warp::test::request().path("/knowledge-base").reply(&filter).await;

    assert_eq!(response.status(), 502);
    assert_eq!(body(response.body())["error"], "HTTP 503: Service Unavailable");
}

/// Other paths and methods answer with JSON errors.
#[tokio::test]
async fn unknown_routes_are_json_errors() {
    let filter = routes(Arc::new(RecordFetcher::new(InMemoryWorkspace::new())));

    let missing = warp::test::request().path("/pages").reply(&filter).await;
    assert_eq!(missing.status(), 404);
    assert_eq!(body(missing.body())["error"], "Not Found");

    let posted = warp::test::request()
        .method("POST")
        .path("/knowledge-base")
        .reply(&filter)
        .await;
    assert_eq!(posted.status(), 405);
}
