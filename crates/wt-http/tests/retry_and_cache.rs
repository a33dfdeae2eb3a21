//! ResilientClient Tests
//!
//! Retry timing and cache expiry, driven by paused tokio time.
//!
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wt_http::{CacheStrategy, HttpError, HttpRequest, HttpResponse, ResilientClient, RetryPolicy};
use wt_test_utils::ScriptedTransport;

const URL: &str = "https://api.example.com/knowledge-base?weeksAgo=2";

fn client(transport: &Arc<ScriptedTransport>) -> ResilientClient {
    ResilientClient::new(transport.clone())
}

#[tokio::test(start_paused = true)]
async fn test_client_error_on_first_attempt_is_not_retried() {
    let transport = ScriptedTransport::new().then_status(404).always_json(&json!({})).shared();

    let err = client(&transport).fetch_with_retry(&HttpRequest::get(URL)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(err.is_client_error());
    assert_eq!(err.to_string(), "HTTP 404: Not Found");
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_server_error_retries_with_exponential_backoff() {
    let transport = ScriptedTransport::new().always_status(503).shared();

    let err = client(&transport).fetch_with_retry(&HttpRequest::get(URL)).await.unwrap_err();

    assert!(matches!(err, HttpError::Status { status: 503, .. }));
    assert_eq!(transport.call_count(), 4);
    assert_eq!(
        transport.attempt_gaps(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(2000),
            Duration::from_millis(4000),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_server_error_then_success_recovers() {
    let transport = ScriptedTransport::new()
        .then_status(503)
        .then_status(502)
        .then_json(&json!({"ok": true}))
        .shared();

    let response = client(&transport).fetch_with_retry(&HttpRequest::get(URL)).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_client_error_after_first_attempt_is_retried() {
    let transport = ScriptedTransport::new()
        .then_status(500)
        .then_status(429)
        .then_json(&json!({"ok": true}))
        .shared();

    client(&transport).fetch_with_retry(&HttpRequest::get(URL)).await.unwrap();

    assert_eq!(transport.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_network_errors_are_retried_from_first_attempt() {
    let transport = ScriptedTransport::new()
        .then_network_error("connection reset")
        .then_json(&json!({"ok": true}))
        .shared();

    client(&transport).fetch_with_retry(&HttpRequest::get(URL)).await.unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(transport.attempt_gaps(), vec![Duration::from_millis(1000)]);
}

#[tokio::test(start_paused = true)]
async fn test_network_error_on_last_attempt_surfaces() {
    let transport = ScriptedTransport::new()
        .then_network_error("timed out")
        .then_network_error("timed out")
        .shared();
    let client =
        client(&transport).with_retry_policy(RetryPolicy::new(1, Duration::from_millis(10)));

    let err = client.fetch_with_retry(&HttpRequest::get(URL)).await.unwrap_err();

    assert!(matches!(err, HttpError::Transport { .. }));
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cached_fetch_within_ttl_hits_network_once() {
    let transport = ScriptedTransport::new().always_json(&json!({"totalCount": 3})).shared();
    let client = client(&transport);

    let first = client.fetch_json_cached(URL).await.unwrap();
    tokio::time::advance(Duration::from_secs(4 * 60 + 59)).await;
    let second = client.fetch_json_cached(URL).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cached_fetch_after_ttl_refetches() {
    let transport = ScriptedTransport::new().always_json(&json!({"totalCount": 3})).shared();
    let client = client(&transport);

    client.fetch_json_cached(URL).await.unwrap();
    tokio::time::advance(Duration::from_secs(5 * 60) + Duration::from_millis(1)).await;
    client.fetch_json_cached(URL).await.unwrap();

    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cache_is_keyed_by_exact_url() {
    let transport = ScriptedTransport::new().always_json(&json!({})).shared();
    let client = client(&transport);

    client.fetch_json_cached(URL).await.unwrap();
    client.fetch_json_cached("https://api.example.com/knowledge-base?weeksAgo=3").await.unwrap();
    client.fetch_json_cached(URL).await.unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(client.cache().unwrap().len().await, 2);
}

#[tokio::test(start_paused = true)]
async fn test_failures_are_never_cached() {
    let transport = ScriptedTransport::new()
        .then_status(404)
        .always_json(&json!({"pages": []}))
        .shared();
    let client = client(&transport);

    assert!(client.fetch_json_cached(URL).await.is_err());
    assert!(client.cache().unwrap().is_empty().await);

    client.fetch_json_cached(URL).await.unwrap();
    client.fetch_json_cached(URL).await.unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_cache_always_fetches() {
    let transport = ScriptedTransport::new().always_json(&json!({})).shared();
    let client = client(&transport).with_cache_strategy(CacheStrategy::Disabled);

    client.fetch_json_cached(URL).await.unwrap();
    client.fetch_json_cached(URL).await.unwrap();

    assert!(client.cache().is_none());
    assert_eq!(transport.call_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_undecodable_body_is_a_decode_error() {
    let transport = ScriptedTransport::new()
        .then_response(HttpResponse::new(200, "<html>maintenance</html>"))
        .shared();
    let client = client(&transport);

    let err = client.fetch_json_cached(URL).await.unwrap_err();

    assert!(matches!(err, HttpError::Decode { .. }));
    assert!(client.cache().unwrap().is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn test_maximal_retry_budget_keeps_retrying() {
    let transport = ScriptedTransport::new()
        .then_status(503)
        .then_network_error("connection reset")
        .then_status(500)
        .then_json(&json!({"ok": true}))
        .shared();
    let client = client(&transport)
        .with_retry_policy(RetryPolicy::new(u32::MAX, Duration::from_millis(10)));

    let response = client.fetch_with_retry(&HttpRequest::get(URL)).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_single_attempt_budget_surfaces_first_failure() {
    let transport = ScriptedTransport::new().always_status(503).shared();
    let client = client(&transport).with_retry_policy(RetryPolicy::no_retries());

    let err = client.fetch_with_retry(&HttpRequest::get(URL)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(transport.call_count(), 1);
}
