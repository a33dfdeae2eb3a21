//! Knowledge-base proxy
//!
//! `GET /knowledge-base?weeksAgo=<n>` answers with the week's enriched pages
//! as a `KnowledgeBaseResponse`. The workspace credential stays on the
//! server; browsers and `browse` only talk to this endpoint.

use crate::error::CliError;
use serde_json::json;
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};
use wt_workspace::{KnowledgeBaseResponse, RecordFetcher, WorkspaceApi};

/// Parse the `weeksAgo` query value; absent means the current week
///
/// # Errors
/// The offending value when it is not a non-negative integer.
pub fn parse_weeks_ago(params: &HashMap<String, String>) -> Result<u32, String> {
    match params.get("weeksAgo").map(|raw| raw.trim()) {
        None | Some("") => Ok(0),
        Some(raw) => raw.parse().map_err(|_| raw.to_string()),
    }
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(warp::reply::json(&json!({ "error": message })), status)
}

async fn knowledge_base<A: WorkspaceApi>(
    params: HashMap<String, String>,
    fetcher: Arc<RecordFetcher<A>>,
) -> Result<warp::reply::WithStatus<warp::reply::Json>, Infallible> {
    let weeks_ago = match parse_weeks_ago(&params) {
        Ok(weeks_ago) => weeks_ago,
        Err(raw) => {
            tracing::debug!("Rejected weeksAgo={:?}", raw);
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                &format!("weeksAgo must be a non-negative integer, got {raw:?}"),
            ));
        }
    };

    match fetcher.collect_week_now(weeks_ago).await {
        Ok(report) => {
            let body = KnowledgeBaseResponse::from(report);
            Ok(warp::reply::with_status(warp::reply::json(&body), StatusCode::OK))
        }
        Err(err) => {
            tracing::warn!("Week {} failed: {}", weeks_ago, err);
            Ok(error_reply(StatusCode::BAD_GATEWAY, &err.to_string()))
        }
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
    } else {
        tracing::warn!("Unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    };
    Ok(error_reply(status, message))
}

/// Routes served by [`serve`], for embedding or `warp::test`
pub fn routes<A>(
    fetcher: Arc<RecordFetcher<A>>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone
where
    A: WorkspaceApi + 'static,
{
    let fetcher = warp::any().map(move || fetcher.clone());

    warp::path("knowledge-base")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(fetcher)
        .and_then(knowledge_base::<A>)
        .with(warp::cors().allow_any_origin().allow_method("GET"))
        .recover(handle_rejection)
}

/// Serve until Ctrl-C
///
/// # Errors
/// `CliError::Serve` when `bind` is not an address or cannot be bound.
pub async fn serve<A>(fetcher: RecordFetcher<A>, bind: &str) -> Result<(), CliError>
where
    A: WorkspaceApi + 'static,
{
    let addr: SocketAddr = bind.parse().map_err(|err: std::net::AddrParseError| CliError::Serve {
        bind: bind.to_string(),
        reason: err.to_string(),
    })?;

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Ctrl-C handler unavailable; serving until killed");
            std::future::pending::<()>().await;
        }
    };
    let (local, server) = warp::serve(routes(Arc::new(fetcher)))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|err| CliError::Serve {
            bind: bind.to_string(),
            reason: err.to_string(),
        })?;

    tracing::info!("Serving knowledge base on http://{}", local);
    eprintln!("Serving knowledge base on http://{local}/knowledge-base");
    server.await;
    tracing::info!("Server stopped");
    Ok(())
}
