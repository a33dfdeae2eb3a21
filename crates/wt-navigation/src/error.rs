//! Error types for week navigation

use wt_http::HttpError;

/// Loading or moving between weeks failed
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Knowledge-base request failed after retries
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Endpoint answered with an unexpected body
    #[error("invalid knowledge-base payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Forward navigation requested while showing the current week
    #[error("already showing the current week")]
    AtCurrentWeek,
}
