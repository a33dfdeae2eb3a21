//! Error types for the HTTP layer

use crate::transport::TransportError;

/// Errors surfaced by [`ResilientClient`](crate::ResilientClient)
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Non-2xx response, either immediately fatal or the last allowed attempt
    #[error("HTTP {status}: {reason}")]
    Status {
        /// Response status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
        /// Requested URL
        url: String,
    },

    /// Network-level failure on the last allowed attempt
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Requested URL
        url: String,
        /// Underlying transport failure
        #[source]
        source: TransportError,
    },

    /// Response body was not the expected JSON
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// Requested URL
        url: String,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Client could not be constructed
    #[error("http client setup failed: {0}")]
    Setup(String),
}

impl HttpError {
    /// Create status error
    pub fn status(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Status {
            status,
            reason: reason.into(),
            url: url.into(),
        }
    }

    /// Status code, when the failure was an HTTP response
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the failure was a 4xx response
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }
}
