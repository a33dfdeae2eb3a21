//! Error types for workspace access

use crate::records::ParentRef;
use wt_http::HttpError;

/// Remote workspace call failed
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// HTTP layer gave up
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl WorkspaceError {
    /// Provider rejected the request with `status`
    pub fn rejected(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Http(HttpError::status(url, status, reason))
    }
}

/// Parent container could not be resolved
///
/// Kept distinct from "no parent" so callers can tell the two apart even
/// though the report path degrades both to absent metadata.
#[derive(Debug, thiserror::Error)]
#[error("lookup of parent {parent:?} failed: {source}")]
pub struct LookupError {
    /// Container that was being resolved
    pub parent: ParentRef,
    /// Underlying failure
    #[source]
    pub source: WorkspaceError,
}

impl LookupError {
    /// Create lookup error
    pub fn new(parent: ParentRef, source: WorkspaceError) -> Self {
        Self { parent, source }
    }
}
