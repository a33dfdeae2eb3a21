//! Command failures

use crate::config::ConfigError;
use std::path::PathBuf;
use wt_http::HttpError;
use wt_navigation::NavigationError;
use wt_workspace::WorkspaceError;

/// A command could not complete
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad or missing configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client setup
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Workspace search failed
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Knowledge-base load failed
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// Export file or directory
    #[error("{path}: {source}")]
    File {
        /// Affected path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Terminal output or input
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report serialization
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Every week of the all-weeks listing failed
    #[error("none of the {weeks} week(s) could be loaded")]
    NothingLoaded {
        /// Weeks requested
        weeks: u32,
    },

    /// Server could not start
    #[error("cannot serve on {bind}: {reason}")]
    Serve {
        /// Requested address
        bind: String,
        /// Failure description
        reason: String,
    },
}

impl CliError {
    /// Check if the failure is the missing workspace credential
    #[must_use]
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::Config(ConfigError::MissingCredential))
    }
}
