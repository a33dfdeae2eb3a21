//! Tracker configuration
//!
//! Values come from built-in defaults, then an optional TOML file, then the
//! environment. The workspace credential is only ever read from the
//! environment (or a `.env` file loaded into it).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use wt_http::{CacheStrategy, RetryPolicy};

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "weekly-tracker.toml";

/// Workspace credential
pub const TOKEN_ENV: &str = "NOTION_TOKEN";
/// Overrides [`TrackerConfig::notion_version`]
pub const VERSION_ENV: &str = "NOTION_VERSION";
/// Overrides [`TrackerConfig::api_base`]
pub const API_BASE_ENV: &str = "WEEKLY_TRACKER_API_BASE";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Credential variable unset or empty
    #[error("NOTION_TOKEN environment variable is required")]
    MissingCredential,

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`TrackerConfig`]
    #[error("invalid config {path}: {source}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parse failure
        #[source]
        source: toml::de::Error,
    },
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Workspace integration token
    #[serde(skip)]
    pub notion_token: Option<String>,
    /// Workspace API root
    pub notion_base_url: String,
    /// `Notion-Version` header value
    pub notion_version: String,
    /// Knowledge-base proxy used by `browse`
    pub api_base: String,
    /// Address `serve` binds to
    pub bind: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// First backoff delay in milliseconds
    pub retry_base_delay_ms: u64,
    /// Response cache lifetime in seconds; 0 disables caching
    pub cache_ttl_secs: u64,
    /// Search result pages read per report
    pub max_search_pages: usize,
    /// Directory for `week-<N>.json` files
    pub export_dir: PathBuf,
    /// Weeks written by `export`
    pub export_weeks: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            notion_token: None,
            notion_base_url: wt_workspace::DEFAULT_BASE_URL.to_string(),
            notion_version: wt_workspace::DEFAULT_NOTION_VERSION.to_string(),
            api_base: wt_navigation::DEFAULT_API_BASE.to_string(),
            bind: "127.0.0.1:3000".to_string(),
            request_timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            cache_ttl_secs: 300,
            max_search_pages: 1,
            export_dir: PathBuf::from("./docs/data"),
            export_weeks: wt_navigation::DEFAULT_WEEK_COUNT,
        }
    }
}

impl TrackerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML; missing keys keep their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` naming `origin`.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read `path`, or [`DEFAULT_CONFIG_FILE`] if present, then apply the
    /// process environment
    ///
    /// # Errors
    /// An explicit `path` that cannot be read, or any file that does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let config = match file {
            Some(file) => {
                let text = std::fs::read_to_string(&file).map_err(|source| ConfigError::Read {
                    path: file.clone(),
                    source,
                })?;
                tracing::debug!("Loaded config from {}", file.display());
                Self::from_toml_str(&text, &file)?
            }
            None => Self::default(),
        };

        Ok(config.apply_env(|name| std::env::var(name).ok()))
    }

    /// Override fields from environment variables found by `lookup`
    ///
    /// Empty values are ignored.
    #[must_use]
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(token) = get(TOKEN_ENV) {
            self.notion_token = Some(token);
        }
        if let Some(version) = get(VERSION_ENV) {
            self.notion_version = version;
        }
        if let Some(api_base) = get(API_BASE_ENV) {
            self.api_base = api_base;
        }
        self
    }

    /// With credential
    #[inline]
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.notion_token = Some(token.into());
        self
    }

    /// With knowledge-base proxy root
    #[inline]
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// With server bind address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    /// With export directory
    #[inline]
    #[must_use]
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// With number of exported weeks
    #[inline]
    #[must_use]
    pub fn with_export_weeks(mut self, weeks: u32) -> Self {
        self.export_weeks = weeks;
        self
    }

    /// With response cache lifetime; zero disables the cache
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = ttl.as_secs();
        self
    }

    /// Credential for workspace commands
    ///
    /// # Errors
    /// `ConfigError::MissingCredential` when unset.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.notion_token.as_deref().ok_or(ConfigError::MissingCredential)
    }

    /// Retry settings for the HTTP client
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_base_delay_ms))
    }

    /// Cache settings for the knowledge-base client
    #[must_use]
    pub fn cache_strategy(&self) -> CacheStrategy {
        match self.cache_ttl_secs {
            0 => CacheStrategy::Disabled,
            secs => CacheStrategy::Ttl(Duration::from_secs(secs)),
        }
    }

    /// Per-request timeout
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
