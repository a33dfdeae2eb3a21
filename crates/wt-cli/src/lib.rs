//! Weekly Tracker command line
//!
//! Commands:
//! - default (`-w <N>`): text report of pages created N weeks ago
//! - `export`: `week-<N>.json` files for a static site
//! - `serve`: the `knowledge-base` endpoint over HTTP
//! - `browse`: terminal front end for that endpoint
//!
//! Configuration is layered defaults, `weekly-tracker.toml` and environment
//! (see [`config`]).

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod browse;
mod commands;
pub mod config;
mod error;
pub mod export;
pub mod logging;
pub mod report;
pub mod server;

pub use commands::{
    cli, execute, knowledge_base_client, run, workspace_fetcher, Action, GlobalOptions,
};
pub use config::{ConfigError, TrackerConfig};
pub use error::CliError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
