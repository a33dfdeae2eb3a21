//! Weekly Tracker HTTP
//!
//! Outbound HTTP with the failure handling the tracker relies on:
//! - [`RetryPolicy`]: bounded exponential backoff, no retry on a first-attempt 4xx
//! - [`ResponseCache`]: URL-keyed JSON bodies, fresh for five minutes by default
//! - [`ResilientClient`]: both of the above over a pluggable [`Transport`]
//!
//! # Example
//!
//! ```rust,ignore
//! use wt_http::{CacheStrategy, ResilientClient};
//! use std::time::Duration;
//!
//! let client = ResilientClient::reqwest(Duration::from_secs(30))?
//!     .with_cache_strategy(CacheStrategy::default());
//! let body = client.fetch_json_cached("https://api.example.com/knowledge-base").await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cache;
mod client;
mod error;
mod request;
mod retry;
mod transport;

pub use cache::{CacheStrategy, ResponseCache, DEFAULT_CACHE_TTL};
pub use client::ResilientClient;
pub use error::HttpError;
pub use request::{HttpRequest, HttpResponse, Method};
pub use retry::RetryPolicy;
pub use transport::{ReqwestTransport, Transport, TransportError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
