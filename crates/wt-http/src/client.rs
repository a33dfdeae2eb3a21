//! Retrying, optionally caching HTTP client
//!
//! Retry rules, per failed attempt `a` of `0..=max_retries`:
//! - 4xx on attempt 0 fails immediately (client errors are not transient)
//! - any failure on the last attempt is returned to the caller
//! - otherwise wait `base_delay * 2^a` and try again
//!
//! Network errors follow the same rules without the attempt-0 exception.

use crate::cache::{CacheStrategy, ResponseCache};
use crate::error::HttpError;
use crate::request::{HttpRequest, HttpResponse};
use crate::retry::RetryPolicy;
use crate::transport::{ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client with bounded retries and a URL-keyed TTL cache
#[derive(Debug, Clone)]
pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
    cache: Option<Arc<ResponseCache>>,
}

impl ResilientClient {
    /// Create client over `transport` with default retry and cache settings
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            policy: RetryPolicy::default(),
            cache: None,
        }
        .with_cache_strategy(CacheStrategy::default())
    }

    /// Create client backed by `reqwest`
    ///
    /// # Errors
    /// Returns `HttpError::Setup` if the underlying client cannot be built.
    pub fn reqwest(timeout: Duration) -> Result<Self, HttpError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(timeout)?)))
    }

    /// With retry policy
    #[inline]
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// With cache strategy; replaces any existing cache
    #[must_use]
    pub fn with_cache_strategy(mut self, strategy: CacheStrategy) -> Self {
        self.cache = match strategy {
            CacheStrategy::Disabled => None,
            CacheStrategy::Ttl(ttl) => Some(Arc::new(ResponseCache::new(ttl))),
        };
        self
    }

    /// Active retry policy
    #[inline]
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Response cache, if caching is enabled
    #[inline]
    #[must_use]
    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_deref()
    }

    /// Send `request`, retrying transient failures
    ///
    /// # Errors
    /// - `HttpError::Status` for a 4xx on the first attempt or a non-2xx on the last
    /// - `HttpError::Transport` when the last attempt fails at the network level
    pub async fn fetch_with_retry(&self, request: &HttpRequest) -> Result<HttpResponse, HttpError> {
        let last = self.policy.max_retries;
        let mut attempt = 0;

        loop {
            match self.transport.send(request).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => {
                    let error =
                        HttpError::status(request.url(), response.status(), response.reason());
                    if response.is_client_error() && attempt == 0 {
                        tracing::debug!("Not retrying {}: {}", request.url(), error);
                        return Err(error);
                    }
                    if attempt == last {
                        tracing::warn!(
                            "Giving up on {} after {} attempts: {}",
                            request.url(),
                            self.policy.total_attempts(),
                            error
                        );
                        return Err(error);
                    }
                    tracing::debug!("Attempt {} for {} failed: {}", attempt, request.url(), error);
                }
                Err(source) => {
                    if attempt == last {
                        tracing::warn!(
                            "Giving up on {} after {} attempts: {}",
                            request.url(),
                            self.policy.total_attempts(),
                            source
                        );
                        return Err(HttpError::Transport {
                            url: request.url().to_string(),
                            source,
                        });
                    }
                    tracing::debug!("Attempt {} for {} failed: {}", attempt, request.url(), source);
                }
            }

            let delay = self.policy.delay_for_attempt(attempt);
            tracing::debug!("Backing off {:?} before retrying {}", delay, request.url());
            tokio::time::sleep(delay).await;
            attempt = attempt.saturating_add(1);
        }
    }

    /// Send `request` with retries and decode the JSON body
    ///
    /// # Errors
    /// Any [`fetch_with_retry`](Self::fetch_with_retry) error, or `HttpError::Decode`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: &HttpRequest,
    ) -> Result<T, HttpError> {
        let response = self.fetch_with_retry(request).await?;
        response.json().map_err(|source| HttpError::Decode {
            url: request.url().to_string(),
            source,
        })
    }

    /// GET `url` as JSON, served from the cache while fresh
    ///
    /// Only successful, decodable bodies are stored. The key is the URL
    /// string alone, which is sound because this entry point accepts no
    /// headers or body that could vary independently of it.
    ///
    /// # Errors
    /// Same as [`fetch_json`](Self::fetch_json); failures are never cached.
    pub async fn fetch_json_cached(&self, url: &str) -> Result<Value, HttpError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(url).await {
                tracing::debug!("Cache hit for {}", url);
                return Ok(hit);
            }
        }

        let data: Value = self.fetch_json(&HttpRequest::get(url)).await?;

        if let Some(cache) = &self.cache {
            cache.insert(url, data.clone()).await;
        }
        Ok(data)
    }
}
