//! Where week payloads come from

use crate::error::NavigationError;
use async_trait::async_trait;
use std::sync::Arc;
use wt_http::ResilientClient;
use wt_workspace::KnowledgeBaseResponse;

/// Default backend proxy root (the `serve` command's default bind)
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:3000";

/// Loads the payload for one week
#[async_trait]
pub trait WeekSource: Send + Sync {
    /// Payload for the week `weeks_ago` weeks back
    async fn load_week(&self, weeks_ago: u32) -> Result<KnowledgeBaseResponse, NavigationError>;
}

#[async_trait]
impl<S: WeekSource + ?Sized> WeekSource for Arc<S> {
    async fn load_week(&self, weeks_ago: u32) -> Result<KnowledgeBaseResponse, NavigationError> {
        (**self).load_week(weeks_ago).await
    }
}

/// Client for the backend proxy's `knowledge-base` endpoint
///
/// Responses go through the client's cache, so revisiting a week within the
/// cache window costs no request.
#[derive(Debug, Clone)]
pub struct KnowledgeBaseClient {
    client: ResilientClient,
    api_base: String,
}

impl KnowledgeBaseClient {
    /// Create client for the proxy at `api_base`
    pub fn new(client: ResilientClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint URL; `weeksAgo` is omitted for the current week
    #[must_use]
    pub fn week_url(&self, weeks_ago: u32) -> String {
        if weeks_ago == 0 {
            format!("{}/knowledge-base", self.api_base)
        } else {
            format!("{}/knowledge-base?weeksAgo={}", self.api_base, weeks_ago)
        }
    }
}

#[async_trait]
impl WeekSource for KnowledgeBaseClient {
    async fn load_week(&self, weeks_ago: u32) -> Result<KnowledgeBaseResponse, NavigationError> {
        let body = self.client.fetch_json_cached(&self.week_url(weeks_ago)).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn current_week_url_has_no_query() {
        let client = KnowledgeBaseClient::new(
            ResilientClient::reqwest(Duration::from_secs(1)).unwrap(),
            "https://api.example.com/",
        );

        assert_eq!(client.week_url(0), "https://api.example.com/knowledge-base");
        assert_eq!(client.week_url(3), "https://api.example.com/knowledge-base?weeksAgo=3");
    }
}
