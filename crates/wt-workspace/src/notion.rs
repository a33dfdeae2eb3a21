//! Notion implementation of [`WorkspaceApi`]

use crate::api::WorkspaceApi;
use crate::error::WorkspaceError;
use crate::records::{RawDatabase, RawPage, SearchResponse};
use async_trait::async_trait;
use serde_json::json;
use wt_http::{HttpRequest, ResilientClient};

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version header value the record shapes are written against
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

const SEARCH_PAGE_SIZE: u32 = 100;

/// Notion REST client
///
/// Requests go through the retrying client; responses are never cached
/// because search results change between calls.
#[derive(Debug, Clone)]
pub struct NotionApi {
    client: ResilientClient,
    base_url: String,
    token: String,
    version: String,
}

impl NotionApi {
    /// Create client authenticating with `token`
    ///
    /// `client` should have caching disabled.
    pub fn new(client: ResilientClient, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            version: DEFAULT_NOTION_VERSION.to_string(),
        }
    }

    /// With API root (tests, proxies)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// With `Notion-Version` header value
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    fn authorize(&self, request: HttpRequest) -> HttpRequest {
        request
            .with_bearer(&self.token)
            .with_header("Notion-Version", self.version.as_str())
    }

    fn search_request(&self, start_cursor: Option<String>) -> HttpRequest {
        let mut body = json!({
            "filter": { "property": "object", "value": "page" },
            "sort": { "direction": "descending", "timestamp": "last_edited_time" },
            "page_size": SEARCH_PAGE_SIZE,
        });
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = json!(cursor);
        }
        self.authorize(HttpRequest::post_json(format!("{}/search", self.base_url), body))
    }
}

#[async_trait]
impl WorkspaceApi for NotionApi {
    async fn search_pages(
        &self,
        start_cursor: Option<String>,
    ) -> Result<SearchResponse, WorkspaceError> {
        let request = self.search_request(start_cursor);
        Ok(self.client.fetch_json(&request).await?)
    }

    async fn retrieve_database(&self, database_id: &str) -> Result<RawDatabase, WorkspaceError> {
        let url = format!("{}/databases/{}", self.base_url, database_id);
        let request = self.authorize(HttpRequest::get(url));
        Ok(self.client.fetch_json(&request).await?)
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, WorkspaceError> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        let request = self.authorize(HttpRequest::get(url));
        Ok(self.client.fetch_json(&request).await?)
    }
}
