//! In-memory document workspace and raw page builders

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use wt_workspace::{RawDatabase, RawPage, SearchResponse, WorkspaceApi, WorkspaceError};

fn rich_text(content: &str) -> Value {
    json!([{ "type": "text", "text": { "content": content }, "plain_text": content }])
}

/// Raw database object as the provider returns it
pub fn database(id: &str, title: &str) -> Value {
    json!({ "object": "database", "id": id, "title": rich_text(title) })
}

/// Builds provider-shaped page JSON
#[derive(Debug, Clone)]
pub struct PageBuilder {
    id: String,
    created: DateTime<Utc>,
    title: Option<String>,
    link: Option<String>,
    parent: Value,
}

impl PageBuilder {
    /// Untitled page at the workspace root
    pub fn new(id: &str, created: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            created,
            title: None,
            link: None,
            parent: json!({ "type": "workspace", "workspace": true }),
        }
    }

    pub fn titled(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn link(mut self, url: &str) -> Self {
        self.link = Some(url.to_string());
        self
    }

    pub fn in_database(mut self, database_id: &str) -> Self {
        self.parent = json!({ "type": "database_id", "database_id": database_id });
        self
    }

    pub fn under_page(mut self, page_id: &str) -> Self {
        self.parent = json!({ "type": "page_id", "page_id": page_id });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn json(&self) -> Value {
        let mut properties = serde_json::Map::new();
        properties.insert("Notes".into(), json!({ "type": "rich_text", "rich_text": [] }));
        if let Some(title) = &self.title {
            properties.insert("Name".into(), json!({ "type": "title", "title": rich_text(title) }));
        }
        if let Some(link) = &self.link {
            properties.insert("Link".into(), json!({ "type": "url", "url": link }));
        }

        json!({
            "object": "page",
            "id": self.id,
            "url": format!("https://www.notion.so/{}", self.id),
            "created_time": self.created.to_rfc3339_opts(SecondsFormat::Millis, true),
            "last_edited_time": self.created.to_rfc3339_opts(SecondsFormat::Millis, true),
            "parent": self.parent,
            "properties": properties,
        })
    }

    pub fn build(&self) -> RawPage {
        serde_json::from_value(self.json()).unwrap()
    }
}

/// Workspace serving fixed search results and lookup targets
#[derive(Debug, Default)]
pub struct InMemoryWorkspace {
    results: Vec<Value>,
    databases: HashMap<String, Value>,
    pages: HashMap<String, Value>,
    failing: HashSet<String>,
    search_fails: bool,
    page_size: Option<usize>,
    search_calls: AtomicUsize,
    database_calls: AtomicUsize,
    page_calls: AtomicUsize,
}

impl InMemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a search result
    pub fn with_page(mut self, page: PageBuilder) -> Self {
        self.results.push(page.json());
        self
    }

    pub fn with_database(mut self, id: &str, title: &str) -> Self {
        self.databases.insert(id.to_string(), database(id, title));
        self
    }

    /// Page reachable by id lookup but absent from search results
    pub fn with_parent_page(mut self, page: PageBuilder) -> Self {
        self.pages.insert(page.id().to_string(), page.json());
        self
    }

    /// Lookups of `id` fail as if access were denied
    pub fn failing_lookup(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.search_fails = true;
        self
    }

    /// Split search results into pages of `size`
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn database_calls(&self) -> usize {
        self.database_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }

    fn lookup(
        &self,
        kind: &str,
        table: &HashMap<String, Value>,
        id: &str,
    ) -> Result<Value, WorkspaceError> {
        let url = format!("memory://{kind}/{id}");
        if self.failing.contains(id) {
            return Err(WorkspaceError::rejected(url, 403, "Forbidden"));
        }
        table
            .get(id)
            .cloned()
            .ok_or_else(|| WorkspaceError::rejected(url, 404, "Not Found"))
    }
}

#[async_trait]
impl WorkspaceApi for InMemoryWorkspace {
    async fn search_pages(
        &self,
        start_cursor: Option<String>,
    ) -> Result<SearchResponse, WorkspaceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.search_fails {
            return Err(WorkspaceError::rejected("memory://search", 503, "Service Unavailable"));
        }

        let total = self.results.len();
        let start = start_cursor
            .and_then(|c| c.parse::<usize>().ok())
            .unwrap_or(0)
            .min(total);
        let end = self.page_size.map_or(total, |size| (start + size).min(total));
        let has_more = end < self.results.len();
        let results = self.results[start..end].to_vec();

        let body = json!({
            "object": "list",
            "results": results,
            "has_more": has_more,
            "next_cursor": has_more.then(|| end.to_string()),
        });
        Ok(serde_json::from_value(body).unwrap())
    }

    async fn retrieve_database(&self, database_id: &str) -> Result<RawDatabase, WorkspaceError> {
        self.database_calls.fetch_add(1, Ordering::SeqCst);
        let value = self.lookup("databases", &self.databases, database_id)?;
        Ok(serde_json::from_value(value).unwrap())
    }

    async fn retrieve_page(&self, page_id: &str) -> Result<RawPage, WorkspaceError> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        let value = self.lookup("pages", &self.pages, page_id)?;
        Ok(serde_json::from_value(value).unwrap())
    }
}
