//! Week payload fixtures and a canned week source

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use wt_http::HttpError;
use wt_navigation::{NavigationError, WeekSource};
use wt_workspace::{KnowledgeBaseResponse, PageRecord};

/// Enriched record without parent or link
pub fn record(id: &str, title: &str, created: DateTime<Utc>) -> PageRecord {
    PageRecord {
        id: id.to_string(),
        title: title.to_string(),
        url: format!("https://www.notion.so/{id}"),
        created_time: created,
        link_property: None,
        parent_info: None,
    }
}

pub fn payload(date_range: &str, pages: Vec<PageRecord>) -> KnowledgeBaseResponse {
    KnowledgeBaseResponse {
        date_range: date_range.to_string(),
        total_count: pages.len(),
        pages,
    }
}

/// Serves fixed payloads per week; unknown weeks are empty
#[derive(Debug, Default)]
pub struct StaticWeekSource {
    weeks: HashMap<u32, KnowledgeBaseResponse>,
    failing: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    calls: Mutex<Vec<u32>>,
}

impl StaticWeekSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week(mut self, weeks_ago: u32, payload: KnowledgeBaseResponse) -> Self {
        self.weeks.insert(weeks_ago, payload);
        self
    }

    /// Loads of `weeks_ago` fail with HTTP 500
    pub fn failing_week(mut self, weeks_ago: u32) -> Self {
        self.failing.insert(weeks_ago);
        self
    }

    /// Loads of `weeks_ago` complete after `delay`
    pub fn delayed_week(mut self, weeks_ago: u32, delay: Duration) -> Self {
        self.delays.insert(weeks_ago, delay);
        self
    }

    /// Week indices requested, in call order
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeekSource for StaticWeekSource {
    async fn load_week(&self, weeks_ago: u32) -> Result<KnowledgeBaseResponse, NavigationError> {
        self.calls.lock().unwrap().push(weeks_ago);

        if let Some(delay) = self.delays.get(&weeks_ago) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&weeks_ago) {
            let url = format!("memory://knowledge-base?weeksAgo={weeks_ago}");
            return Err(HttpError::status(url, 500, "Internal Server Error").into());
        }

        Ok(self
            .weeks
            .get(&weeks_ago)
            .cloned()
            .unwrap_or_else(|| payload(&format!("week {weeks_ago}"), Vec::new())))
    }
}
