//! Per-week report and its knowledge-base projection

use crate::page::PageRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One week's enriched pages, as written to `week-<N>.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekReport {
    /// Weeks before the current one
    pub week: u32,
    /// "This Week", "Last Week", ...
    pub week_label: String,
    /// "Oct 12, 2026 - Oct 18, 2026"
    pub date_range: String,
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
    /// Pages created inside the window
    pub pages: Vec<PageRecord>,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
}

/// Body of `GET /knowledge-base?weeksAgo=<n>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeBaseResponse {
    /// "Oct 12, 2026 - Oct 18, 2026"
    pub date_range: String,
    /// Pages created inside the window
    #[serde(default)]
    pub pages: Vec<PageRecord>,
    /// Number of pages
    #[serde(default)]
    pub total_count: usize,
}

impl From<WeekReport> for KnowledgeBaseResponse {
    fn from(report: WeekReport) -> Self {
        Self {
            date_range: report.date_range,
            total_count: report.pages.len(),
            pages: report.pages,
        }
    }
}
