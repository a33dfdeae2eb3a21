//! Enriched page records
//!
//! These are the shapes written to export files, served by the
//! knowledge-base endpoint and consumed by the navigation front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of parent container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    /// Database
    Database,
    /// Page
    Page,
}

impl ParentKind {
    /// Icon shown next to the parent title
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Database => "📊",
            Self::Page => "📄",
        }
    }
}

/// Resolved parent container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentInfo {
    /// Container kind
    #[serde(rename = "type")]
    pub kind: ParentKind,
    /// Container title
    pub title: String,
    /// Container id
    pub id: String,
}

impl ParentInfo {
    /// Parent database
    pub fn database(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ParentKind::Database,
            title: title.into(),
            id: id.into(),
        }
    }

    /// Parent page
    pub fn page(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind: ParentKind::Page,
            title: title.into(),
            id: id.into(),
        }
    }
}

/// Page created inside a week window, with link and parent metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Page id
    pub id: String,
    /// Title, or `Untitled`
    pub title: String,
    /// Canonical page URL
    pub url: String,
    /// Creation timestamp
    pub created_time: DateTime<Utc>,
    /// First url-typed property
    #[serde(default)]
    pub link_property: Option<String>,
    /// Parent container; absent when there is none or the lookup failed
    #[serde(default)]
    pub parent_info: Option<ParentInfo>,
}
