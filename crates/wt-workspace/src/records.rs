//! Raw records as returned by the remote workspace
//!
//! Only the fields the tracker reads are modelled; everything else in the
//! provider's payload is ignored. Property maps keep document order so that
//! "the first title-typed property" is well defined.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;

/// Title used when a page has no usable title property
pub const UNTITLED: &str = "Untitled";

/// Title used when a database has no title text
pub const UNTITLED_DATABASE: &str = "Untitled Database";

/// One rich-text segment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    /// Text payload for `type: text` segments
    #[serde(default)]
    pub text: Option<TextContent>,
    /// Rendered text, present for every segment type
    #[serde(default)]
    pub plain_text: Option<String>,
}

impl RichText {
    /// Segment text, preferring the raw text content
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.text
            .as_ref()
            .map(|t| t.content.as_str())
            .or(self.plain_text.as_deref())
    }
}

/// Text payload of a rich-text segment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextContent {
    /// Literal content
    pub content: String,
}

/// Page property value, reduced to the title and url shapes
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    /// Property type tag (`title`, `url`, `rich_text`, ...)
    #[serde(rename = "type")]
    pub kind: String,
    /// Segments of a `title` property
    #[serde(default)]
    pub title: Option<Vec<RichText>>,
    /// Value of a `url` property
    #[serde(default)]
    pub url: Option<String>,
}

/// Parent pointer of a page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawParent {
    /// Row of a database
    DatabaseId {
        /// Parent database
        database_id: String,
    },
    /// Sub-page
    PageId {
        /// Parent page
        page_id: String,
    },
    /// Workspace root, block, or any parent the tracker does not resolve
    #[serde(other)]
    Other,
}

/// Resolvable parent container
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParentRef {
    /// Database by id
    Database(String),
    /// Page by id
    Page(String),
}

impl ParentRef {
    /// Container id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Database(id) | Self::Page(id) => id,
        }
    }
}

/// Page object
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    /// Page id
    pub id: String,
    /// Canonical page URL
    #[serde(default)]
    pub url: String,
    /// Creation timestamp
    pub created_time: DateTime<Utc>,
    /// Properties in document order
    #[serde(default)]
    pub properties: IndexMap<String, RawProperty>,
    /// Parent pointer
    #[serde(default)]
    pub parent: Option<RawParent>,
}

impl RawPage {
    /// Text of the first segment of the first title-typed property
    #[must_use]
    pub fn title(&self) -> String {
        self.properties
            .values()
            .find(|prop| prop.kind == "title")
            .and_then(|prop| prop.title.as_ref())
            .and_then(|segments| segments.first())
            .and_then(RichText::content)
            .unwrap_or(UNTITLED)
            .to_string()
    }

    /// Value of the first url-typed property, if set
    #[must_use]
    pub fn link_property(&self) -> Option<String> {
        self.properties
            .values()
            .find(|prop| prop.kind == "url")
            .and_then(|prop| prop.url.clone())
    }

    /// Parent container worth resolving
    #[must_use]
    pub fn parent_ref(&self) -> Option<ParentRef> {
        match self.parent.as_ref()? {
            RawParent::DatabaseId { database_id } => Some(ParentRef::Database(database_id.clone())),
            RawParent::PageId { page_id } => Some(ParentRef::Page(page_id.clone())),
            RawParent::Other => None,
        }
    }
}

/// Database object
#[derive(Debug, Clone, Deserialize)]
pub struct RawDatabase {
    /// Database id
    pub id: String,
    /// Title segments
    #[serde(default)]
    pub title: Vec<RichText>,
}

impl RawDatabase {
    /// Text of the first title segment
    #[must_use]
    pub fn title_text(&self) -> String {
        self.title
            .first()
            .and_then(RichText::content)
            .filter(|text| !text.is_empty())
            .unwrap_or(UNTITLED_DATABASE)
            .to_string()
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    /// Matching pages, most recently edited first
    #[serde(default)]
    pub results: Vec<RawPage>,
    /// Whether another page of results exists
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page
    #[serde(default)]
    pub next_cursor: Option<String>,
}
