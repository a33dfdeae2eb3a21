//! Weekly Tracker Workspace
//!
//! Reads pages from the document workspace and shapes them into weekly reports:
//! - [`WorkspaceApi`]: the remote calls (search, database, page), with [`NotionApi`]
//! - [`RecordFetcher`]: creation-window filtering and parent/link enrichment
//! - [`WeekReport`] / [`KnowledgeBaseResponse`]: export file and endpoint bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use wt_workspace::{NotionApi, RecordFetcher};
//!
//! let fetcher = RecordFetcher::new(NotionApi::new(client, token));
//! let report = fetcher.collect_week_now(0).await?;
//! println!("{} new page(s)", report.pages.len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod api;
mod error;
mod fetcher;
mod notion;
mod page;
mod records;
mod report;

pub use api::WorkspaceApi;
pub use error::{LookupError, WorkspaceError};
pub use fetcher::RecordFetcher;
pub use notion::{NotionApi, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};
pub use page::{PageRecord, ParentInfo, ParentKind};
pub use records::{
    ParentRef, RawDatabase, RawPage, RawParent, RawProperty, RichText, SearchResponse,
    TextContent, UNTITLED, UNTITLED_DATABASE,
};
pub use report::{KnowledgeBaseResponse, WeekReport};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
