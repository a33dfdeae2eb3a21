//! Weekly Tracker Navigation
//!
//! Week-by-week browsing of the knowledge-base endpoint:
//! - [`NavigationState`] and [`PaginationControls`]: which week, which buttons
//! - [`NavigationController`]: atomic transitions published as [`ViewModel`]s
//! - [`load_all_weeks`]: the concurrent all-weeks listing
//! - [`render`] / [`render_week`]: pure view construction
//!
//! Both pagination strategies share the renderer; caching is chosen on the
//! [`wt_http::ResilientClient`] handed to [`KnowledgeBaseClient`].

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod all_weeks;
mod controller;
mod error;
mod render;
mod source;
mod state;

pub use all_weeks::{
    load_all_weeks, AllWeeksView, PaginationStrategy, WeekFailure, DEFAULT_WEEK_COUNT,
};
pub use controller::{NavigationController, ViewModel};
pub use error::NavigationError;
pub use render::{render, render_week, PageItem, PageView, ParentLine, WeekView, EMPTY_WEEK_MESSAGE};
pub use source::{KnowledgeBaseClient, WeekSource, DEFAULT_API_BASE};
pub use state::{Direction, NavigationState, PaginationControls};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
