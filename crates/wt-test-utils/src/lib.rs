//! Testing utilities for the weekly tracker workspace
//!
//! Shared fakes for the three seams: the HTTP [`Transport`](wt_http::Transport),
//! the remote [`WorkspaceApi`](wt_workspace::WorkspaceApi) and the
//! navigation [`WeekSource`](wt_navigation::WeekSource).

#![allow(missing_docs)]

mod transport;
mod weeks;
mod workspace;

pub use transport::{Outcome, RecordedCall, ScriptedTransport};
pub use weeks::{payload, record, StaticWeekSource};
pub use workspace::{database, InMemoryWorkspace, PageBuilder};
