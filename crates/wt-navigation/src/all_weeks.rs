//! All-weeks listing: every week requested at once, displayed in week order

use crate::render::{render_week, WeekView};
use crate::source::WeekSource;
use futures::stream::{FuturesUnordered, StreamExt};
use std::fmt;
use tracing::{debug, warn};

/// Weeks shown by the all-weeks listing unless configured otherwise
pub const DEFAULT_WEEK_COUNT: u32 = 10;

/// How a front end pages through weeks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationStrategy {
    /// One week at a time with previous/next controls
    #[default]
    Paged,
    /// Weeks `0..count` loaded concurrently and listed together
    AllWeeks {
        /// Number of weeks
        count: u32,
    },
}

/// A week that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekFailure {
    /// Week index
    pub weeks_ago: u32,
    /// Failure message
    pub message: String,
}

/// Result of loading every week
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllWeeksView {
    /// Loaded weeks, ascending by `weeks_ago`
    pub weeks: Vec<WeekView>,
    /// Weeks excluded from the listing, ascending by `weeks_ago`
    pub failed: Vec<WeekFailure>,
}

impl AllWeeksView {
    /// "Warning: N week(s) could not be loaded", when anything failed
    #[must_use]
    pub fn advisory(&self) -> Option<String> {
        match self.failed.len() {
            0 => None,
            1 => Some("Warning: 1 week could not be loaded".to_string()),
            n => Some(format!("Warning: {n} weeks could not be loaded")),
        }
    }

    /// Check if every week failed
    #[must_use]
    pub fn is_total_failure(&self) -> bool {
        self.weeks.is_empty() && !self.failed.is_empty()
    }
}

impl fmt::Display for AllWeeksView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(advisory) = self.advisory() {
            writeln!(f, "{advisory}")?;
        }
        for week in &self.weeks {
            write!(f, "{week}")?;
        }
        Ok(())
    }
}

/// Load weeks `0..count` concurrently
///
/// Completion order does not matter: loaded weeks are sorted by index before
/// rendering. A failed week is recorded in [`AllWeeksView::failed`] and does
/// not affect the others.
pub async fn load_all_weeks<S: WeekSource + ?Sized>(source: &S, count: u32) -> AllWeeksView {
    let mut pending: FuturesUnordered<_> = (0..count)
        .map(|weeks_ago| async move { (weeks_ago, source.load_week(weeks_ago).await) })
        .collect();

    let mut loaded = Vec::new();
    let mut failed = Vec::new();
    while let Some((weeks_ago, result)) = pending.next().await {
        match result {
            Ok(payload) => {
                debug!(weeks_ago, pages = payload.total_count, "Week loaded");
                loaded.push((weeks_ago, payload));
            }
            Err(error) => {
                warn!(weeks_ago, %error, "Week could not be loaded");
                failed.push(WeekFailure {
                    weeks_ago,
                    message: error.to_string(),
                });
            }
        }
    }

    loaded.sort_by_key(|(weeks_ago, _)| *weeks_ago);
    failed.sort_by_key(|failure| failure.weeks_ago);

    AllWeeksView {
        weeks: loaded
            .iter()
            .map(|(weeks_ago, payload)| render_week(*weeks_ago, payload))
            .collect(),
        failed,
    }
}
