//! Paged week navigation
//!
//! The controller owns the settled [`NavigationState`] and publishes every
//! step of a transition as a [`ViewModel`] on a watch channel. A transition
//! commits only after its week loaded; on failure the settled week is kept
//! and the error panel is shown.

use crate::error::NavigationError;
use crate::render::{render, PageView};
use crate::source::WeekSource;
use crate::state::{Direction, NavigationState, PaginationControls};
use std::fmt;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What the front end should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    /// Nothing requested yet
    Idle,
    /// A week is being fetched; any previous error panel is cleared
    Loading {
        /// Week being loaded
        target: NavigationState,
    },
    /// Week loaded and rendered
    Ready(PageView),
    /// Load failed
    Failed {
        /// Week the controller stayed on
        settled: NavigationState,
        /// Controls for the settled week
        controls: PaginationControls,
        /// Failure message shown in the error panel
        message: String,
    },
}

impl ViewModel {
    /// Check if a load is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Loading { target } => {
                writeln!(f, "Loading {}...", wt_calendar::week_label(target.weeks_ago()))
            }
            Self::Ready(page) => write!(f, "{page}"),
            Self::Failed { message, .. } => writeln!(f, "Error loading data: {message}"),
        }
    }
}

/// Drives one-week-at-a-time navigation over a [`WeekSource`]
#[derive(Debug)]
pub struct NavigationController<S> {
    source: S,
    settled: NavigationState,
    view: watch::Sender<ViewModel>,
}

impl<S: WeekSource> NavigationController<S> {
    /// Create controller at the current week, before anything is loaded
    pub fn new(source: S) -> Self {
        let (view, _) = watch::channel(ViewModel::Idle);
        Self {
            source,
            settled: NavigationState::current(),
            view,
        }
    }

    /// Receiver observing every published view
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.view.subscribe()
    }

    /// Last successfully loaded week
    #[inline]
    #[must_use]
    pub fn state(&self) -> NavigationState {
        self.settled
    }

    /// Latest published view
    #[must_use]
    pub fn view(&self) -> ViewModel {
        self.view.borrow().clone()
    }

    /// Load the current week
    ///
    /// # Errors
    /// The load failure; the view shows it and the current week stays settled.
    pub async fn load_initial(&mut self) -> Result<PageView, NavigationError> {
        self.show(NavigationState::current()).await
    }

    /// Press a pagination button
    ///
    /// # Errors
    ///
    /// [`NavigationError::AtCurrentWeek`] when `Next` is pressed on the
    /// current week (nothing is published), or the load failure.
    pub async fn navigate(&mut self, direction: Direction) -> Result<PageView, NavigationError> {
        let Some(target) = self.settled.step(direction) else {
            return Err(NavigationError::AtCurrentWeek);
        };
        self.show(target).await
    }

    /// Load the settled week again
    ///
    /// # Errors
    /// The load failure.
    pub async fn reload(&mut self) -> Result<PageView, NavigationError> {
        self.show(self.settled).await
    }

    async fn show(&mut self, target: NavigationState) -> Result<PageView, NavigationError> {
        debug!(weeks_ago = target.weeks_ago(), "Loading week");
        self.view.send_replace(ViewModel::Loading { target });

        match self.source.load_week(target.weeks_ago()).await {
            Ok(payload) => {
                self.settled = target;
                let page = render(&target, &payload);
                self.view.send_replace(ViewModel::Ready(page.clone()));
                Ok(page)
            }
            Err(error) => {
                warn!(
                    weeks_ago = target.weeks_ago(),
                    settled = self.settled.weeks_ago(),
                    %error,
                    "Week failed to load"
                );
                self.view.send_replace(ViewModel::Failed {
                    settled: self.settled,
                    controls: self.settled.controls(),
                    message: error.to_string(),
                });
                Err(error)
            }
        }
    }
}
