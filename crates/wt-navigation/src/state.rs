//! Navigation state and pagination controls
//!
//! The state is a plain value passed into and returned from transitions.
//! "Previous" is unbounded; "Next" stops at the current week.

/// Which week is displayed, as weeks before the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NavigationState {
    weeks_ago: u32,
}

/// Pagination button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One week further back
    Previous,
    /// One week closer to now
    Next,
}

/// Enabled state of the pagination buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaginationControls {
    /// "Previous week" button
    pub previous_enabled: bool,
    /// "Next week" button
    pub next_enabled: bool,
}

impl PaginationControls {
    /// Check if the button for `direction` is enabled
    #[inline]
    #[must_use]
    pub fn is_enabled(&self, direction: Direction) -> bool {
        match direction {
            Direction::Previous => self.previous_enabled,
            Direction::Next => self.next_enabled,
        }
    }
}

impl NavigationState {
    /// The current week
    #[inline]
    #[must_use]
    pub const fn current() -> Self {
        Self { weeks_ago: 0 }
    }

    /// `weeks_ago` weeks back
    #[inline]
    #[must_use]
    pub const fn at(weeks_ago: u32) -> Self {
        Self { weeks_ago }
    }

    /// Weeks before the current one
    #[inline]
    #[must_use]
    pub const fn weeks_ago(&self) -> u32 {
        self.weeks_ago
    }

    /// Check if this is the current week
    #[inline]
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.weeks_ago == 0
    }

    /// One week further back
    #[inline]
    #[must_use]
    pub const fn previous(self) -> Self {
        Self {
            weeks_ago: self.weeks_ago.saturating_add(1),
        }
    }

    /// One week closer to now; `None` at the current week
    #[inline]
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.weeks_ago.checked_sub(1).map(Self::at)
    }

    /// Target of pressing `direction`, if that button is enabled
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Previous => Some(self.previous()),
            Direction::Next => self.next(),
        }
    }

    /// Button state for this week
    #[inline]
    #[must_use]
    pub const fn controls(&self) -> PaginationControls {
        PaginationControls {
            previous_enabled: true,
            next_enabled: self.weeks_ago > 0,
        }
    }
}
