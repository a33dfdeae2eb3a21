//! Bounded exponential backoff

use std::time::Duration;

/// Retry budget and backoff base
///
/// Attempts are indexed `0..=max_retries`; the wait after a failed attempt
/// `a` is `base_delay * 2^a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Wait after the first failed attempt
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Create retry policy
    #[inline]
    #[must_use]
    pub const fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Single attempt, no backoff
    #[inline]
    #[must_use]
    pub const fn no_retries() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total attempts, including the first
    #[inline]
    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait after failed attempt `attempt`
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2_u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}
