//! Time-bounded response cache keyed by exact URL
//!
//! Entries are written after a successful fetch and evicted lazily: a read
//! that finds a stale entry removes it. Nothing sweeps the map in the
//! background. Time comes from `tokio::time::Instant`, so paused test
//! runtimes control expiry.

use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default freshness window
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Caching behaviour of a [`ResilientClient`](crate::ResilientClient)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// Every call goes to the network
    Disabled,
    /// Successful JSON bodies are reused for the given duration
    Ttl(Duration),
}

impl Default for CacheStrategy {
    fn default() -> Self {
        Self::Ttl(DEFAULT_CACHE_TTL)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    stored_at: Instant,
}

/// URL-keyed JSON cache
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    /// Create cache with freshness window `ttl`
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fresh body for `url`; a stale entry is removed
    pub async fn get(&self, url: &str) -> Option<Value> {
        let mut entries = self.entries.lock().await;

        let fresh = entries
            .get(url)
            .map(|entry| entry.stored_at.elapsed() < self.ttl);
        match fresh {
            Some(true) => entries.get(url).map(|entry| entry.data.clone()),
            Some(false) => {
                entries.remove(url);
                tracing::debug!("Evicted stale cache entry for {}", url);
                None
            }
            None => None,
        }
    }

    /// Store `data` for `url`, replacing any previous entry
    pub async fn insert(&self, url: &str, data: Value) {
        let entry = CacheEntry {
            data,
            stored_at: Instant::now(),
        };
        self.entries.lock().await.insert(url.to_string(), entry);
    }

    /// Entries currently held, fresh or not
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Check if no entries are held
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
