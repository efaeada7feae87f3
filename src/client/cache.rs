//! Response cache with a freshness window.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::client::clock::{Clock, SystemClock};
use crate::observability::metrics;

/// A cached response body.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: Value,
    pub fetched_at: DateTime<Utc>,
}

/// Thread-safe cache keyed by `normalized_base + endpoint`.
///
/// Stale entries read as absent but stay in the map until overwritten.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Arc<DashMap<String, CacheEntry>>,
    freshness: Duration,
    clock: Arc<dyn Clock>,
}

impl ResponseCache {
    /// Create an empty cache backed by the system clock.
    pub fn new(freshness: Duration) -> Self {
        Self::with_clock(freshness, Arc::new(SystemClock))
    }

    pub fn with_clock(freshness: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            freshness,
            clock,
        }
    }

    /// Return the payload if the entry exists and is still fresh.
    pub fn get_fresh(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let hit = self.inner.get(key).and_then(|entry| {
            let age = now.signed_duration_since(entry.fetched_at);
            // Negative age (clock moved backwards) counts as fresh.
            let fresh = age
                .to_std()
                .map_or(true, |age| age < self.freshness);
            fresh.then(|| entry.payload.clone())
        });
        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Store a payload stamped with the current time, replacing any old entry.
    pub fn insert(&self, key: String, payload: Value) {
        let fetched_at = self.clock.now();
        self.inner.insert(key, CacheEntry { payload, fetched_at });
    }

    /// Raw entry, fresh or not.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.inner.len())
            .field("freshness", &self.freshness)
            .finish()
    }
}
