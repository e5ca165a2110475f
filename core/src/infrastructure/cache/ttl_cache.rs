use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use dashmap::DashMap;
use tracing::debug;

use crate::domain::common::ports::CacheStore;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Inserts between two sweeps of expired entries.
pub const PURGE_INTERVAL: usize = 256;

/// In-process cache. Expired entries are dropped when read, and every
/// [`PURGE_INTERVAL`] inserts a sweep drops the ones nobody reads again.
#[derive(Debug, Clone, Default)]
pub struct TtlCache {
    entries: Arc<DashMap<String, CacheEntry>>,
    inserts: Arc<AtomicUsize>,
}

impl TtlCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for TtlCache {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        let now = Instant::now();
        let value = {
            let entry = self.entries.get(key)?;
            if entry.is_expired(now) {
                None
            } else {
                Some(entry.value.clone())
            }
        };

        if value.is_none() {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        }
        value
    }

    fn put(&self, key: String, value: serde_json::Value, ttl: Duration) {
        let inserted = self.inserts.fetch_add(1, Ordering::Relaxed) + 1;
        if inserted % PURGE_INTERVAL == 0 {
            self.purge_expired();
        }

        self.entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    fn take(&self, key: &str) -> Option<serde_json::Value> {
        let (_, entry) = self.entries.remove(key)?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value)
    }
}
