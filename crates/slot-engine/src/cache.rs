//! Time-to-live cache for server responses held by booking forms.
//!
//! Free-slot lists and clinic hours are fetched per (doctor, date) and reused
//! until they go stale. The engine never reads this cache; callers consult it
//! before fetching and pass the resolved value into the generators. The clock
//! is injected so expiry is deterministic under test.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Cache key for a free-slot response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeSlotKey {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub granularity_minutes: u32,
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
}

/// Keyed values that expire `ttl` after they were stored.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    /// An empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// How long an entry stays fresh.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `value`, replacing any previous entry and restarting its TTL.
    pub fn insert(&mut self, key: K, value: V, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
            },
        );
    }

    /// The cached value if it is younger than the TTL at `now`.
    pub fn get(&self, key: &K, now: Instant) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| &entry.value)
    }

    /// Remove the entry for `key`, returning its value even if stale.
    pub fn invalidate(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|entry| entry.value)
    }

    /// Drop every stale entry; returns how many were removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
        before - self.entries.len()
    }

    /// Entries held, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are held, fresh or stale.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.stored_at) < self.ttl
    }
}
