//! Cache Store Module
//!
//! Single-threaded cache core combining HashMap storage with LRU eviction
//! and TTL expiration. The engine wraps it in a lock; all timing is passed
//! in as explicit instants so behavior is deterministic under test.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded key-value storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a new CacheStore with the given capacity.
    ///
    /// Fails with `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Put ==
    /// Stores a key-value pair inserted at `now` with the given TTL.
    ///
    /// If the key already exists, the entry is overwritten and both
    /// timestamps reset. If the key is new and the table is full, the least
    /// recently used entry is evicted first, so `len() <= capacity` holds
    /// after every call. Overwrites never evict.
    ///
    /// Returns the evicted key, if any.
    pub fn put(&mut self, key: K, value: V, ttl: Duration, now: Instant) -> Option<K> {
        let is_overwrite = self.entries.contains_key(&key);

        let evicted = if !is_overwrite && self.entries.len() >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        self.entries.insert(key, CacheEntry::new(value, now, ttl));
        self.stats.set_total_entries(self.entries.len());
        evicted
    }

    // == Get ==
    /// Retrieves a value by key, refreshing its recency to `now`.
    ///
    /// Expired-but-unswept entries are treated as absent: they are removed
    /// on the spot and the call fails with `NotFound`, so a stale value is
    /// never surfaced between sweeps. The value is returned as an owned
    /// clone, never a reference into storage.
    pub fn get(&mut self, key: &K, now: Instant) -> Result<V> {
        match self.entries.get_mut(key) {
            Some(entry) if entry.is_expired(now) => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_expired(1);
                self.stats.record_miss();
                Err(CacheError::NotFound(format!("{key:?}")))
            }
            Some(entry) => {
                entry.touch(now);
                self.stats.record_hit();
                Ok(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(format!("{key:?}")))
            }
        }
    }

    // == Contains ==
    /// Pure membership check at `now`.
    ///
    /// Does not update recency. Expired-but-unswept entries report false,
    /// consistent with `get`.
    pub fn contains(&self, key: &K, now: Instant) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Remove Expired ==
    /// Removes all entries expired at `now`; the sweep body.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, now: Instant) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        self.stats.record_expired(count);
        count
    }

    // == Evict LRU ==
    /// Removes the entry with the smallest `last_access`.
    ///
    /// Ties break by scan order. No-op on an empty table.
    fn evict_lru(&mut self) -> Option<K> {
        let lru_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone())?;

        self.entries.remove(&lru_key);
        self.stats.record_eviction();
        Some(lru_key)
    }

    // == Stats ==
    /// Returns a snapshot of the current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Capacity ==
    /// Returns the configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
