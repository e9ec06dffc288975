//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus the timestamps that drive
/// LRU eviction and TTL expiration.
///
/// All instants come from the engine's injected clock; the entry itself
/// never reads the time.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant of insertion or of the last successful read; the LRU
    /// recency signal
    pub last_access: Instant,
    /// Instant past which the entry is stale. Fixed at insertion as
    /// `now + ttl` and never recomputed: TTL is absolute, not sliding.
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now` with the given TTL.
    pub fn new(value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            last_access: now,
            expires_at: now + ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// Boundary condition: the entry is expired once `now` reaches the
    /// expiration instant, i.e. `expires_at <= now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }

    // == Touch ==
    /// Refreshes the recency signal after a successful read.
    ///
    /// Does not touch `expires_at`.
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation() {
        let now = Instant::now();
        let entry = CacheEntry::new("test_value", now, Duration::from_secs(60));

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.last_access, now);
        assert_eq!(entry.expires_at, now + Duration::from_secs(60));
    }

    #[test]
    fn test_entry_not_expired_before_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", now, Duration::from_secs(60));

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_secs(59)));
    }

    #[test]
    fn test_entry_expired_after_ttl() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", now, Duration::from_secs(60));

        assert!(entry.is_expired(now + Duration::from_secs(61)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = CacheEntry::new("v", now, Duration::from_secs(60));

        // Expired exactly at the expiration instant
        assert!(entry.is_expired(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_touch_refreshes_recency_only() {
        let now = Instant::now();
        let mut entry = CacheEntry::new("v", now, Duration::from_secs(60));
        let expires_at = entry.expires_at;

        entry.touch(now + Duration::from_secs(10));

        assert_eq!(entry.last_access, now + Duration::from_secs(10));
        assert_eq!(entry.expires_at, expires_at, "TTL must not slide on read");
    }
}
