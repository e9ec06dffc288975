//! Cache Engine Module
//!
//! Thread-safe front end over the cache store: wraps it in a single lock
//! shared with the background sweep task, stamps every operation with the
//! injected clock, and owns the sweep task's lifecycle.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == Cache Engine ==
/// Bounded, TTL-aware, LRU-evicting key-value store safe under concurrent
/// access.
///
/// All operations and the background sweep serialize on one lock; `get` and
/// `put` take it for writing (a read refreshes recency), `contains` for
/// reading. Values come back as owned clones, never references into the
/// locked table.
///
/// Construction spawns the sweep task and therefore requires a Tokio
/// runtime. [`close`](Self::close) stops the task and waits for it; simply
/// dropping the engine also terminates the task promptly, because dropping
/// the shutdown channel sender wakes it.
pub struct CacheEngine<K, V> {
    store: Arc<RwLock<CacheStore<K, V>>>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    closed: AtomicBool,
    shutdown: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<K, V> CacheEngine<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates an engine with a real-time clock built from the config's
    /// sweep interval and threshold.
    ///
    /// Fails with `InvalidCapacity` when `config.capacity` is zero.
    pub fn new(config: CacheConfig) -> Result<Self> {
        let clock = Arc::new(SystemClock::new(
            config.sweep_interval,
            config.sweep_threshold,
        ));
        Self::with_clock(config, clock)
    }

    /// Creates an engine with an injected clock (a [`ManualClock`] in tests).
    ///
    /// [`ManualClock`]: crate::clock::ManualClock
    pub fn with_clock(config: CacheConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let store = Arc::new(RwLock::new(CacheStore::new(config.capacity)?));
        let (shutdown, shutdown_rx) = watch::channel(false);

        let sweeper = spawn_sweep_task(
            Arc::clone(&store),
            Arc::clone(&clock),
            config.sweep_tick,
            shutdown_rx,
        );
        debug!(capacity = config.capacity, "cache engine started");

        Ok(Self {
            store,
            clock,
            default_ttl: config.default_ttl,
            closed: AtomicBool::new(false),
            shutdown,
            sweeper: Mutex::new(Some(sweeper)),
        })
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// `ttl` falls back to the configured default when `None`. An existing
    /// key is overwritten with both timestamps refreshed; a new key inserted
    /// into a full table first evicts the least recently used entry.
    pub async fn put(&self, key: K, value: V, ttl: Option<Duration>) -> Result<()> {
        self.check_open()?;
        let now = self.clock.now();
        let ttl = ttl.unwrap_or(self.default_ttl);

        let mut store = self.store.write().await;
        if let Some(evicted) = store.put(key, value, ttl, now) {
            debug!(key = ?evicted, "evicted least recently used entry");
        }
        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key, refreshing its recency.
    ///
    /// Fails with `NotFound` for absent keys and for entries whose TTL has
    /// elapsed but which the sweep has not yet removed.
    pub async fn get(&self, key: &K) -> Result<V> {
        self.check_open()?;
        let now = self.clock.now();
        self.store.write().await.get(key, now)
    }

    // == Contains ==
    /// Pure membership check; does not update recency.
    ///
    /// Reports false for absent keys, expired-but-unswept keys, and after
    /// the engine is closed.
    pub async fn contains(&self, key: &K) -> bool {
        if self.closed.load(Ordering::Acquire) {
            return false;
        }
        let now = self.clock.now();
        self.store.read().await.contains(key, now)
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Close ==
    /// Stops the background sweep task and waits for it to exit.
    ///
    /// Idempotent. After close, `put` and `get` fail fast with `Closed` and
    /// `contains` reports false.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        // Receiver may already be gone if the task exited on its own.
        let _ = self.shutdown.send(true);

        let handle = self
            .sweeper
            .lock()
            .expect("sweeper handle lock poisoned")
            .take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
        debug!("cache engine closed");
    }

    fn check_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(CacheError::Closed)
        } else {
            Ok(())
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn engine(capacity: usize, clock: &ManualClock) -> CacheEngine<&'static str, String> {
        CacheEngine::with_clock(
            CacheConfig::with_capacity(capacity),
            Arc::new(clock.clone()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_engine_zero_capacity_rejected() {
        let result: Result<CacheEngine<String, String>> =
            CacheEngine::new(CacheConfig::with_capacity(0));
        assert!(matches!(result, Err(CacheError::InvalidCapacity)));
    }

    #[tokio::test]
    async fn test_engine_put_get_contains() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        cache.put("key1", "value1".to_string(), None).await.unwrap();

        assert!(cache.contains(&"key1").await);
        assert_eq!(cache.get(&"key1").await.unwrap(), "value1");
        assert_eq!(cache.len().await, 1);

        cache.close().await;
    }

    #[tokio::test]
    async fn test_engine_get_missing_key() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        let result = cache.get(&"missing").await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
        assert!(!cache.contains(&"missing").await);

        cache.close().await;
    }

    #[tokio::test]
    async fn test_engine_default_ttl_applies() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        cache.put("key1", "v".to_string(), None).await.unwrap();

        // Default TTL is 15 s; the entry is gone to readers once it elapses.
        clock.advance(Duration::from_millis(15_000));
        assert!(!cache.contains(&"key1").await);

        cache.close().await;
    }

    #[tokio::test]
    async fn test_engine_overwrite_refreshes_ttl() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        cache
            .put("key1", "v1".to_string(), Some(Duration::from_millis(1000)))
            .await
            .unwrap();
        clock.advance(Duration::from_millis(900));
        cache
            .put("key1", "v2".to_string(), Some(Duration::from_millis(1000)))
            .await
            .unwrap();

        clock.advance(Duration::from_millis(600));
        assert_eq!(cache.get(&"key1").await.unwrap(), "v2");

        cache.close().await;
    }

    #[tokio::test]
    async fn test_engine_closed_operations_fail_fast() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        cache.put("key1", "v".to_string(), None).await.unwrap();
        cache.close().await;

        assert!(matches!(
            cache.put("key2", "v".to_string(), None).await,
            Err(CacheError::Closed)
        ));
        assert!(matches!(cache.get(&"key1").await, Err(CacheError::Closed)));
        assert!(!cache.contains(&"key1").await);
    }

    #[tokio::test]
    async fn test_engine_close_is_idempotent() {
        let clock = ManualClock::new();
        let cache = engine(10, &clock);

        cache.close().await;
        cache.close().await;
    }

    #[tokio::test]
    async fn test_engine_concurrent_callers() {
        let clock = ManualClock::new();
        let cache = Arc::new(
            CacheEngine::<String, String>::with_clock(
                CacheConfig::with_capacity(256),
                Arc::new(clock.clone()),
            )
            .unwrap(),
        );

        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                for j in 0..20 {
                    let key = format!("key-{i}-{j}");
                    cache.put(key.clone(), format!("v{j}"), None).await.unwrap();
                    assert_eq!(cache.get(&key).await.unwrap(), format!("v{j}"));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 160);
        cache.close().await;
    }
}
