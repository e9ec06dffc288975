//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;
use crate::clock::Clock;

/// Spawns the background sweep task for a cache store.
///
/// Each iteration the task sleeps for `tick` without holding the lock, asks
/// the clock whether a sweep is due, and if so takes the write lock just
/// long enough to remove every expired entry.
///
/// The task exits when `shutdown` is signalled or when its sender side is
/// dropped, so it never outlives the engine that spawned it.
pub(crate) fn spawn_sweep_task<K, V>(
    store: Arc<RwLock<CacheStore<K, V>>>,
    clock: Arc<dyn Clock>,
    tick: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(tick_ms = tick.as_millis() as u64, "sweep task started");

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // Err means the engine was dropped without close()
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep(tick) => {
                    if !clock.should_sweep() {
                        continue;
                    }
                    let now = clock.now();
                    let removed = {
                        let mut store = store.write().await;
                        store.remove_expired(now)
                    };

                    if removed > 0 {
                        info!(removed, "sweep removed expired entries");
                    } else {
                        debug!("sweep found no expired entries");
                    }
                }
            }
        }

        info!("sweep task stopped");
    })
}
