//! Bounded Cache - an in-memory key-value cache with TTL and LRU eviction
//!
//! A generic, thread-safe cache with two independent expiration mechanisms:
//! capacity-driven LRU eviction on write and time-driven TTL expiration
//! performed by a background sweep task. Time is supplied by an injectable
//! [`clock::Clock`], so expiry and sweep scheduling are fully deterministic
//! in tests.
//!
//! ```no_run
//! use bounded_cache::{CacheConfig, CacheEngine};
//!
//! # async fn demo() -> bounded_cache::Result<()> {
//! let cache: CacheEngine<String, String> =
//!     CacheEngine::new(CacheConfig::with_capacity(100))?;
//!
//! cache.put("greeting".to_string(), "hello".to_string(), None).await?;
//! assert_eq!(cache.get(&"greeting".to_string()).await?, "hello");
//!
//! cache.close().await;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{CacheEngine, CacheStats};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
