//! Cache Module
//!
//! Provides bounded in-memory caching with TTL expiration and LRU eviction.

mod engine;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;
