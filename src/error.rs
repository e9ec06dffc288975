//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// All failures are returned as values; none are used for internal control
/// flow. `NotFound` in particular is an expected, recoverable outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key not found in cache (absent, or expired and not yet swept)
    #[error("key not found: {0}")]
    NotFound(String),

    /// Cache was constructed with a capacity of zero
    #[error("capacity must be greater than zero")]
    InvalidCapacity,

    /// Operation attempted after the engine was closed
    #[error("cache is closed")]
    Closed,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
