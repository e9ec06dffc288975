//! Configuration Module
//!
//! Handles cache configuration, optionally loaded from environment variables.

use std::env;
use std::time::Duration;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Default TTL for entries inserted without an explicit TTL
    pub default_ttl: Duration,
    /// Sweep interval consulted by the default clock
    pub sweep_interval: Duration,
    /// Number of elapsed sweep intervals before the table is actually swept
    pub sweep_threshold: u32,
    /// How often the sweep loop wakes to ask the clock whether a sweep is due
    pub sweep_tick: Duration,
}

impl CacheConfig {
    /// Creates a config with the given capacity and defaults for everything else.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Creates a config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 15000)
    /// - `CACHE_SWEEP_INTERVAL_MS` - Sweep interval in milliseconds (default: 1000)
    /// - `CACHE_SWEEP_THRESHOLD` - Intervals per actual sweep (default: 1)
    /// - `CACHE_SWEEP_TICK_MS` - Sweep loop wake-up period in milliseconds (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.capacity),
            default_ttl: env::var("CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_ttl),
            sweep_interval: env::var("CACHE_SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_interval),
            sweep_threshold: env::var("CACHE_SWEEP_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.sweep_threshold),
            sweep_tick: env::var("CACHE_SWEEP_TICK_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.sweep_tick),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            default_ttl: Duration::from_millis(15_000),
            sweep_interval: Duration::from_secs(1),
            sweep_threshold: 1,
            sweep_tick: Duration::from_millis(100),
        }
    }
}
