//! Bounded Cache demo
//!
//! Constructs a cache from environment configuration, issues a handful of
//! operations through the public contract, prints the resulting statistics,
//! and shuts down.

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_cache::{CacheConfig, CacheEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        capacity = config.capacity,
        default_ttl_ms = config.default_ttl.as_millis() as u64,
        sweep_interval_ms = config.sweep_interval.as_millis() as u64,
        "configuration loaded"
    );

    let cache: CacheEngine<String, String> = CacheEngine::new(config)?;

    cache
        .put("1".to_string(), "one".to_string(), Some(Duration::from_secs(5)))
        .await?;
    cache
        .put("2".to_string(), "two".to_string(), Some(Duration::from_secs(10)))
        .await?;

    let one = cache.get(&"1".to_string()).await?;
    info!(value = %one, "read back key 1");

    let has_two = cache.contains(&"2".to_string()).await;
    let has_three = cache.contains(&"3".to_string()).await;
    info!(has_two, has_three, "membership checks");

    let stats = cache.stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    cache.close().await;
    info!("cache closed");
    Ok(())
}
