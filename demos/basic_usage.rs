//! Basic LRU Cache Usage
//!
//! Walks through filling a small cache, refreshing an entry with `get`,
//! evicting on overflow, erasing and clearing, then prints the metrics.
//!
//! Run with `RUST_LOG=bounded_lru=trace` to see the cache's own events.

use bounded_lru::config::LruCacheConfig;
use bounded_lru::{CacheMetrics, LruCache};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Defaults to "info", can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "basic_usage=info,bounded_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match LruCacheConfig::try_new(3) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "bad cache configuration");
            return;
        }
    };
    let mut cache: LruCache<&str, u32> = LruCache::init(config, None);
    info!(capacity = cache.capacity().get(), "cache ready");

    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);
    info!(order = %cache.recency_order(), "filled");

    // apple becomes the most recently used entry
    if let Some(value) = cache.get(&"apple") {
        info!(value, "hit apple");
    }
    info!(order = %cache.recency_order(), "after get");

    // banana is now the least recently used entry
    if let Some((key, value)) = cache.push("durian", 4) {
        info!(key, value, "evicted");
    }
    info!(order = %cache.recency_order(), "after overflow");

    if cache.get(&"banana").is_none() {
        cache.record_miss();
        info!("banana missed");
    }

    cache.erase(&"cherry");
    info!(len = cache.len(), order = %cache.recency_order(), "after erase");

    for (name, value) in cache.metrics() {
        info!(metric = %name, value, "{} metrics", cache.algorithm_name());
    }

    cache.clear();
    info!(len = cache.len(), "cleared");
}
