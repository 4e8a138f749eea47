//! Cache Metrics System
//!
//! Counters describing how a cache has been used, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap<String, f64>`.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap keeps the reported keys in a fixed order, so two reports taken
//! from identical workloads compare equal and print identically. With about a
//! dozen keys the lookup cost does not matter.
//!
//! # Misses
//!
//! A lookup that misses leaves the cache untouched, counters included. Callers
//! that want miss accounting report it with
//! [`LruCache::record_miss`](crate::LruCache::record_miss).

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters common to any eviction policy.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Lookups answered by the cache, hits plus recorded misses.
    pub requests: u64,

    /// Lookups that found their key.
    pub cache_hits: u64,

    /// New keys written into the cache.
    pub insertions: u64,

    /// Writes that replaced the value of a key already present.
    pub updates: u64,

    /// Entries dropped to make room for a new key.
    pub evictions: u64,

    /// Entries removed on request (`erase`, `remove`, `pop_lru`).
    pub removals: u64,
}

impl CoreCacheMetrics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    #[inline]
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are `requests - cache_hits`; there is no separate counter.
    #[inline]
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new key entering the cache.
    #[inline]
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a value replacement for a key already present.
    #[inline]
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records a capacity eviction.
    #[inline]
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Records an explicit removal.
    #[inline]
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Lookups that did not find their key.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, or 0.0 before any lookup.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Converts the counters to a map for reporting.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("requests".to_string(), self.requests as f64);

        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("removals".to_string(), self.removals as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.insertions > 0 {
            metrics.insert(
                "eviction_ratio".to_string(),
                self.evictions as f64 / self.insertions as f64,
            );
        }

        metrics
    }
}

/// Uniform metrics reporting for cache implementations.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, keys sorted alphabetically.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name of the eviction policy, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
