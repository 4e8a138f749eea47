#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ LruCache<K, V, S>                                            │
//! │                                                              │
//! │   KeyIndex (hash map)            RecencyList (slot arena)    │
//! │   ┌───────────┐                  head (MRU)                  │
//! │   │ k3 ─► h0  │─────────────────► [h0: k3] ◄─┐               │
//! │   │ k1 ─► h2  │──────────┐            ▲      │ prev / next   │
//! │   │ k2 ─► h1  │───────┐  └──────► [h2: k1] ◄─┘               │
//! │   └───────────┘       │               ▲                      │
//! │                       └─────────► [h1: k2]                   │
//! │                                  tail (LRU) ─► evicted next  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation | Method | Cost | Touches recency |
//! |-----------|--------|------|-----------------|
//! | lookup    | [`LruCache::get`], [`LruCache::get_mut`] | O(1) | yes, on hit |
//! | read-only | [`LruCache::peek`], [`LruCache::contains`] | O(1) | no |
//! | insert/update | [`LruCache::put`], [`LruCache::push`] | O(1) | yes |
//! | remove    | [`LruCache::erase`], [`LruCache::remove`], [`LruCache::pop_lru`] | O(1) | no |
//! | clear     | [`LruCache::clear`] | O(n) | - |
//! | snapshot  | [`LruCache::iter`], [`LruCache::keys`], [`LruCache::recency_order`] | O(n) | no |
//!
//! ## Construction
//!
//! ```rust
//! use bounded_lru::{CacheError, LruCache};
//! use bounded_lru::config::LruCacheConfig;
//! use core::num::NonZeroUsize;
//!
//! // Infallible: the capacity type rules out zero
//! let cache: LruCache<u32, u32> = LruCache::new(NonZeroUsize::new(16).unwrap());
//!
//! // From a config, with the default hasher
//! let cache: LruCache<u32, u32> = LruCache::init(LruCacheConfig::default(), None);
//!
//! // From a plain integer: zero is rejected
//! let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
//! assert_eq!(err, CacheError::InvalidConfiguration { requested: 0 });
//! ```
//!
//! ## Modules
//!
//! - [`lru`]: the LRU cache
//! - [`config`]: construction-time configuration
//! - [`error`]: construction errors
//! - [`metrics`]: usage counters

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(not(any(feature = "hashbrown", feature = "std")))]
compile_error!("bounded-lru needs a hash map: enable the `hashbrown` or the `std` feature");

/// Cache entry node: a key/value pair and its recency links.
mod entry;

/// Arena-backed doubly linked list ordering entries by recency.
mod list;

/// Hash index from key to recency list handle.
mod index;

/// Cache configuration.
pub mod config;

/// Construction errors.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// a new key arrives at capacity.
pub mod lru;

/// Cache metrics.
///
/// Counters for hits, misses, insertions, updates, evictions and removals,
/// reported in a deterministic order.
pub mod metrics;

pub use config::LruCacheConfig;
pub use error::CacheError;
pub use index::DefaultHashBuilder;
pub use lru::LruCache;
pub use metrics::{CacheMetrics, LruCacheMetrics};
