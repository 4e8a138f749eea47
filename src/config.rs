//! Cache Configuration
//!
//! [`LruCacheConfig`] carries everything an [`LruCache`](crate::LruCache) needs
//! at construction time. The struct has public fields for simple instantiation;
//! the checked constructors exist for callers holding a plain `usize`.
//!
//! # Capacity
//!
//! `capacity` is the maximum number of entries and is fixed for the lifetime
//! of the cache. It is a [`NonZeroUsize`], so a zero-capacity cache cannot be
//! described. Converting from a `usize` goes through one of two paths:
//!
//! - [`LruCacheConfig::try_new`] (and `TryFrom<usize>`) rejects `0` with
//!   [`CacheError::InvalidConfiguration`].
//! - [`LruCacheConfig::clamped`] coerces `0` to `1` and logs a warning, for
//!   callers that need the lenient behaviour.
//!
//! # Examples
//!
//! ```
//! use bounded_lru::config::LruCacheConfig;
//! use bounded_lru::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//! assert_eq!(cache.capacity().get(), 1000);
//!
//! // Checked conversion from a plain integer
//! assert!(LruCacheConfig::try_new(0).is_err());
//! assert_eq!(LruCacheConfig::clamped(0).capacity.get(), 1);
//! ```

use crate::error::{CacheError, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Capacity used by [`LruCacheConfig::default`].
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(cap) => cap,
    None => NonZeroUsize::MIN,
};

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Immutable once
///   the cache is built.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a configuration for the given capacity.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    /// Creates a configuration from a plain integer, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfiguration`] when `capacity` is `0`.
    pub fn try_new(capacity: usize) -> Result<Self> {
        NonZeroUsize::new(capacity)
            .map(Self::new)
            .ok_or(CacheError::InvalidConfiguration {
                requested: capacity,
            })
    }

    /// Creates a configuration from a plain integer, treating zero as one.
    pub fn clamped(capacity: usize) -> Self {
        match NonZeroUsize::new(capacity) {
            Some(cap) => Self::new(cap),
            None => {
                tracing::warn!("requested cache capacity 0, using 1");
                Self::new(NonZeroUsize::MIN)
            }
        }
    }
}

impl Default for LruCacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = CacheError;

    fn try_from(capacity: usize) -> Result<Self> {
        Self::try_new(capacity)
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self::new(capacity)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
