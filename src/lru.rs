//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity cache with O(1) operations for every common cache
//! operation, built from two parts:
//!
//! - a recency list holding the entries, most recently used at the front,
//!   stored in a slot arena and linked by index handles;
//! - a key index mapping each key to the handle of its entry.
//!
//! # Algorithm
//!
//! Every successful `get` and every `put` moves the touched entry to the front
//! of the list. When a `put` brings a new key into a full cache, the entry at
//! the back of the list, the one whose last touch is oldest, is evicted.
//! Because the list totally orders all entries there are never ties.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1) average
//!   - Put: O(1) average
//!   - Erase: O(1) average
//!   - Clear: O(n)
//!
//! - **Space Complexity**:
//!   - O(capacity). Storage for `capacity` entries is reserved when the cache
//!     is built, so hits and in-place updates never allocate.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe and takes no locks. The cache is
//! `Send` whenever its keys, values and hasher are, so an embedding program
//! that needs shared access wraps it in a `Mutex` or gives it a single owner.

use crate::config::LruCacheConfig;
use crate::entry::Entry;
use crate::error::{CacheError, Result};
use crate::index::{DefaultHashBuilder, KeyIndex};
use crate::list::{self, RecencyList};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::num::NonZeroUsize;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache holds at most `capacity` entries. Inserting a new key into a
/// full cache evicts the least recently used entry.
///
/// # Examples
///
/// ```
/// use bounded_lru::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: RecencyList<K, V>,
    index: KeyIndex<K, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from a plain integer capacity.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidConfiguration`] if `capacity` is `0`.
    /// - [`CacheError::AllocationFailure`] if storage for `capacity` entries
    ///   cannot be reserved.
    pub fn try_new(capacity: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        let config = LruCacheConfig::try_new(capacity).inspect_err(|err| {
            tracing::debug!(%err, "rejected LRU cache configuration");
        })?;
        LruCache::try_with_hasher(config.capacity, DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache from a configuration.
    ///
    /// Uses `hasher` when given, otherwise `S::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_lru::config::LruCacheConfig;
    /// use bounded_lru::LruCache;
    ///
    /// let cache: LruCache<u64, String> = LruCache::init(LruCacheConfig::default(), None);
    /// assert_eq!(cache.capacity().get(), 100);
    /// ```
    pub fn init(config: LruCacheConfig, hasher: Option<S>) -> Self
    where
        S: Default,
    {
        Self::with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Fallible counterpart of [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::AllocationFailure`] if storage for
    /// `config.capacity` entries cannot be reserved.
    pub fn try_init(config: LruCacheConfig, hasher: Option<S>) -> Result<Self>
    where
        S: Default,
    {
        Self::try_with_hasher(config.capacity, hasher.unwrap_or_default())
    }

    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        tracing::debug!(capacity = cap.get(), "creating LRU cache");
        LruCache {
            config: LruCacheConfig::new(cap),
            list: RecencyList::with_capacity(cap.get()),
            index: KeyIndex::with_capacity_and_hasher(cap.get(), hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Creates a new LRU cache, reporting allocation failure instead of
    /// aborting.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::AllocationFailure`] if storage for `cap` entries
    /// cannot be reserved.
    pub fn try_with_hasher(cap: NonZeroUsize, hash_builder: S) -> Result<Self> {
        let requested = cap.get();
        let failure = || {
            tracing::debug!(capacity = requested, "could not reserve LRU cache storage");
            CacheError::AllocationFailure { requested }
        };

        let mut list = RecencyList::new();
        list.try_reserve(requested).map_err(|_| failure())?;
        let mut index = KeyIndex::with_hasher(hash_builder);
        index.try_reserve(requested).map_err(|_| failure())?;

        tracing::debug!(capacity = requested, "creating LRU cache");
        Ok(LruCache {
            config: LruCacheConfig::new(cap),
            list,
            index,
            metrics: LruCacheMetrics::new(),
        })
    }

    /// Returns the maximum number of entries the cache can hold.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.lookup(key)?;
        let moved = self.list.move_to_front(handle);
        debug_assert!(moved, "indexed handle must resolve");
        self.metrics.core.record_hit();
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.lookup(key)?;
        let moved = self.list.move_to_front(handle);
        debug_assert!(moved, "indexed handle must resolve");
        self.metrics.core.record_hit();
        self.list.get_mut(handle).map(|entry| &mut entry.value)
    }

    /// Returns the value for `key` without touching recency order.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.lookup(key)?;
        self.list.get(handle).map(|entry| &entry.value)
    }

    /// Returns the entry that would be evicted next, without touching it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let entry = self.list.get(self.list.back()?)?;
        Some((&entry.key, &entry.value))
    }

    /// Returns the most recently used entry, without touching it.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        let entry = self.list.get(self.list.front()?)?;
        Some((&entry.key, &entry.value))
    }

    /// Returns `true` if `key` is cached. Does not touch recency order.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.lookup(key).is_some()
    }

    /// Records a lookup that missed the cache in the metrics.
    ///
    /// [`get`](Self::get) never counts its own misses.
    #[inline]
    pub fn record_miss(&mut self) {
        self.metrics.core.record_miss();
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Returns the pair displaced by the call:
    /// - `Some((key, old_value))` when `key` was already cached;
    /// - `Some((evicted_key, evicted_value))` when inserting a new key evicted
    ///   the least recently used entry;
    /// - `None` otherwise.
    pub fn push(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Clone,
    {
        if let Some(handle) = self.index.lookup(&key) {
            let moved = self.list.move_to_front(handle);
            debug_assert!(moved, "indexed handle must resolve");
            let entry = self.list.get_mut(handle)?;
            let old = entry.replace_value(value);
            self.metrics.core.record_update();
            return Some((key, old));
        }

        // Evicting before linking keeps the arena within `capacity` slots.
        // The new key is not linked yet, so it can never be the victim.
        let evicted = if self.list.len() >= self.capacity().get() {
            self.evict()
        } else {
            None
        };

        let handle = self.list.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, handle);
        self.metrics.core.record_insertion();
        evicted
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Evicts the least recently used entry if a new key would otherwise
    /// exceed the capacity. Use [`push`](Self::push) to get the displaced pair.
    #[inline]
    pub fn put(&mut self, key: K, value: V)
    where
        K: Clone,
    {
        self.push(key, value);
    }

    /// Removes `key`, returning its value if it was cached.
    ///
    /// The relative order of the remaining entries is unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let handle = self.index.remove(key)?;
        let entry = self.list.remove(handle)?;
        self.metrics.core.record_removal();
        Some(entry.value)
    }

    /// Removes `key`, returning whether anything was removed.
    #[inline]
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove(key).is_some()
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.metrics.core.record_removal();
        Some(entry.into_pair())
    }

    /// Removes every entry. Capacity and reserved storage are kept.
    pub fn clear(&mut self) {
        tracing::debug!(len = self.list.len(), "clearing LRU cache");
        self.list.clear();
        self.index.clear();
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.index.remove(&entry.key);
        self.metrics.core.record_eviction();
        tracing::trace!(len = self.list.len(), "evicted least recently used entry");
        Some(entry.into_pair())
    }

    #[cfg(test)]
    fn validate(&self) {
        self.list.validate();
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity().get());

        let mut cursor = self.list.front();
        while let Some(handle) = cursor {
            let entry = self.list.get(handle).expect("linked handle resolves");
            assert_eq!(self.index.lookup(&entry.key), Some(handle));
            cursor = entry.next;
        }
    }
}

impl<K, V, S> LruCache<K, V, S> {
    /// Returns the cache's metrics.
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Iterates entries from most- to least-recently used.
    ///
    /// Iteration does not touch recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterates keys from most- to least-recently used.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns a `Display` adapter listing keys from most- to least-recently
    /// used, e.g. `LRU (most->least): [3 , 1 , 2]`.
    ///
    /// Intended for diagnostics; the format is not part of the API contract.
    pub fn recency_order(&self) -> RecencyOrder<'_, K, V> {
        RecencyOrder { iter: self.iter() }
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> Extend<(K, V)> for LruCache<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

/// Iterator over `(&K, &V)` pairs, most recently used first.
///
/// Created by [`LruCache::iter`].
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Iterator over keys, most recently used first.
///
/// Created by [`LruCache::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

/// Diagnostic rendering of recency order.
///
/// Created by [`LruCache::recency_order`].
pub struct RecencyOrder<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<K: fmt::Display, V> fmt::Display for RecencyOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LRU (most->least): [")?;
        for (i, (key, _)) in self.iter.clone().enumerate() {
            if i > 0 {
                f.write_str(" , ")?;
            }
            write!(f, "{key}")?;
        }
        f.write_str("]")
    }
}

impl<K, V> fmt::Debug for RecencyOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyOrder")
            .field("len", &self.iter.len())
            .finish()
    }
}
