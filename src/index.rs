//! Key to handle index.
//!
//! [`KeyIndex`] maps each cached key to the [`Handle`] of its entry in the
//! recency list. It is a thin layer over a hash map; the owning cache keeps it
//! in lockstep with the list so that a key is indexed exactly when its entry
//! is linked.

use crate::list::Handle;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
pub use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
pub use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// The reservation could not be satisfied.
///
/// The two map backends report different error types; callers only need to
/// know that it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReserveError;

/// Hash index from key to list handle.
pub(crate) struct KeyIndex<K, S = DefaultHashBuilder> {
    map: HashMap<K, Handle, S>,
}

impl<K: Hash + Eq, S: BuildHasher> KeyIndex<K, S> {
    /// Creates an index pre-sized for `capacity` keys.
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        KeyIndex {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Creates an empty index that has not allocated yet.
    pub(crate) fn with_hasher(hash_builder: S) -> Self {
        KeyIndex {
            map: HashMap::with_hasher(hash_builder),
        }
    }

    /// Reserves room for `additional` more keys.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), ReserveError> {
        self.map.try_reserve(additional).map_err(|_| ReserveError)
    }

    /// Registers `handle` for `key`, returning the handle it replaced.
    #[inline]
    pub(crate) fn insert(&mut self, key: K, handle: Handle) -> Option<Handle> {
        self.map.insert(key, handle)
    }

    #[inline]
    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Drops every mapping. Allocated buckets are kept.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, S> fmt::Debug for KeyIndex<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyIndex")
            .field("len", &self.map.len())
            .finish()
    }
}
