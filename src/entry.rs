//! Cache entry node.
//!
//! An [`Entry`] is one cached key/value pair plus its links into the recency
//! list. Links are [`Handle`]s into the arena that owns every entry, so an
//! entry never points at memory it does not share an owner with.

use crate::list::Handle;
use core::fmt;

/// A key/value pair and its neighbours in recency order.
///
/// `prev` points towards the most-recently-used end, `next` towards the
/// least-recently-used end. `prev` is `None` at the front, `next` is `None`
/// at the back, and both are `None` while the entry is detached.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<K, V> Entry<K, V> {
    /// Creates a detached entry.
    #[inline]
    pub(crate) fn new(key: K, value: V) -> Self {
        Entry {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Consumes the entry, returning the pair it held.
    #[inline]
    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Replaces the value, returning the previous one.
    #[inline]
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_new_is_detached() {
        let entry = Entry::new("k", 1);
        assert!(entry.prev.is_none());
        assert!(entry.next.is_none());
        assert_eq!(entry.into_pair(), ("k", 1));
    }

    #[test]
    fn test_entry_replace_value() {
        let mut entry = Entry::new("k", 1);
        assert_eq!(entry.replace_value(2), 1);
        assert_eq!(entry.value, 2);
    }
}
