//! Arena-backed doubly linked recency list.
//!
//! Entries are stored in a vector of slots and linked to each other by
//! [`Handle`], an index into that vector plus the generation of the slot at
//! the time the entry was stored. Freed slots go onto a free list and are
//! reused by later insertions; their generation is bumped on release so a
//! handle to a removed entry no longer resolves.
//!
//! ```text
//!   slots
//!   ┌───────┬──────────────────────────────────────────────┐
//!   │ index │ Slot { generation, entry }                   │
//!   ├───────┼──────────────────────────────────────────────┤
//!   │ 0     │ { 0, Entry { A, prev: None, next: Some(2) } }│
//!   │ 1     │ { 1, None }                  ◄── free list   │
//!   │ 2     │ { 0, Entry { B, prev: Some(0), next: None } }│
//!   └───────┴──────────────────────────────────────────────┘
//!
//!   head (MRU) ─► [0] ◄──► [2] ◄── tail (LRU)
//! ```
//!
//! Every structural operation is O(1). The list never grows on its own: it
//! holds exactly the entries its owner pushed and has not yet removed.

use crate::entry::Entry;
use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

/// Stable, non-owning reference to an entry in a [`RecencyList`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Handle {
    index: usize,
    generation: u32,
}

struct Slot<K, V> {
    generation: u32,
    entry: Option<Entry<K, V>>,
}

/// Doubly linked list of entries ordered from most- to least-recently used.
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free: Vec<usize>,
    /// Most recently used.
    head: Option<Handle>,
    /// Least recently used.
    tail: Option<Handle>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Creates an empty list with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        RecencyList {
            slots: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Creates an empty list without reserving any storage.
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Reserves room for `additional` more entries than are currently stored.
    ///
    /// The free list is sized alongside the slots so that releasing entries
    /// later never reallocates.
    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let wanted = self.len.saturating_add(additional);
        self.slots
            .try_reserve(wanted.saturating_sub(self.slots.len()))?;
        self.free.try_reserve(wanted.saturating_sub(self.free.len()))
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the most recently used entry.
    #[inline]
    pub(crate) fn front(&self) -> Option<Handle> {
        self.head
    }

    /// Handle of the least recently used entry.
    #[inline]
    pub(crate) fn back(&self) -> Option<Handle> {
        self.tail
    }

    /// Resolves a handle, or `None` if it refers to a released slot.
    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> Option<&Entry<K, V>> {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> Option<&mut Entry<K, V>> {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Stores `entry` as the new most recently used element.
    pub(crate) fn push_front(&mut self, entry: Entry<K, V>) -> Handle {
        let handle = self.store(entry);
        self.link_front(handle);
        self.len += 1;
        handle
    }

    /// Detaches the entry behind `handle` and releases its slot.
    ///
    /// Returns `None` if the handle does not resolve.
    pub(crate) fn remove(&mut self, handle: Handle) -> Option<Entry<K, V>> {
        if !self.unlink(handle) {
            return None;
        }
        let slot = self.slots.get_mut(handle.index)?;
        let entry = slot.entry.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(entry)
    }

    /// Makes the entry behind `handle` the most recently used.
    ///
    /// Returns `false` if the handle does not resolve.
    pub(crate) fn move_to_front(&mut self, handle: Handle) -> bool {
        if self.head == Some(handle) {
            return true;
        }
        if !self.unlink(handle) {
            return false;
        }
        self.link_front(handle);
        true
    }

    /// Removes and returns the least recently used entry.
    pub(crate) fn pop_back(&mut self) -> Option<Entry<K, V>> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Drops every entry. Reserved storage is kept.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates entries from most- to least-recently used.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    fn store(&mut self, entry: Entry<K, V>) -> Handle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.entry = Some(entry);
            Handle {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            Handle {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    fn link_front(&mut self, handle: Handle) {
        let old_head = self.head;
        if let Some(entry) = self.get_mut(handle) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head {
            Some(old) => {
                if let Some(entry) = self.get_mut(old) {
                    entry.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) -> bool {
        let (prev, next) = match self.get_mut(handle) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return false,
        };
        match prev {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
        true
    }

    /// Panics if the links, the slot table and `len` disagree.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(handle) = cursor {
            let entry = self.get(handle).expect("dangling forward link");
            assert_eq!(entry.prev, prev, "prev link mismatch");
            prev = Some(handle);
            cursor = entry.next;
            count += 1;
            assert!(count <= self.len, "forward walk exceeds len");
        }
        assert_eq!(count, self.len, "forward walk length");
        assert_eq!(prev, self.tail, "forward walk must end at tail");

        let mut count = 0;
        let mut cursor = self.tail;
        while let Some(handle) = cursor {
            cursor = self.get(handle).expect("dangling backward link").prev;
            count += 1;
            assert!(count <= self.len, "backward walk exceeds len");
        }
        assert_eq!(count, self.len, "backward walk length");

        let occupied = self.slots.iter().filter(|s| s.entry.is_some()).count();
        assert_eq!(occupied, self.len);
        assert_eq!(occupied + self.free.len(), self.slots.len());
    }
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for RecencyList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecencyList")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

/// Iterator over a [`RecencyList`], most recent first.
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.front?)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.list.get(self.back?)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn keys(list: &RecencyList<u32, u32>) -> Vec<u32> {
        list.iter().map(|e| e.key).collect()
    }

    fn push(list: &mut RecencyList<u32, u32>, key: u32) -> Handle {
        list.push_front(Entry::new(key, key * 10))
    }

    #[test]
    fn test_push_front_orders_most_recent_first() {
        let mut list = RecencyList::new();
        let a = push(&mut list, 1);
        push(&mut list, 2);
        let c = push(&mut list, 3);

        assert_eq!(keys(&list), [3, 2, 1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(c));
        assert_eq!(list.back(), Some(a));
        list.validate();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new();
        let a = push(&mut list, 1);
        let b = push(&mut list, 2);
        let c = push(&mut list, 3);

        assert!(list.move_to_front(a));
        assert_eq!(keys(&list), [1, 3, 2]);
        list.validate();

        // middle element
        assert!(list.move_to_front(c));
        assert_eq!(keys(&list), [3, 1, 2]);
        list.validate();

        // already at the front
        assert!(list.move_to_front(c));
        assert_eq!(keys(&list), [3, 1, 2]);
        assert_eq!(list.back(), Some(b));
        list.validate();
    }

    #[test]
    fn test_remove_head_middle_tail() {
        let mut list = RecencyList::new();
        let a = push(&mut list, 1);
        let b = push(&mut list, 2);
        let c = push(&mut list, 3);
        let d = push(&mut list, 4);

        assert_eq!(list.remove(b).map(Entry::into_pair), Some((2, 20)));
        assert_eq!(keys(&list), [4, 3, 1]);
        list.validate();

        assert_eq!(list.remove(d).map(|e| e.key), Some(4));
        assert_eq!(list.front(), Some(c));
        list.validate();

        assert_eq!(list.remove(a).map(|e| e.key), Some(1));
        assert_eq!(list.back(), Some(c));
        assert_eq!(keys(&list), [3]);
        list.validate();

        assert_eq!(list.remove(c).map(|e| e.key), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.validate();
    }

    #[test]
    fn test_pop_back() {
        let mut list = RecencyList::new();
        assert!(list.pop_back().is_none());

        push(&mut list, 1);
        push(&mut list, 2);
        assert_eq!(list.pop_back().map(|e| e.key), Some(1));
        assert_eq!(list.pop_back().map(|e| e.key), Some(2));
        assert!(list.pop_back().is_none());
        list.validate();
    }

    #[test]
    fn test_released_slot_is_reused_and_stale_handle_rejected() {
        let mut list = RecencyList::new();
        let a = push(&mut list, 1);
        push(&mut list, 2);

        assert!(list.remove(a).is_some());
        let reused = push(&mut list, 3);
        assert_eq!(reused.index, a.index);
        assert_ne!(reused.generation, a.generation);

        assert!(list.get(a).is_none());
        assert!(list.remove(a).is_none());
        assert!(!list.move_to_front(a));
        assert_eq!(list.get(reused).map(|e| e.key), Some(3));
        assert_eq!(keys(&list), [3, 2]);
        list.validate();
    }

    #[test]
    fn test_reserved_storage_is_not_outgrown() {
        let mut list: RecencyList<u32, u32> = RecencyList::with_capacity(4);
        let slots = list.slots.capacity();
        for round in 0..10 {
            for key in 0..4 {
                push(&mut list, round * 4 + key);
            }
            while list.pop_back().is_some() {}
        }
        assert_eq!(list.slots.capacity(), slots);
        assert!(list.slots.len() <= 4);
    }

    #[test]
    fn test_iter_both_directions() {
        let mut list = RecencyList::new();
        for key in 1..=4 {
            push(&mut list, key);
        }
        let rev: Vec<u32> = list.iter().rev().map(|e| e.key).collect();
        assert_eq!(rev, [1, 2, 3, 4]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next().map(|e| e.key), Some(4));
        assert_eq!(iter.next_back().map(|e| e.key), Some(1));
        assert_eq!(iter.next().map(|e| e.key), Some(3));
        assert_eq!(iter.next_back().map(|e| e.key), Some(2));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::with_capacity(3);
        for key in 1..=3 {
            push(&mut list, key);
        }
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.iter().count(), 0);
        list.validate();

        push(&mut list, 9);
        assert_eq!(keys(&list), [9]);
        list.validate();
    }

    #[test]
    fn test_try_reserve() {
        let mut list: RecencyList<u32, u32> = RecencyList::new();
        assert!(list.try_reserve(16).is_ok());
        assert!(list.slots.capacity() >= 16);
        assert!(list.free.capacity() >= 16);
        assert!(list.try_reserve(usize::MAX).is_err());
    }
}
