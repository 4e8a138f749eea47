//! Allocation Tests
//!
//! Storage for every entry is reserved when the cache is built, so cache
//! hits and in-place updates must not touch the allocator.
//!
//! The allocator counters are process-wide: keep a single test in this file so
//! no other test thread allocates while a region is being measured.

use bounded_lru::LruCache;
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;
use std::num::NonZeroUsize;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn test_hits_and_updates_do_not_allocate() {
    let cap = 64;
    let mut cache: LruCache<u64, u64> = LruCache::new(NonZeroUsize::new(cap).unwrap());
    for i in 0..cap as u64 {
        cache.put(i, i);
    }

    let region = Region::new(GLOBAL);
    let mut sum = 0u64;
    for round in 0..10u64 {
        for i in 0..cap as u64 {
            sum += cache.get(&i).copied().unwrap_or_default();
            if let Some(value) = cache.get_mut(&i) {
                *value += 1;
            }
            cache.put(i, i + round);
        }
    }
    let change = region.change();

    assert_eq!(change.allocations, 0, "hits and updates allocated");
    assert_eq!(change.reallocations, 0, "hits and updates reallocated");
    assert_eq!(change.deallocations, 0, "hits and updates freed memory");
    assert!(sum > 0);
    assert_eq!(cache.len(), cap);
}
