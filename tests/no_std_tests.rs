#![no_std]
extern crate alloc;
extern crate bounded_lru;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use bounded_lru::config::LruCacheConfig;
use bounded_lru::LruCache;
use core::num::NonZeroUsize;

fn make_lru<K: core::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

#[test]
fn test_lru_borrowed_lookup_in_no_std() {
    let mut cache = make_lru(2);

    // Owned String keys, looked up through &str
    assert_eq!(cache.push(String::from("left"), 1), None);
    assert_eq!(cache.push(String::from("right"), 2), None);
    assert_eq!(cache.get("left"), Some(&1));

    // "right" is now the least recently used
    let evicted = cache.push(String::from("middle"), 3);
    assert_eq!(evicted, Some((String::from("right"), 2)));
    assert!(!cache.contains("right"));
    assert!(cache.erase("left"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_lru_with_alloc_values_in_no_std() {
    let mut cache = make_lru(3);

    for i in 0..5 {
        cache.put(format!("key{}", i), Vec::from([i; 4]));
    }

    assert_eq!(cache.len(), 3);
    let keys: Vec<String> = cache.keys().cloned().collect();
    assert_eq!(keys, ["key4", "key3", "key2"]);
    assert_eq!(cache.get("key2"), Some(&Vec::from([2; 4])));
}

#[test]
fn test_lru_recency_order_in_no_std() {
    let mut cache = make_lru(2);
    cache.put(1u8, ());
    cache.put(2u8, ());
    cache.get(&1);
    assert_eq!(
        cache.recency_order().to_string(),
        "LRU (most->least): [1 , 2]"
    );
}
