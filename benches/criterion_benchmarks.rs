use bounded_lru::config::LruCacheConfig;
use bounded_lru::LruCache;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::num::NonZeroUsize;

const CACHE_SIZE: usize = 1000;
const NUM_OPERATIONS: usize = 10_000;

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

fn filled_lru(cap: usize) -> LruCache<usize, usize> {
    let mut cache = make_lru(cap);
    for i in 0..cap {
        cache.put(i, i);
    }
    cache
}

// Simple linear congruential generator for reproducible benchmarks
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

/// Keys drawn mostly from a hot set that fits in the cache, with a cold tail
/// that forces evictions.
fn skewed_keys(count: usize, seed: u64) -> Vec<usize> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|_| {
            let r = rng.next_u64() as usize;
            if r % 10 < 8 {
                r % (CACHE_SIZE / 2)
            } else {
                r % (CACHE_SIZE * 10)
            }
        })
        .collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("LRU Operations");

    {
        let mut cache = filled_lru(CACHE_SIZE);

        group.bench_function("get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.push(i % CACHE_SIZE, i));
                }
            });
        });

        group.bench_function("peek", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.peek(&(i % CACHE_SIZE)));
                }
            });
        });
    }

    {
        // Every put brings a new key, so every put evicts
        let mut cache = filled_lru(CACHE_SIZE);
        let mut next_key = CACHE_SIZE;

        group.bench_function("put with eviction", |b| {
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.push(next_key, next_key));
                    next_key += 1;
                }
            });
        });
    }

    group.bench_function("erase and refill", |b| {
        b.iter_batched(
            || filled_lru(CACHE_SIZE),
            |mut cache| {
                for i in (0..CACHE_SIZE).step_by(2) {
                    black_box(cache.erase(&i));
                }
                for i in 0..CACHE_SIZE / 2 {
                    cache.put(CACHE_SIZE + i, i);
                }
                cache
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

pub fn workload_benchmark(c: &mut Criterion) {
    let keys = skewed_keys(NUM_OPERATIONS, 42);
    let mut group = c.benchmark_group("LRU Workload");

    for cap in [CACHE_SIZE / 10, CACHE_SIZE, CACHE_SIZE * 10] {
        group.bench_with_input(BenchmarkId::new("get or put", cap), &cap, |b, &cap| {
            b.iter_batched(
                || make_lru::<usize, usize>(cap),
                |mut cache| {
                    for &key in &keys {
                        if cache.get(&key).is_none() {
                            cache.put(key, key);
                        }
                    }
                    cache
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark, workload_benchmark);
criterion_main!(benches);
