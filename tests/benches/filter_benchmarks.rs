//! # Bloom Bitmap Benchmarks
//!
//! | Operation | Backend | Round trips |
//! |-----------|---------|-------------|
//! | hash derivation | - | 0 |
//! | add / test | LocalBitmap | 0 |
//! | add / test | RemoteBitmap + InMemoryBitStore | 1 transaction |

use bloom_bitmap::{
    locations, BloomFilter, InMemoryBitStore, LocalBitmap, RemoteBitmap, RemoteBitmapConfig,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_hash_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash-derivation");
    let item = b"https://example.com/some/long/path?query=1";

    for k in [1u32, 4, 7, 16] {
        group.throughput(Throughput::Elements(k as u64));
        group.bench_with_input(BenchmarkId::new("locations", k), &k, |b, &k| {
            b.iter(|| black_box(locations(black_box(item), k, 1 << 32)))
        });
    }
    group.finish();
}

fn bench_local_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("local-bitmap");
    let mut filter = BloomFilter::new(1 << 20, 7, LocalBitmap::new()).unwrap();
    for i in 0..10_000 {
        filter.add_str(&format!("item_{}", i)).unwrap();
    }

    group.bench_function("add", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            filter.add(black_box(&i.to_le_bytes())).unwrap()
        })
    });
    group.bench_function("test_hit", |b| {
        b.iter(|| black_box(filter.test_str(black_box("item_42")).unwrap()))
    });
    group.bench_function("test_miss", |b| {
        b.iter(|| black_box(filter.test_str(black_box("absent")).unwrap()))
    });
    group.finish();
}

fn bench_shared_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("remote-bitmap-in-memory");
    let store = InMemoryBitStore::new();
    let config = RemoteBitmapConfig::new("memory", "bench").with_remove_key_if_exists(true);
    let mut filter = BloomFilter::new(1 << 20, 7, RemoteBitmap::new(config, store)).unwrap();

    group.bench_function("add", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            filter.add(black_box(&i.to_le_bytes())).unwrap()
        })
    });
    group.bench_function("test", |b| {
        b.iter(|| black_box(filter.test_str(black_box("item_42")).unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_hash_derivation,
    bench_local_filter,
    bench_shared_filter
);
criterion_main!(benches);
