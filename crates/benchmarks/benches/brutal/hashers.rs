//! # Hasher Brutal Benchmarks
//!
//! Raw mixing cost of each `SeedHasher` adapter, and the cost of a full
//! chained probe sequence at the reference k = 7.

use bloom_filters::domain::probe_positions;
use bloom_filters::{Murmur3, Murmur64A, SeedHasher, SipHash13};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn bench_mix<H: SeedHasher>(c: &mut Criterion, name: &str, hasher: H) {
    let mut group = c.benchmark_group(format!("hashers/brutal/{}", name));
    group.measurement_time(Duration::from_secs(5));

    for len in [4usize, 20, 64, 1024] {
        let key = vec![0xA5u8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("mix", len), &key, |b, key| {
            b.iter(|| black_box(hasher.mix(black_box(key), black_box(0x5eed))))
        });
    }

    group.throughput(Throughput::Elements(7));
    group.bench_function("probe_sequence_k7", |b| {
        let key = b"0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
        b.iter(|| black_box(probe_positions(&hasher, black_box(key), 7, 9_585_059)))
    });

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_mix(c, "murmur64a", Murmur64A);
    bench_mix(c, "murmur3", Murmur3);
    bench_mix(c, "siphash13", SipHash13);
}
