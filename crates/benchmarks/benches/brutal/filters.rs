//! # Filter Brutal Benchmarks
//!
//! Claims to validate:
//! - Insert: k chained hash computations + k slot updates
//! - Query: at most k hash computations, stops at the first empty slot
//! - Delete (counting): one query + k counter decrements
//! - Layout derivation: < 1μs
//!
//! Brutal Conditions:
//! - 1,000,000 element capacity at 1% (the reference sizing)
//! - Adversarial keys sharing a 16-byte prefix
//! - Counting filter driven into saturation

use bloom_benchmarks::utils::{generate_addresses, generate_adversarial_addresses};
use bloom_filters::domain::{BIT_SLOT_WIDTH, COUNTER_SLOT_WIDTH};
use bloom_filters::{
    BasicBloomFilter, CountingBloomFilter, DeletableFilter, FilterConfig, MembershipFilter,
    PartitionedBloomFilter,
};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

pub fn brutal_insert_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/insert");
    group.measurement_time(Duration::from_secs(10));

    // Insert cost is linear in k
    for k in [3u32, 7, 13, 20] {
        group.bench_with_input(BenchmarkId::new("single_insert", k), &k, |b, &k| {
            let mut filter: BasicBloomFilter = BasicBloomFilter::with_layout(1 << 20, k).unwrap();
            let addr = generate_addresses(1).remove(0);
            b.iter(|| black_box(filter.insert(black_box(&addr))));
        });
    }

    let addresses = generate_addresses(10_000);
    group.throughput(Throughput::Elements(addresses.len() as u64));

    group.bench_function("bulk_insert_basic_10000", |b| {
        b.iter(|| {
            let mut filter: BasicBloomFilter =
                BasicBloomFilter::with_capacity(10_000, 0.01).unwrap();
            for addr in &addresses {
                filter.insert(black_box(addr));
            }
            black_box(filter.bits_set())
        });
    });

    group.bench_function("bulk_insert_counting_10000", |b| {
        b.iter(|| {
            let mut filter: CountingBloomFilter =
                CountingBloomFilter::with_capacity(10_000, 0.01).unwrap();
            for addr in &addresses {
                filter.insert(black_box(addr));
            }
            black_box(filter.element_count())
        });
    });

    group.bench_function("bulk_insert_partitioned_10000", |b| {
        b.iter(|| {
            let mut filter: PartitionedBloomFilter =
                PartitionedBloomFilter::with_capacity(10_000, 0.01).unwrap();
            for addr in &addresses {
                filter.insert(black_box(addr));
            }
            black_box(filter.bits_set())
        });
    });

    let adversarial = generate_adversarial_addresses(10_000);
    group.bench_function("adversarial_insert_shared_prefix", |b| {
        b.iter(|| {
            let mut filter: BasicBloomFilter =
                BasicBloomFilter::with_capacity(10_000, 0.01).unwrap();
            for addr in &adversarial {
                filter.insert(black_box(addr));
            }
            black_box(filter.bits_set())
        });
    });

    group.finish();
}

pub fn brutal_query_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/may_contain");
    group.measurement_time(Duration::from_secs(10));

    let addresses = generate_addresses(100_000);
    let mut filter: BasicBloomFilter = BasicBloomFilter::with_capacity(1_000_000, 0.01).unwrap();
    for addr in &addresses {
        filter.insert(addr);
    }

    // Present keys walk all k rounds
    group.bench_function("contains_existing_element", |b| {
        let target = &addresses[50];
        b.iter(|| black_box(filter.may_contain(black_box(target))))
    });

    // Absent keys usually stop after the first round or two
    group.bench_function("contains_non_existing_element", |b| {
        let absent = generate_addresses(1).remove(0);
        b.iter(|| black_box(filter.may_contain(black_box(&absent))))
    });

    let probes = generate_addresses(10_000);
    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("bulk_contains_10000", |b| {
        b.iter(|| {
            let matches = probes
                .iter()
                .filter(|addr| filter.may_contain(black_box(*addr)))
                .count();
            black_box(matches)
        });
    });

    group.finish();
}

pub fn brutal_delete_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/delete");
    group.measurement_time(Duration::from_secs(10));

    let addresses = generate_addresses(1000);
    group.throughput(Throughput::Elements(addresses.len() as u64));

    group.bench_function("insert_then_delete_1000", |b| {
        let mut filter: CountingBloomFilter =
            CountingBloomFilter::with_capacity(1000, 0.01).unwrap();
        b.iter(|| {
            for addr in &addresses {
                filter.insert(black_box(addr));
            }
            for addr in &addresses {
                filter.delete(black_box(addr));
            }
            black_box(filter.element_count())
        });
    });

    // Every counter starts at 15, so increments saturate
    group.bench_function("saturated_counters", |b| {
        let mut filter: CountingBloomFilter = CountingBloomFilter::with_layout(64, 7).unwrap();
        filter.bitmap_mut().fill(0xFF);
        b.iter(|| {
            for addr in &addresses {
                filter.delete(black_box(addr));
                filter.insert(black_box(addr));
            }
            black_box(filter.element_count())
        });
    });

    group.finish();
}

pub fn brutal_layout_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/layout");
    group.measurement_time(Duration::from_secs(5));

    for (name, width) in [("bits", BIT_SLOT_WIDTH), ("counters", COUNTER_SLOT_WIDTH)] {
        group.bench_with_input(
            BenchmarkId::new("from_capacity_claim_1us", name),
            &width,
            |b, &width| {
                b.iter(|| {
                    black_box(FilterConfig::from_capacity(
                        black_box(1_000_000),
                        black_box(0.01),
                        width,
                    ))
                })
            },
        );
    }

    let mut filter: BasicBloomFilter = BasicBloomFilter::with_capacity(100_000, 0.01).unwrap();
    for addr in &generate_addresses(50_000) {
        filter.insert(addr);
    }
    group.bench_function("estimated_fpr_populated", |b| {
        b.iter(|| black_box(filter.estimated_false_positive_rate()))
    });

    group.finish();
}

pub fn brutal_bitmap_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/bitmap_transfer");
    group.measurement_time(Duration::from_secs(10));

    let mut source: BasicBloomFilter = BasicBloomFilter::with_capacity(1_000_000, 0.01).unwrap();
    for addr in &generate_addresses(10_000) {
        source.insert(addr);
    }
    let snapshot = source.bitmap().to_vec();

    group.throughput(Throughput::Bytes(snapshot.len() as u64));
    group.bench_function("load_bitmap_1m_capacity", |b| {
        let mut target: BasicBloomFilter =
            BasicBloomFilter::with_capacity(1_000_000, 0.01).unwrap();
        b.iter(|| black_box(target.load_bitmap(black_box(&snapshot))))
    });

    group.bench_function("clear_1m_capacity", |b| {
        b.iter(|| {
            source.clear();
            black_box(source.element_count())
        })
    });

    group.finish();
}

pub fn brutal_false_positive_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom/brutal/fpr_validation");
    group.measurement_time(Duration::from_secs(20));

    for &target_fpr in &[0.01, 0.001, 0.0001] {
        group.bench_with_input(
            BenchmarkId::new("validate_fpr_bound", format!("{:.4}", target_fpr)),
            &target_fpr,
            |b, &fpr| {
                b.iter(|| {
                    let n = 1000;
                    let mut filter: BasicBloomFilter =
                        BasicBloomFilter::with_capacity(n, fpr).unwrap();
                    for i in 0..n {
                        filter.insert(format!("inserted_{}", i).as_bytes());
                    }

                    let false_positives = (0..10_000)
                        .filter(|i| filter.may_contain(format!("not_inserted_{}", i).as_bytes()))
                        .count();

                    let actual_fpr = false_positives as f64 / 10_000.0;
                    black_box(actual_fpr <= fpr * 1.5)
                });
            },
        );
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    brutal_insert_operations(c);
    brutal_query_operations(c);
    brutal_delete_operations(c);
    brutal_layout_derivation(c);
    brutal_bitmap_transfer(c);
    brutal_false_positive_validation(c);
}
