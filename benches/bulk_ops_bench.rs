//! Bulk byte operation benchmarks
//!
//! Covers:
//! 1. Pattern search per algorithm across needle lengths
//! 2. Bitwise XOR, sequential vs. parallel fan-out
//! 3. Tiered equality against `==` on slices
//! 4. Block-doubling fill against `slice::fill`

use bulkbytes::config::BulkOpsConfig;
use bulkbytes::string::{PatternSearcher, SearchAlgorithm};
use bulkbytes::{BitwiseTransformEngine, EqualityEngine, FillEngine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Reproducible pseudo-random data
fn generate_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| ((i * 17 + 13) % 251) as u8).collect()
}

fn bench_pattern_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pattern Search");
    let mut haystack = generate_test_data(64 * 1024);
    let searcher = PatternSearcher::new();

    for needle_len in [4usize, 16, 64, 200] {
        let needle: Vec<u8> = (0..needle_len).map(|i| (i % 7) as u8 + 0xF0).collect();
        let tail = haystack.len() - needle_len;
        haystack[tail..].copy_from_slice(&needle);
        group.throughput(Throughput::Bytes(haystack.len() as u64));

        for algorithm in [SearchAlgorithm::Naive, SearchAlgorithm::Bndm, SearchAlgorithm::BoyerMoore] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), needle_len),
                &needle,
                |b, needle| {
                    b.iter(|| searcher.search_with(algorithm, black_box(&haystack), black_box(needle), 0))
                },
            );
        }
    }
    group.finish();
}

fn bench_bitwise_xor(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bitwise XOR");
    let sequential = BitwiseTransformEngine::with_config(BulkOpsConfig::sequential())
        .expect("valid config");
    let parallel = BitwiseTransformEngine::new();

    for size in [64usize, 4096, 64 * 1024, 4 * 1024 * 1024] {
        let operand = generate_test_data(size);
        let mut source = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| sequential.xor(black_box(&mut source), black_box(&operand)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| parallel.xor(black_box(&mut source), black_box(&operand)))
        });
    }
    group.finish();
}

fn bench_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sequence Equal");
    let engine = EqualityEngine::new();

    for size in [16usize, 300, 4096, 1024 * 1024] {
        let a = generate_test_data(size);
        let b = a.clone();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("tiered", size), &size, |bench, _| {
            bench.iter(|| engine.equals(black_box(&a), black_box(&b)))
        });
        group.bench_with_input(BenchmarkId::new("std", size), &size, |bench, _| {
            bench.iter(|| black_box(&a) == black_box(&b))
        });
    }
    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("Fill");
    let engine = FillEngine::new();

    for size in [64usize, 4096, 1024 * 1024] {
        let mut buffer = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("doubling_u32", size), &size, |b, _| {
            b.iter(|| engine.fill(black_box(&mut buffer), 0xDEAD_BEEFu32))
        });
        group.bench_with_input(BenchmarkId::new("std_u8", size), &size, |b, _| {
            b.iter(|| black_box(&mut buffer).fill(0xAB))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pattern_search, bench_bitwise_xor, bench_equality, bench_fill);
criterion_main!(benches);
