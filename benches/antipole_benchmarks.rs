//! Benchmarks for antipole tree construction and nearest-vector queries

use antipole_index::core::indexing::vector::antipole::search::linear_scan_closest;
use antipole_index::{AntipoleTreeIndex, IndexConfig, VectorIndex};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const DIMENSION: usize = 32;

fn random_vectors(count: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| (0..DIMENSION).map(|_| rng.gen::<f32>()).collect()).collect()
}

fn built_index(count: usize, min_leaf_size: usize) -> AntipoleTreeIndex {
    let config = IndexConfig::builder().min_leaf_size(min_leaf_size).build().unwrap();
    let mut index = AntipoleTreeIndex::new("bench", config).unwrap();
    index.build(random_vectors(count, 7)).unwrap();
    index
}

/// Benchmark tree construction for growing inputs
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for count in [1_000_usize, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter_batched(
                || random_vectors(count, 7),
                |vectors| {
                    let config = IndexConfig::builder().min_leaf_size(32).build().unwrap();
                    let mut index = AntipoleTreeIndex::new("bench", config).unwrap();
                    index.build(vectors).unwrap();
                    black_box(index.len())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// Benchmark single queries against the tree and a linear scan
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    group.measurement_time(Duration::from_secs(10));

    let index = built_index(10_000, 32);
    let probes = random_vectors(100, 99);
    group.throughput(Throughput::Elements(probes.len() as u64));

    group.bench_function("antipole_tree", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(index.closest(probe).unwrap());
            }
        });
    });
    group.bench_function("linear_scan", |b| {
        b.iter(|| {
            for probe in &probes {
                black_box(linear_scan_closest(index.store(), probe));
            }
        });
    });
    group.bench_function("antipole_tree_batch", |b| {
        b.iter(|| black_box(index.closest_batch(&probes).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_query);
criterion_main!(benches);
