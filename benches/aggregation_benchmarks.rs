use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lamg_core::kernels::{affinity_matrix, aggregation_sweep, undecided_nodes, TestVectors};
use lamg_core::types::{AggregationStatus, Precision};
use lamg_core::SparseCsc;

/// A reproducible path graph with pseudo-random edge weights (a simple LCG,
/// not the `rand` crate, keeps benchmark runs deterministic across machines).
fn build_path_graph(n: usize, seed: u64) -> SparseCsc {
    let mut rng = seed;
    let mut triplets = Vec::with_capacity(2 * (n - 1));
    for i in 0..n - 1 {
        rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
        let w = 0.5 + ((rng >> 33) as f64 / u32::MAX as f64);
        triplets.push((i, i + 1, w));
        triplets.push((i + 1, i, w));
    }
    SparseCsc::from_triplets(n, n, &triplets)
}

fn build_test_vector(n: usize) -> Vec<Precision> {
    (0..n).map(|i| 1.0 + (i as Precision) * 0.01).collect()
}

fn row_sums(w: &SparseCsc) -> Vec<Precision> {
    let mut d = vec![0.0; w.n_rows];
    for j in 0..w.n_cols {
        let (rows, vals) = w.col(j);
        for (&i, &v) in rows.iter().zip(vals) {
            d[i] += v;
        }
    }
    d
}

fn bench_aggregation_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation_sweep");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for &size in &[64usize, 256, 1024] {
        let w = build_path_graph(size, 12345);
        let d = row_sums(&w);
        let x = vec![build_test_vector(size)];
        let test_vectors = TestVectors::new(size, &x).unwrap();
        let aff = affinity_matrix(&w, &test_vectors).unwrap();

        let is_open = vec![true; size];
        let candidates: Vec<usize> = (1..=size).collect();
        let bins = undecided_nodes(&w, &candidates, &is_open, 10).unwrap();

        let status = vec![AggregationStatus::Undecided; size];
        let aggregate_size = vec![0usize; size];

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                aggregation_sweep(
                    black_box(&bins),
                    black_box(&x),
                    black_box(&status),
                    black_box(&aggregate_size),
                    size,
                    black_box(&aff),
                    black_box(&d),
                    black_box(&w),
                    2.0,
                    0.5,
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregation_sweep);
criterion_main!(benches);
