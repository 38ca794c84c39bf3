//! Benchmark for the array utilities.
//!
//! Measures `flatten` on deep and wide inputs, and `range` against a plain
//! iterator collect.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use utilbelt::array::{flatten, range};
use utilbelt::{Value, array};

fn nested(depth: usize) -> Value {
    let mut value = array![depth];
    for level in (0..depth).rev() {
        value = array![level, value];
    }
    value
}

// =============================================================================
// flatten Benchmark
// =============================================================================

fn benchmark_flatten_deep(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("flatten_deep");

    for depth in [10, 100, 1000] {
        let input = nested(depth);

        group.bench_with_input(BenchmarkId::new("deep", depth), &input, |bencher, input| {
            bencher.iter(|| black_box(flatten(black_box(input), false)));
        });

        group.bench_with_input(BenchmarkId::new("shallow", depth), &input, |bencher, input| {
            bencher.iter(|| black_box(flatten(black_box(input), true)));
        });
    }

    group.finish();
}

fn benchmark_flatten_wide(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("flatten_wide");

    for size in [100, 1000, 10000] {
        let input = Value::array((0..size).map(|index| array![index, array![index]]));

        group.bench_with_input(BenchmarkId::new("deep", size), &input, |bencher, input| {
            bencher.iter(|| black_box(flatten(black_box(input), false)));
        });
    }

    group.finish();
}

// =============================================================================
// range Benchmark
// =============================================================================

fn benchmark_range(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("range");

    for size in [100, 1000, 10000] {
        let stop = f64::from(size);

        group.bench_with_input(BenchmarkId::new("range", size), &stop, |bencher, &stop| {
            bencher.iter(|| black_box(range(0.0, Some(black_box(stop)), None)));
        });

        group.bench_with_input(BenchmarkId::new("Iterator", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let collected: Vec<f64> = (0..black_box(size)).map(f64::from).collect();
                black_box(collected)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_flatten_deep,
    benchmark_flatten_wide,
    benchmark_range
);
criterion_main!(benches);
