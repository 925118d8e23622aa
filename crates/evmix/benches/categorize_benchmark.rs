use std::collections::HashMap;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evmix::MixingBinning;

fn make_binning(n_axes: usize) -> MixingBinning {
    let mut b = MixingBinning::builder();
    for id in 0..n_axes {
        let edges: Vec<f64> = (0..=10).map(|i| i as f64 * 10.0).collect();
        b.add_variable(id, edges);
    }
    b.build().unwrap()
}

fn make_columns(n_axes: usize, n_events: usize) -> HashMap<usize, Vec<f64>> {
    // Deterministic values covering the range plus some overflow.
    (0..n_axes)
        .map(|id| {
            let col = (0..n_events).map(|i| ((i * 37 + id * 11) % 105) as f64 + 0.25).collect();
            (id, col)
        })
        .collect()
}

fn bench_find_category(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_category");

    for n_axes in [1usize, 3, 6] {
        let binning = make_binning(n_axes);
        let values: Vec<f64> = (0..n_axes).map(|i| 12.5 + i as f64 * 7.0).collect();
        group.bench_with_input(BenchmarkId::new("single_event", n_axes), &n_axes, |b, _| {
            b.iter(|| black_box(binning.find_category(black_box(&values))))
        });
    }

    group.finish();
}

fn bench_categorize_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorize_columns");

    for n_events in [1_000usize, 100_000] {
        let binning = make_binning(4);
        let cols = make_columns(4, n_events);
        group.bench_with_input(BenchmarkId::new("4_axes", n_events), &n_events, |b, _| {
            b.iter(|| black_box(binning.categorize_columns(black_box(&cols)).unwrap()))
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let binning = make_binning(4);
    let total = binning.total_categories();
    c.bench_function("bins_from_category_all", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            for cat in 0..total {
                acc += binning.bins_from_category(cat).map(|v| v[0]).unwrap_or(0);
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_find_category, bench_categorize_columns, bench_decode);
criterion_main!(benches);
