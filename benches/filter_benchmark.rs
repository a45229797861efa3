//! Benchmark for filtering, summary metrics and chart series over synthetic listings
//!
//! Run with: cargo bench --bench filter_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use cardash::pipeline::{apply, Dataset, FilterDomain, SchemaProfile};
use cardash::report::{scatter_points, Histogram, DEFAULT_BINS};

const MANUFACTURERS: [&str; 6] = ["ford", "toyota", "honda", "chevrolet", "nissan", "bmw"];

/// Generate a vehicles table with a few null prices mixed in
fn generate_listings(n_rows: usize, seed: u64) -> Dataset {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let price: Vec<Option<f64>> = (0..n_rows)
        .map(|_| {
            if rng.gen::<f64>() < 0.02 {
                None
            } else {
                // Right-skewed like real listing prices
                let v = rng.gen::<f64>();
                Some((v * v * 60_000.0).round())
            }
        })
        .collect();
    let model_year: Vec<i64> = (0..n_rows).map(|_| rng.gen_range(1990..=2019)).collect();
    let manufacturer: Vec<&str> = (0..n_rows)
        .map(|_| MANUFACTURERS[rng.gen_range(0..MANUFACTURERS.len())])
        .collect();
    let model: Vec<String> = manufacturer
        .iter()
        .map(|m| format!("{}-{}", m, rng.gen_range(0..8)))
        .collect();

    let df = DataFrame::new(vec![
        Column::new("price".into(), price),
        Column::new("model_year".into(), model_year),
        Column::new("model".into(), model),
        Column::new("manufacturer".into(), manufacturer),
    ])
    .expect("Failed to create DataFrame");

    Dataset::from_frame(df, SchemaProfile::Vehicles.mapping()).expect("Failed to build dataset")
}

/// Default selection (every category and label) for varying dataset sizes
fn benchmark_apply_default_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_default_selection");

    for n_rows in [10_000, 50_000, 100_000] {
        let dataset = generate_listings(n_rows, 42);
        let domain = FilterDomain::from_dataset(&dataset).expect("Failed to derive domain");
        let spec = domain.default_selection().to_spec(&dataset);
        group.throughput(Throughput::Elements(n_rows as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &dataset, |b, dataset| {
            b.iter(|| {
                let _ = apply(black_box(dataset), black_box(&spec));
            });
        });
    }

    group.finish();
}

/// Narrow categorical selections exercise the label filter
fn benchmark_apply_narrow_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_narrow_selection");

    let dataset = generate_listings(50_000, 7);
    let domain = FilterDomain::from_dataset(&dataset).expect("Failed to derive domain");

    for n_categories in [1, 3, 6] {
        let mut selection = domain.default_selection();
        selection.set_categories(&domain, MANUFACTURERS.iter().take(n_categories).copied());
        let spec = selection.to_spec(&dataset);

        group.bench_with_input(
            BenchmarkId::new("categories", n_categories),
            &spec,
            |b, spec| {
                b.iter(|| {
                    let _ = apply(black_box(&dataset), black_box(spec));
                });
            },
        );
    }

    group.finish();
}

/// Chart series built from an already-filtered frame
fn benchmark_chart_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_series");

    let dataset = generate_listings(50_000, 11);
    let mapping = dataset.mapping().clone();

    group.bench_function("histogram", |b| {
        b.iter(|| {
            let _ = Histogram::from_frame(black_box(dataset.frame()), &mapping, DEFAULT_BINS);
        });
    });

    group.bench_function("scatter", |b| {
        b.iter(|| {
            let _ = scatter_points(black_box(dataset.frame()), &mapping);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_apply_default_selection,
    benchmark_apply_narrow_selection,
    benchmark_chart_series
);
criterion_main!(benches);
