//! Estimation benchmarks.
//!
//! Run with: `cargo bench --package promoreach-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use promoreach_bench::{budget_sweep, scenarios};
use promoreach_estimate::{MemoizedEstimator, ReachEstimator};
use promoreach_format::{CsvFormatter, EstimateRecord, Formatter, JsonFormatter};
use std::hint::black_box;

fn estimate_benchmark(c: &mut Criterion) {
    let estimator = ReachEstimator::default();
    let mut group = c.benchmark_group("estimate");

    for scenario in scenarios() {
        group.bench_with_input(
            BenchmarkId::from_parameter(scenario.name),
            &scenario.config,
            |b, config| b.iter(|| estimator.estimate(black_box(config))),
        );
    }

    group.finish();
}

fn memo_benchmark(c: &mut Criterion) {
    let configs = budget_sweep(64);
    let mut group = c.benchmark_group("sweep");
    group.throughput(Throughput::Elements(configs.len() as u64));

    let plain = ReachEstimator::default();
    group.bench_function("plain", |b| {
        b.iter(|| {
            for config in &configs {
                black_box(plain.estimate(black_box(config)));
            }
        });
    });

    let memo = MemoizedEstimator::new(ReachEstimator::default(), configs.len());
    group.bench_function("memoized", |b| {
        b.iter(|| {
            for config in &configs {
                black_box(memo.estimate(black_box(config)));
            }
        });
    });

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let estimator = ReachEstimator::default();
    let records: Vec<_> = budget_sweep(256)
        .iter()
        .map(|config| EstimateRecord::new("sweep", config, estimator.estimate(config)))
        .collect();

    let mut group = c.benchmark_group("format");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("csv", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(32 * 1024);
            CsvFormatter::new()
                .write_estimates(black_box(&records), &mut out)
                .unwrap();
            out
        });
    });

    group.bench_function("ndjson", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(64 * 1024);
            JsonFormatter::ndjson()
                .write_estimates(black_box(&records), &mut out)
                .unwrap();
            out
        });
    });

    group.finish();
}

criterion_group!(benches, estimate_benchmark, memo_benchmark, format_benchmark);
criterion_main!(benches);
