//! Estimation benchmarks comparing the oracle-direct and regression strategies.
//!
//! Run with: `cargo bench --package arprice-bench`

use arprice_bench::{bench_oracle, linear_samples, upload_sizes};
use arprice_lib::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

fn regression_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression");

    for count in [3u64, 16, 256] {
        let samples = linear_samples(count);
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("fit", count), &samples, |b, samples| {
            b.iter(|| PriceRegression::new(black_box(samples.clone())).unwrap());
        });
    }

    let regression = PriceRegression::new(linear_samples(3)).unwrap();
    group.throughput(Throughput::Elements(1));
    group.bench_function("predict", |b| {
        b.iter(|| regression.predicted_price_for_byte_count(black_box(ByteCount::new(123_456_789))));
    });
    group.bench_function("invert", |b| {
        b.iter(|| {
            regression
                .byte_count_for_winston(black_box(Winston::new(987_654_321_000)))
                .unwrap()
        });
    });

    group.finish();
}

fn estimator_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let sizes = upload_sizes(100);

    let mut group = c.benchmark_group("estimator");
    group.throughput(Throughput::Elements(sizes.len() as u64));

    for strategy in EstimatorStrategy::all() {
        let estimator = rt.block_on(async {
            let estimator =
                build_estimator(*strategy, Arc::new(bench_oracle()), RegressionConfig::default())
                    .unwrap();
            // Fit before measuring so the regression strategy is measured warm
            estimator
                .base_winston_price_for_byte_count(ByteCount::ZERO)
                .await
                .unwrap();
            estimator
        });

        group.bench_function(BenchmarkId::new("price_upload", strategy), |b| {
            b.to_async(&rt).iter(|| async {
                for &size in &sizes {
                    black_box(
                        estimator
                            .base_winston_price_for_byte_count(size)
                            .await
                            .unwrap(),
                    );
                }
            });
        });

        group.bench_function(BenchmarkId::new("capacity", strategy), |b| {
            b.to_async(&rt).iter(|| async {
                estimator
                    .byte_count_for_winston(black_box(Winston::new(1_000_000_000_000)))
                    .await
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, regression_benchmark, estimator_benchmark);
criterion_main!(benches);
