// ABOUTME: Criterion benchmarks for the macro prediction path and forest fitting
// ABOUTME: Measures single recommendations, batch throughput, and training cost by forest size
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for macro prediction.
//!
//! Measures per-request recommendation latency for several forest sizes,
//! batch throughput, and the cost of fitting one grid candidate.

#![allow(clippy::missing_docs_in_private_items, missing_docs, clippy::panic)]

mod common;

use common::fixtures::{
    fitted_forest, forest_params, generate_dataset, generate_profiles, SurveySize,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use macrofit::config::AdjustmentTables;
use macrofit::models::CalorieTransform;
use macrofit::prediction::{ForestRegressor, MacroPredictor};
use macrofit_intelligence::MultiOutputForest;

fn predictor(n_estimators: usize) -> MacroPredictor {
    let regressor = match ForestRegressor::new(fitted_forest(n_estimators)) {
        Ok(regressor) => regressor,
        Err(e) => panic!("benchmark forest does not fit the contract: {e}"),
    };
    MacroPredictor::new(
        Box::new(regressor),
        CalorieTransform::Log,
        AdjustmentTables::default(),
        "bench",
    )
}

/// Benchmark a single recommendation for growing forests
fn bench_single_recommendation(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let profile = generate_profiles(1)[0];

    for n_estimators in [10, 100, 200] {
        let predictor = predictor(n_estimators);
        group.bench_with_input(
            BenchmarkId::new("single_profile", n_estimators),
            &profile,
            |b, profile| b.iter(|| predictor.recommend(black_box(profile))),
        );
    }

    group.finish();
}

/// Benchmark recommendation throughput over a batch of profiles
#[allow(clippy::cast_possible_truncation)]
fn bench_batch_recommendations(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend_batch");
    let predictor = predictor(100);

    for count in [10, 100, 1000] {
        let profiles = generate_profiles(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("profiles", count),
            &profiles,
            |b, profiles| {
                b.iter(|| {
                    profiles
                        .iter()
                        .filter_map(|profile| predictor.recommend(black_box(profile)).ok())
                        .count()
                });
            },
        );
    }

    group.finish();
}

/// Benchmark fitting one grid candidate
fn bench_forest_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("forest_fit");
    group.sample_size(10);

    let dataset = generate_dataset(SurveySize::Medium);
    for max_depth in [Some(10), None] {
        let params = forest_params(20, max_depth);
        let label = max_depth.map_or_else(|| "unlimited".to_owned(), |d| d.to_string());
        group.bench_with_input(BenchmarkId::new("max_depth", label), &params, |b, params| {
            b.iter(|| MultiOutputForest::fit(black_box(&dataset), params));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_recommendation,
    bench_batch_recommendations,
    bench_forest_fit
);
criterion_main!(benches);
