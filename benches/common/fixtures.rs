// ABOUTME: Benchmark fixtures generating survey rows, profiles, and fitted forests
// ABOUTME: Provides deterministic data generation for reproducible performance measurements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures.
//!
//! Provides deterministic data generation for reproducible performance measurements.

use macrofit::models::{ActivityLevel, BiologicalSex, CalorieTransform, FitnessGoal, UserProfile};
use macrofit::training::cleaning::to_dataset;
use macrofit::training::CleanRecord;
use macrofit_intelligence::{Dataset, ForestParams, MultiOutputForest, TreeParams};

/// Predefined dataset sizes for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum SurveySize {
    /// Small dataset (100 rows) - quick benchmarks
    Small,
    /// Medium dataset (1000 rows) - a fraction of one survey cycle
    Medium,
}

impl SurveySize {
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::Small => 100,
            Self::Medium => 1000,
        }
    }
}

/// Deterministic cleaned rows inside the default calorie window
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_records(size: SurveySize) -> Vec<CleanRecord> {
    (0..size.count())
        .map(|index| {
            let age = 18.0 + ((index * 7) % 60) as f64;
            let sex_code = if index % 2 == 0 { 1.0 } else { 2.0 };
            let weight_kg = 50.0 + ((index * 13) % 60) as f64;
            let height_cm = 150.0 + ((index * 11) % 45) as f64;
            let calories = 1100.0 + weight_kg * 22.0 + (2.0 - sex_code) * 350.0 - age * 6.0;
            CleanRecord {
                age,
                sex_code,
                weight_kg,
                height_cm,
                calories,
                protein_g: weight_kg * 1.3,
                carbs_g: calories * 0.5 / 4.0,
                fat_g: calories * 0.3 / 9.0,
                activity_minutes: None,
            }
        })
        .collect()
}

/// Fitting dataset with log calories
#[must_use]
pub fn generate_dataset(size: SurveySize) -> Dataset {
    match to_dataset(&generate_records(size), CalorieTransform::Log) {
        Ok(dataset) => dataset,
        Err(e) => panic!("benchmark dataset is invalid: {e}"),
    }
}

/// Forest parameters sized for benchmarks
#[must_use]
pub fn forest_params(n_estimators: usize, max_depth: Option<usize>) -> ForestParams {
    ForestParams {
        n_estimators,
        tree: TreeParams {
            max_depth,
            ..TreeParams::default()
        },
        ..ForestParams::default()
    }
}

/// Fitted forest over the small dataset
#[must_use]
pub fn fitted_forest(n_estimators: usize) -> MultiOutputForest {
    let dataset = generate_dataset(SurveySize::Small);
    match MultiOutputForest::fit(&dataset, &forest_params(n_estimators, Some(10))) {
        Ok(model) => model,
        Err(e) => panic!("benchmark forest failed to fit: {e}"),
    }
}

/// Profiles covering every activity level and goal
#[must_use]
pub fn generate_profiles(count: usize) -> Vec<UserProfile> {
    let goals = [
        FitnessGoal::LoseFat,
        FitnessGoal::Maintain,
        FitnessGoal::GainMuscle,
    ];
    (0..count)
        .map(|index| UserProfile {
            age: 18 + (index as u32 * 7) % 60,
            sex: if index % 2 == 0 {
                BiologicalSex::Male
            } else {
                BiologicalSex::Female
            },
            weight_kg: 50.0 + f64::from((index as u32 * 13) % 60),
            height_cm: 150.0 + f64::from((index as u32 * 11) % 45),
            activity_level: ActivityLevel::ALL[index % ActivityLevel::ALL.len()],
            fitness_goal: goals[index % goals.len()],
        })
        .collect()
}
