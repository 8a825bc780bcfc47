// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides logging setup, profile builders, synthetic survey data, and a fixed regressor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::cast_precision_loss
)]
//! Shared test utilities for `macrofit`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use std::path::Path;
use std::sync::Once;

use macrofit::config::training::TrainingConfig;
use macrofit::constants::model_contract::{FEATURE_COUNT, TARGET_COUNT};
use macrofit::constants::survey_columns::{
    AGE, CALORIES, CARBS, FAT, HEIGHT, PROTEIN, SEQN, SEX, WEIGHT,
};
use macrofit::constants::survey_files;
use macrofit::models::{
    ActivityLevel, BiologicalSex, FeatureVector, FitnessGoal, ProfileRequest, RawPrediction,
    UserProfile,
};
use macrofit::prediction::MacroRegressor;
use macrofit::training::cleaning::CleanRecord;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; tests stay quiet by default
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        // A subscriber may already be installed by another helper in this binary
        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Profiles
// ============================================================================

/// 30 year old female, 62 kg, 168 cm, sedentary, maintain
pub fn sample_profile() -> UserProfile {
    UserProfile {
        age: 30,
        sex: BiologicalSex::Female,
        weight_kg: 62.0,
        height_cm: 168.0,
        activity_level: ActivityLevel::Sedentary,
        fitness_goal: FitnessGoal::Maintain,
    }
}

/// Profile with the given activity level and goal
pub fn profile_with(activity_level: ActivityLevel, fitness_goal: FitnessGoal) -> UserProfile {
    UserProfile {
        activity_level,
        fitness_goal,
        ..sample_profile()
    }
}

/// String-typed request as the serving layer would send it
pub fn sample_request(activity_level: &str, fitness_goal: &str) -> ProfileRequest {
    ProfileRequest {
        age: 30,
        sex: "female".to_owned(),
        weight_kg: 62.0,
        height_cm: 168.0,
        activity_level: activity_level.to_owned(),
        fitness_goal: fitness_goal.to_owned(),
    }
}

// ============================================================================
// Regressor stub
// ============================================================================

/// Regressor returning the same raw prediction for every input
pub struct FixedRegressor {
    pub output: [f64; TARGET_COUNT],
}

impl FixedRegressor {
    pub const fn new(output: [f64; TARGET_COUNT]) -> Self {
        Self { output }
    }
}

impl MacroRegressor for FixedRegressor {
    fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    fn n_outputs(&self) -> usize {
        TARGET_COUNT
    }

    fn predict(&self, _features: &FeatureVector) -> RawPrediction {
        RawPrediction(self.output)
    }
}

// ============================================================================
// Survey data
// ============================================================================

/// Deterministic cleaned rows with calories inside the default filter window
pub fn synthetic_records(count: usize) -> Vec<CleanRecord> {
    (0..count)
        .map(|index| {
            let age = 20.0 + ((index * 7) % 50) as f64;
            let sex_code = if index % 2 == 0 { 1.0 } else { 2.0 };
            let weight_kg = 55.0 + ((index * 13) % 40) as f64;
            let height_cm = 155.0 + ((index * 11) % 35) as f64;
            let calories = 1200.0 + weight_kg * 20.0 + (2.0 - sex_code) * 300.0 - age * 5.0;
            CleanRecord {
                age,
                sex_code,
                weight_kg,
                height_cm,
                calories,
                protein_g: weight_kg * 1.2,
                carbs_g: calories * 0.5 / 4.0,
                fat_g: calories * 0.3 / 9.0,
                activity_minutes: None,
            }
        })
        .collect()
}

/// Small and fast training configuration
pub fn quick_training_config() -> TrainingConfig {
    TrainingConfig {
        test_fraction: 0.2,
        cv_folds: 2,
        cross_val_folds: 0,
        n_estimators_grid: vec![5],
        max_depth_grid: vec![Some(4)],
        ..TrainingConfig::default()
    }
}

fn write_table(path: &Path, header: &[&str], rows: impl Iterator<Item = Vec<String>>) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    writer.write_record(header).unwrap();
    for row in rows {
        writer.write_record(&row).unwrap();
    }
    writer.flush().unwrap();
}

/// Write `DEMO_J.csv`, `BMX_J.csv`, and `DR1TOT_J.csv` for `records` into `dir`
///
/// Participant ids start at 1000 and follow record order.
pub fn write_raw_survey(dir: &Path, records: &[CleanRecord]) {
    let seqn = |index: usize| (1000 + index).to_string();

    write_table(
        &dir.join(survey_files::DEMOGRAPHICS),
        &[SEQN, AGE, SEX],
        records
            .iter()
            .enumerate()
            .map(|(i, r)| vec![seqn(i), r.age.to_string(), r.sex_code.to_string()]),
    );
    write_table(
        &dir.join(survey_files::BODY_MEASURES),
        &[SEQN, WEIGHT, HEIGHT],
        records
            .iter()
            .enumerate()
            .map(|(i, r)| vec![seqn(i), r.weight_kg.to_string(), r.height_cm.to_string()]),
    );
    write_table(
        &dir.join(survey_files::DIETARY_TOTALS),
        &[SEQN, CALORIES, PROTEIN, CARBS, FAT],
        records.iter().enumerate().map(|(i, r)| {
            vec![
                seqn(i),
                r.calories.to_string(),
                r.protein_g.to_string(),
                r.carbs_g.to_string(),
                r.fat_g.to_string(),
            ]
        }),
    );
}
