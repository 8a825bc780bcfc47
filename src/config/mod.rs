// ABOUTME: Configuration module root for environment settings, training settings, and adjustment tables
// ABOUTME: Re-exports the configuration types used by the CLI, pipeline, and predictor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `MACROFIT_*` environment loading
pub mod environment;
/// Activity and goal adjustment tables
pub mod nutrition;
/// Training pipeline settings
pub mod training;

pub use environment::{MacrofitConfig, PathsConfig};
pub use nutrition::{ActivityFactorsConfig, AdjustmentTables, GoalAdjustmentConfig, GoalFactors};
pub use training::{CalorieRange, TrainingConfig};
