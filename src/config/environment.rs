// ABOUTME: Environment-based configuration for the Macrofit CLI and embedding services
// ABOUTME: Reads MACROFIT_* variables with defaults, validates them, and renders a summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment configuration
//!
//! Every setting has a default so a bare environment yields a working
//! configuration. Values that are present but unparsable are errors, never
//! silently replaced by defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use macrofit_core::constants::{paths, training_defaults};
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::CalorieTransform;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::nutrition::AdjustmentTables;
use super::training::{parse_depth_list, parse_list, CalorieRange, TrainingConfig};

/// File system locations used by training and serving
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Trained artifact (JSON)
    pub artifact_path: PathBuf,
    /// Directory holding the raw survey CSV extracts
    pub raw_data_dir: PathBuf,
    /// Cleaned dataset CSV
    pub cleaned_data_path: PathBuf,
    /// Directory for evaluation reports
    pub report_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from(paths::DEFAULT_ARTIFACT_PATH),
            raw_data_dir: PathBuf::from(paths::DEFAULT_RAW_DATA_DIR),
            cleaned_data_path: PathBuf::from(paths::DEFAULT_CLEANED_DATA_PATH),
            report_dir: PathBuf::from(paths::DEFAULT_REPORT_DIR),
        }
    }
}

/// Complete Macrofit configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MacrofitConfig {
    /// File locations
    pub paths: PathsConfig,
    /// Training run settings
    pub training: TrainingConfig,
    /// Post-processing tables
    pub adjustments: AdjustmentTables,
}

impl MacrofitConfig {
    /// Load configuration from `MACROFIT_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if a variable is set to an unparsable value or
    /// the resulting configuration fails validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let calorie_filter =
            CalorieRange::parse_filter(&env_var_or("MACROFIT_CALORIE_FILTER", "1000,4500"))?;
        let log_calories: bool = parse_env("MACROFIT_LOG_CALORIES", "true")?;

        let config = Self {
            paths: PathsConfig {
                artifact_path: PathBuf::from(env_var_or(
                    "MACROFIT_ARTIFACT_PATH",
                    paths::DEFAULT_ARTIFACT_PATH,
                )),
                raw_data_dir: PathBuf::from(env_var_or(
                    "MACROFIT_RAW_DATA_DIR",
                    paths::DEFAULT_RAW_DATA_DIR,
                )),
                cleaned_data_path: PathBuf::from(env_var_or(
                    "MACROFIT_CLEANED_DATA_PATH",
                    paths::DEFAULT_CLEANED_DATA_PATH,
                )),
                report_dir: PathBuf::from(env_var_or(
                    "MACROFIT_REPORT_DIR",
                    paths::DEFAULT_REPORT_DIR,
                )),
            },
            training: TrainingConfig {
                seed: parse_env("MACROFIT_SEED", &training_defaults::SEED.to_string())?,
                test_fraction: parse_env(
                    "MACROFIT_TEST_FRACTION",
                    &training_defaults::TEST_FRACTION.to_string(),
                )?,
                cv_folds: parse_env(
                    "MACROFIT_CV_FOLDS",
                    &training_defaults::GRID_SEARCH_FOLDS.to_string(),
                )?,
                cross_val_folds: parse_env(
                    "MACROFIT_CROSS_VAL_FOLDS",
                    &training_defaults::CROSS_VALIDATION_FOLDS.to_string(),
                )?,
                calorie_transform: if log_calories {
                    CalorieTransform::Log
                } else {
                    CalorieTransform::Identity
                },
                calorie_filter,
                n_estimators_grid: parse_list(&env_var_or("MACROFIT_N_ESTIMATORS_GRID", "100,200"))?,
                max_depth_grid: parse_depth_list(&env_var_or(
                    "MACROFIT_MAX_DEPTH_GRID",
                    "none,10,20",
                ))?,
                ..TrainingConfig::default()
            },
            adjustments: AdjustmentTables::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        self.training.validate()?;
        self.adjustments.validate()
    }

    /// Human-readable configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Macrofit Configuration:\n\
             - Artifact: {}\n\
             - Raw Data: {}\n\
             - Cleaned Data: {}\n\
             - Reports: {}\n\
             - Seed: {}\n\
             - Test Fraction: {}\n\
             - Grid Search Folds: {}\n\
             - Cross-Validation: {}\n\
             - Calorie Transform: {}\n\
             - Calorie Filter: {}",
            self.paths.artifact_path.display(),
            self.paths.raw_data_dir.display(),
            self.paths.cleaned_data_path.display(),
            self.paths.report_dir.display(),
            self.training.seed,
            self.training.test_fraction,
            self.training.cv_folds,
            if self.training.cross_val_folds == 0 {
                "Disabled".to_owned()
            } else {
                format!("{} folds", self.training.cross_val_folds)
            },
            self.training.calorie_transform,
            self.training
                .calorie_filter
                .map_or_else(|| "Disabled".to_owned(), |range| range.to_string()),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = env_var_or(key, default);
    raw.trim()
        .parse()
        .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}'")).with_source(e))
}
