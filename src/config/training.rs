// ABOUTME: Training pipeline settings: split, folds, calorie transform, outlier filter, search grid
// ABOUTME: Defaults mirror the reference training run and are validated before any data is read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use macrofit_core::constants::training_defaults;
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::CalorieTransform;
use serde::{Deserialize, Serialize};

/// Inclusive calorie window kept by the outlier filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieRange {
    /// Lowest plausible daily intake (kcal)
    pub min: f64,
    /// Highest plausible daily intake (kcal)
    pub max: f64,
}

impl Default for CalorieRange {
    fn default() -> Self {
        let (min, max) = training_defaults::CALORIE_RANGE;
        Self { min, max }
    }
}

impl CalorieRange {
    /// True when `calories` lies inside the window
    #[must_use]
    pub fn contains(&self, calories: f64) -> bool {
        (self.min..=self.max).contains(&calories)
    }

    /// Parse `"min,max"`, or `"off"`/`"none"` to disable filtering
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for anything else
    pub fn parse_filter(value: &str) -> AppResult<Option<Self>> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("off") || value.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        let (min, max) = value.split_once(',').ok_or_else(|| {
            AppError::config(format!("calorie filter must be 'min,max' or 'off', got '{value}'"))
        })?;
        let parse = |part: &str| {
            part.trim().parse::<f64>().map_err(|e| {
                AppError::config(format!("invalid calorie filter bound '{part}'")).with_source(e)
            })
        };
        Ok(Some(Self {
            min: parse(min)?,
            max: parse(max)?,
        }))
    }
}

impl fmt::Display for CalorieRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] kcal", self.min, self.max)
    }
}

/// Settings for one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Seed for the split shuffle and every bootstrap stream
    pub seed: u64,
    /// Held-out share, rounded up to whole rows
    pub test_fraction: f64,
    /// Folds used to score grid candidates
    pub cv_folds: usize,
    /// Folds for the reported cross-validated R² (0 disables)
    pub cross_val_folds: usize,
    /// Transform applied to the calorie target before fitting
    pub calorie_transform: CalorieTransform,
    /// Outlier window on raw calories; `None` keeps everything
    pub calorie_filter: Option<CalorieRange>,
    /// Candidate tree counts
    pub n_estimators_grid: Vec<usize>,
    /// Candidate depth limits (`None` = unlimited)
    pub max_depth_grid: Vec<Option<usize>>,
    /// Minimum samples to split a node
    pub min_samples_split: usize,
    /// Minimum samples per leaf
    pub min_samples_leaf: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: training_defaults::SEED,
            test_fraction: training_defaults::TEST_FRACTION,
            cv_folds: training_defaults::GRID_SEARCH_FOLDS,
            cross_val_folds: training_defaults::CROSS_VALIDATION_FOLDS,
            calorie_transform: CalorieTransform::Log,
            calorie_filter: Some(CalorieRange::default()),
            n_estimators_grid: training_defaults::N_ESTIMATORS_GRID.to_vec(),
            max_depth_grid: training_defaults::MAX_DEPTH_GRID.to_vec(),
            min_samples_split: training_defaults::MIN_SAMPLES_SPLIT,
            min_samples_leaf: training_defaults::MIN_SAMPLES_LEAF,
        }
    }
}

impl TrainingConfig {
    /// Validate ranges before the pipeline starts
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first invalid setting
    pub fn validate(&self) -> AppResult<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(AppError::config(format!(
                "test fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.cv_folds < 2 {
            return Err(AppError::config(format!(
                "grid search needs at least 2 folds, got {}",
                self.cv_folds
            )));
        }
        if self.cross_val_folds == 1 {
            return Err(AppError::config(
                "cross-validation folds must be 0 (disabled) or at least 2",
            ));
        }
        if let Some(range) = self.calorie_filter {
            if !range.min.is_finite() || !range.max.is_finite() || range.min >= range.max {
                return Err(AppError::config(format!(
                    "calorie filter range is inverted or not finite: {range}"
                )));
            }
        }
        if self.n_estimators_grid.is_empty() || self.n_estimators_grid.contains(&0) {
            return Err(AppError::config(
                "n_estimators grid must be non-empty and positive",
            ));
        }
        if self.max_depth_grid.is_empty() || self.max_depth_grid.contains(&Some(0)) {
            return Err(AppError::config(
                "max_depth grid must be non-empty and positive",
            ));
        }
        if self.min_samples_split < 2 || self.min_samples_leaf == 0 {
            return Err(AppError::config(
                "min_samples_split must be >= 2 and min_samples_leaf >= 1",
            ));
        }
        Ok(())
    }
}

/// Parse a comma-separated list, e.g. `"100,200"`
///
/// # Errors
///
/// Returns `ConfigInvalid` when any element fails to parse
pub fn parse_list<T>(value: &str) -> AppResult<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<T>()
                .map_err(|e| AppError::config(format!("invalid list element '{s}'")).with_source(e))
        })
        .collect()
}

/// Parse depth candidates where `none` means unlimited, e.g. `"none,10,20"`
///
/// # Errors
///
/// Returns `ConfigInvalid` when any element is neither `none` nor an integer
pub fn parse_depth_list(value: &str) -> AppResult<Vec<Option<usize>>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.eq_ignore_ascii_case("none") {
                Ok(None)
            } else {
                s.parse::<usize>().map(Some).map_err(|e| {
                    AppError::config(format!("invalid max_depth '{s}'")).with_source(e)
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TrainingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.calorie_transform, CalorieTransform::Log);
        assert_eq!(config.max_depth_grid, vec![None, Some(10), Some(20)]);
    }

    #[test]
    fn test_calorie_filter_parsing() {
        assert_eq!(CalorieRange::parse_filter("off").unwrap(), None);
        let range = CalorieRange::parse_filter(" 800 , 5000 ").unwrap().unwrap();
        assert!((range.min - 800.0).abs() < f64::EPSILON);
        assert!(range.contains(5000.0));
        assert!(!range.contains(5000.1));
        assert!(CalorieRange::parse_filter("800").is_err());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut config = TrainingConfig {
            test_fraction: 1.0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());

        config.test_fraction = 0.2;
        config.cv_folds = 1;
        assert!(config.validate().is_err());

        config.cv_folds = 3;
        config.calorie_filter = Some(CalorieRange {
            min: 4000.0,
            max: 1000.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_depth_list_parsing() {
        assert_eq!(
            parse_depth_list("none, 10,20").unwrap(),
            vec![None, Some(10), Some(20)]
        );
        assert!(parse_depth_list("deep").is_err());
        assert_eq!(parse_list::<usize>("100,200").unwrap(), vec![100, 200]);
    }
}
