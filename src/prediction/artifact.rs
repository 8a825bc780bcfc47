// ABOUTME: Versioned trained-model artifact with its feature contract and training metadata
// ABOUTME: JSON persistence plus load-time validation so serving never starts on a bad model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Trained artifact
//!
//! The artifact carries everything the serving path needs to interpret the
//! model: column orders, the sex encoding, and the calorie transform. All of
//! it is checked against the compiled-in contract by [`TrainedArtifact::load`].

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use macrofit_core::constants::model_contract::{
    CURRENT_FORMAT_VERSION, FEATURE_ORDER, SUPPORTED_FORMAT_VERSIONS, TARGET_ORDER,
};
use macrofit_core::constants::sex_encoding::SEX_ENCODING;
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::CalorieTransform;
use macrofit_intelligence::{ForestParams, MultiOutputForest, MultiOutputScores};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::training::{CalorieRange, TrainingConfig};
use crate::logging::AppLogger;

/// Held-out evaluation recorded alongside the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    /// Rows used to fit the final model
    pub train_rows: usize,
    /// Held-out rows
    pub test_rows: usize,
    /// Test-set metrics with calories in kcal
    pub test_scores: MultiOutputScores,
    /// Mean grid-search score of the selected candidate
    pub grid_search_r2: f64,
    /// Mean k-fold R² over the cleaned data, when enabled
    pub cross_val_r2: Option<f64>,
}

/// Row selection and split used to fit a model
///
/// Stored in the artifact so the held-out rows can be reproduced later
/// regardless of the configuration in effect at that time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitSettings {
    /// Seed for the split shuffle and bootstrap streams
    pub seed: u64,
    /// Held-out share
    pub test_fraction: f64,
    /// Outlier window applied before splitting
    pub calorie_filter: Option<CalorieRange>,
}

impl SplitSettings {
    /// Settings of a training configuration
    #[must_use]
    pub const fn from_config(config: &TrainingConfig) -> Self {
        Self {
            seed: config.seed,
            test_fraction: config.test_fraction,
            calorie_filter: config.calorie_filter,
        }
    }
}

/// Everything needed to serve predictions from a fitted model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedArtifact {
    /// Artifact schema version
    pub format_version: u32,
    /// Unique identifier of this training run
    pub model_version: String,
    /// Training completion time
    pub created_at: DateTime<Utc>,
    /// Feature names in input order
    pub feature_order: Vec<String>,
    /// Target names in output order
    pub target_order: Vec<String>,
    /// Transform applied to the calorie target during training
    pub calorie_transform: CalorieTransform,
    /// Category → numeric code used for the sex feature
    pub sex_encoding: BTreeMap<String, u8>,
    /// Selected hyperparameters
    pub hyperparameters: ForestParams,
    /// Seed for the split and bootstrap streams
    pub seed: u64,
    /// Held-out share of the training split
    pub test_fraction: f64,
    /// Outlier window applied before the split (`None` when disabled)
    pub calorie_filter: Option<CalorieRange>,
    /// Held-out evaluation
    #[serde(default)]
    pub evaluation: Option<EvaluationSummary>,
    /// Fitted model
    pub model: MultiOutputForest,
}

fn contract_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

fn contract_sex_encoding() -> BTreeMap<String, u8> {
    SEX_ENCODING
        .iter()
        .map(|(name, code)| ((*name).to_owned(), *code))
        .collect()
}

impl TrainedArtifact {
    /// Wrap a freshly fitted model with the current contract
    #[must_use]
    pub fn new(
        model: MultiOutputForest,
        calorie_transform: CalorieTransform,
        split: SplitSettings,
        evaluation: Option<EvaluationSummary>,
    ) -> Self {
        Self {
            format_version: CURRENT_FORMAT_VERSION,
            model_version: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            feature_order: contract_names(&FEATURE_ORDER),
            target_order: contract_names(&TARGET_ORDER),
            calorie_transform,
            sex_encoding: contract_sex_encoding(),
            hyperparameters: *model.params(),
            seed: split.seed,
            test_fraction: split.test_fraction,
            calorie_filter: split.calorie_filter,
            evaluation,
            model,
        }
    }

    /// Read and validate an artifact
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoadError` if the file is missing or unparsable, or
    /// if [`Self::validate`] rejects it
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::artifact_load(format!("cannot open artifact {}", path.display()))
                .with_source(e)
        })?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AppError::artifact_load(format!("cannot parse artifact {}", path.display()))
                .with_source(e)
        })?;
        artifact.validate()?;

        AppLogger::log_artifact_loaded(path, &artifact.model_version, artifact.model.n_trees());
        Ok(artifact)
    }

    /// Write the artifact as JSON, creating parent directories
    ///
    /// # Errors
    ///
    /// Returns `InternalError` on I/O failure or `SerializationError` if the
    /// model cannot be encoded
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::internal(format!("cannot create {}", parent.display())).with_source(e)
            })?;
        }
        let file = File::create(path).map_err(|e| {
            AppError::internal(format!("cannot create artifact {}", path.display())).with_source(e)
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| {
            AppError::internal(format!("cannot write artifact {}", path.display())).with_source(e)
        })?;

        AppLogger::log_artifact_written(path, &self.model_version);
        Ok(())
    }

    /// Split settings recorded at training time
    #[must_use]
    pub const fn split_settings(&self) -> SplitSettings {
        SplitSettings {
            seed: self.seed,
            test_fraction: self.test_fraction,
            calorie_filter: self.calorie_filter,
        }
    }

    /// Check the artifact against the serving contract
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoadError` for an unsupported format version, a
    /// recorded test fraction outside (0, 1), a feature/target order or sex encoding that differs from the contract, a
    /// model arity other than 4 in and 4 out, or a malformed model
    pub fn validate(&self) -> AppResult<()> {
        if !SUPPORTED_FORMAT_VERSIONS.contains(&self.format_version) {
            return Err(AppError::artifact_load(format!(
                "unsupported artifact format version {} (supported: {SUPPORTED_FORMAT_VERSIONS:?})",
                self.format_version
            )));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(AppError::artifact_load(format!(
                "recorded test fraction {} is outside (0, 1)",
                self.test_fraction
            )));
        }
        if self.feature_order != FEATURE_ORDER {
            return Err(AppError::artifact_load(format!(
                "feature order {:?} does not match {FEATURE_ORDER:?}",
                self.feature_order
            )));
        }
        if self.target_order != TARGET_ORDER {
            return Err(AppError::artifact_load(format!(
                "target order {:?} does not match {TARGET_ORDER:?}",
                self.target_order
            )));
        }
        if self.sex_encoding != contract_sex_encoding() {
            return Err(AppError::artifact_load(format!(
                "sex encoding {:?} does not match {SEX_ENCODING:?}",
                self.sex_encoding
            )));
        }
        if self.model.n_features() != FEATURE_ORDER.len()
            || self.model.n_outputs() != TARGET_ORDER.len()
        {
            return Err(AppError::artifact_load(format!(
                "model arity is {} in / {} out, expected {} / {}",
                self.model.n_features(),
                self.model.n_outputs(),
                FEATURE_ORDER.len(),
                TARGET_ORDER.len()
            )));
        }
        self.model.validate().map_err(|e| {
            AppError::artifact_load(format!("malformed model: {e}")).with_source(e)
        })
    }
}
