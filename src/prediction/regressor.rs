// ABOUTME: Regressor abstraction over a loaded model and its random forest implementation
// ABOUTME: Fixed-arity vector-in/vector-out prediction shared read-only across threads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macrofit_core::constants::model_contract::{FEATURE_COUNT, TARGET_COUNT};
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::{FeatureVector, RawPrediction};
use macrofit_intelligence::MultiOutputForest;

/// Opaque multi-output regressor
///
/// Implementations are immutable after construction and safe to call from
/// any number of threads.
pub trait MacroRegressor: Send + Sync {
    /// Input width
    fn n_features(&self) -> usize;

    /// Output width
    fn n_outputs(&self) -> usize;

    /// Predict `[calories_raw, protein_raw, carbs_raw, fat_raw]`
    fn predict(&self, features: &FeatureVector) -> RawPrediction;
}

/// Regressor backed by one random forest per target
#[derive(Debug, Clone)]
pub struct ForestRegressor {
    model: MultiOutputForest,
}

impl ForestRegressor {
    /// Wrap a fitted model after checking it matches the feature contract
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoadError` if the input or output width differs from
    /// the contract
    pub fn new(model: MultiOutputForest) -> AppResult<Self> {
        if model.n_features() != FEATURE_COUNT {
            return Err(AppError::artifact_load(format!(
                "model expects {} features, contract requires {FEATURE_COUNT}",
                model.n_features()
            )));
        }
        if model.n_outputs() != TARGET_COUNT {
            return Err(AppError::artifact_load(format!(
                "model produces {} outputs, contract requires {TARGET_COUNT}",
                model.n_outputs()
            )));
        }
        Ok(Self { model })
    }
}

impl MacroRegressor for ForestRegressor {
    fn n_features(&self) -> usize {
        self.model.n_features()
    }

    fn n_outputs(&self) -> usize {
        self.model.n_outputs()
    }

    fn predict(&self, features: &FeatureVector) -> RawPrediction {
        let mut output = [0.0; TARGET_COUNT];
        for (slot, value) in output
            .iter_mut()
            .zip(self.model.predict_row(features.as_slice()))
        {
            *slot = value;
        }
        RawPrediction(output)
    }
}
