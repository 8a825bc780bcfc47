// ABOUTME: Prediction service handle combining the regressor, calorie transform, and adjustment tables
// ABOUTME: Built once at start-up and shared behind an Arc by concurrent request handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use macrofit_core::errors::AppResult;
use macrofit_core::models::{
    CalorieTransform, MacroRecommendation, ProfileRequest, RawPrediction, UserProfile,
};
use tracing::debug;

use super::artifact::TrainedArtifact;
use super::features::build_features;
use super::post_processor::adjust;
use super::regressor::{ForestRegressor, MacroRegressor};
use crate::config::nutrition::AdjustmentTables;
use crate::logging::AppLogger;

/// Read-only prediction handle
pub struct MacroPredictor {
    regressor: Box<dyn MacroRegressor>,
    calorie_transform: CalorieTransform,
    tables: AdjustmentTables,
    model_version: String,
}

impl MacroPredictor {
    /// Assemble a predictor from parts
    #[must_use]
    pub fn new(
        regressor: Box<dyn MacroRegressor>,
        calorie_transform: CalorieTransform,
        tables: AdjustmentTables,
        model_version: impl Into<String>,
    ) -> Self {
        Self {
            regressor,
            calorie_transform,
            tables,
            model_version: model_version.into(),
        }
    }

    /// Build from an already validated artifact
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoadError` if the model does not fit the feature contract
    pub fn from_artifact(artifact: TrainedArtifact, tables: AdjustmentTables) -> AppResult<Self> {
        let regressor = ForestRegressor::new(artifact.model)?;
        Ok(Self::new(
            Box::new(regressor),
            artifact.calorie_transform,
            tables,
            artifact.model_version,
        ))
    }

    /// Load the artifact at `path` into a shareable handle
    ///
    /// # Errors
    ///
    /// Returns `ArtifactLoadError` for any artifact problem; callers treat it
    /// as fatal
    pub fn load(path: &Path, tables: AdjustmentTables) -> AppResult<Arc<Self>> {
        tables.validate()?;
        let artifact = TrainedArtifact::load(path)?;
        Ok(Arc::new(Self::from_artifact(artifact, tables)?))
    }

    /// Version identifier of the loaded model
    #[must_use]
    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Calorie transform the model was trained with
    #[must_use]
    pub const fn calorie_transform(&self) -> CalorieTransform {
        self.calorie_transform
    }

    /// Regressor output before post-processing
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` for non-positive age, weight, or height
    pub fn predict_raw(&self, profile: &UserProfile) -> AppResult<RawPrediction> {
        let features = build_features(profile)?;
        Ok(self.regressor.predict(&features))
    }

    /// Daily macro recommendation for a validated profile
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` for non-positive age, weight, or height
    pub fn recommend(&self, profile: &UserProfile) -> AppResult<MacroRecommendation> {
        let raw = self.predict_raw(profile)?;
        let recommendation = adjust(
            raw,
            profile.activity_level,
            profile.fitness_goal,
            self.calorie_transform,
            &self.tables,
        );
        debug!(
            model.version = %self.model_version,
            activity = %profile.activity_level,
            goal = %profile.fitness_goal,
            %recommendation,
            "Recommendation computed"
        );

        for (field, value) in [
            ("total_calories", recommendation.total_calories),
            ("protein", recommendation.protein),
            ("carbs", recommendation.carbs),
            ("fat", recommendation.fat),
        ] {
            if value <= 0 {
                AppLogger::log_suspicious_recommendation(field, value);
            }
        }
        Ok(recommendation)
    }

    /// Parse a string-typed request and recommend
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` for an unknown sex category or invalid numbers
    pub fn recommend_request(&self, request: &ProfileRequest) -> AppResult<MacroRecommendation> {
        let profile = UserProfile::try_from(request)?;
        self.recommend(&profile)
    }
}
