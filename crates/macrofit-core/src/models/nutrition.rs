// ABOUTME: Numeric nutrition models flowing through the prediction path
// ABOUTME: FeatureVector, RawPrediction, CalorieTransform, and MacroRecommendation definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::model_contract::{
    CALORIES_INDEX, CARBS_INDEX, FAT_INDEX, FEATURE_COUNT, PROTEIN_INDEX, TARGET_COUNT,
};

/// Model input in contract order: `[age, sex_code, weight_kg, height_cm]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Borrow the features as a slice
    #[must_use]
    pub const fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Model output in contract order: `[calories, protein, carbs, fat]`
///
/// `calories` is in log space when the artifact was trained with
/// [`CalorieTransform::Log`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPrediction(pub [f64; TARGET_COUNT]);

impl RawPrediction {
    /// Raw calorie value (possibly log-scaled)
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.0[CALORIES_INDEX]
    }

    /// Raw protein grams
    #[must_use]
    pub const fn protein(&self) -> f64 {
        self.0[PROTEIN_INDEX]
    }

    /// Raw carbohydrate grams
    #[must_use]
    pub const fn carbs(&self) -> f64 {
        self.0[CARBS_INDEX]
    }

    /// Raw fat grams
    #[must_use]
    pub const fn fat(&self) -> f64 {
        self.0[FAT_INDEX]
    }
}

/// Transform applied to the calorie target at training time
///
/// Recorded in the artifact and never inferred: a mismatch silently corrupts
/// every recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CalorieTransform {
    /// Calories trained as-is
    Identity,
    /// Calories trained as `ln(calories)`
    Log,
}

impl CalorieTransform {
    /// Map a calorie value into training space
    #[must_use]
    pub fn forward(self, calories: f64) -> f64 {
        match self {
            Self::Identity => calories,
            Self::Log => calories.ln(),
        }
    }

    /// Map a training-space calorie value back to kcal
    #[must_use]
    pub fn inverse(self, calories: f64) -> f64 {
        match self {
            Self::Identity => calories,
            Self::Log => calories.exp(),
        }
    }
}

impl fmt::Display for CalorieTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Log => f.write_str("log"),
        }
    }
}

/// Final daily recommendation, truncated toward zero
///
/// Values are not clamped: zero or negative output signals a data or model
/// quality problem to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroRecommendation {
    /// Daily energy in kcal
    pub total_calories: i64,
    /// Protein grams
    pub protein: i64,
    /// Carbohydrate grams
    pub carbs: i64,
    /// Fat grams
    pub fat: i64,
}

impl fmt::Display for MacroRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal (protein {} g, carbs {} g, fat {} g)",
            self.total_calories, self.protein, self.carbs, self.fat
        )
    }
}
