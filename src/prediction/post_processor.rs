// ABOUTME: Post-processor turning a raw regressor output into the final macro recommendation
// ABOUTME: Inverse calorie transform, activity multiplier, goal adjustment, then truncation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Post-processing of raw predictions
//!
//! The step order is fixed: inverse transform, activity multiplier, goal
//! adjustment, truncation. Values are never rounded, only truncated toward
//! zero once at the end.

use macrofit_core::models::{
    ActivityLevel, CalorieTransform, FitnessGoal, MacroRecommendation, RawPrediction,
};

use crate::config::nutrition::AdjustmentTables;

/// Apply transform, activity, and goal to a raw prediction
#[must_use]
pub fn adjust(
    raw: RawPrediction,
    activity: ActivityLevel,
    goal: FitnessGoal,
    transform: CalorieTransform,
    tables: &AdjustmentTables,
) -> MacroRecommendation {
    let mut calories = transform.inverse(raw.calories());
    let mut protein = raw.protein();

    calories *= tables.activity_factors.multiplier(activity);

    let factors = tables.goals.factors(goal);
    calories *= factors.calories;
    protein *= factors.protein;

    MacroRecommendation {
        total_calories: truncate(calories),
        protein: truncate(protein),
        carbs: truncate(raw.carbs()),
        fat: truncate(raw.fat()),
    }
}

/// Truncate toward zero; NaN maps to 0 and infinities saturate
#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
