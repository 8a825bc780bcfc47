// ABOUTME: Post-processing lookup tables for activity multipliers and fitness goal adjustments
// ABOUTME: Immutable after construction and shared read-only by every prediction call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adjustment tables applied after the regressor.
//!
//! # References
//!
//! - Activity multipliers: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology

use macrofit_core::constants::{activity_factors, goal_adjustments};
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::{ActivityLevel, FitnessGoal};
use serde::{Deserialize, Serialize};

/// Activity factor multipliers (PAL) applied to predicted calories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
    /// Extra active (hard training 2x/day): 1.9
    pub extra_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: activity_factors::SEDENTARY,
            lightly_active: activity_factors::LIGHT,
            moderately_active: activity_factors::MODERATE,
            very_active: activity_factors::VERY_ACTIVE,
            extra_active: activity_factors::EXTRA_ACTIVE,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for `level`
    #[must_use]
    pub const fn multiplier(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.lightly_active,
            ActivityLevel::Moderate => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }
}

/// Calorie and protein scaling for one fitness goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalFactors {
    /// Calorie multiplier
    pub calories: f64,
    /// Protein multiplier
    pub protein: f64,
}

impl GoalFactors {
    /// Leaves both values untouched
    pub const IDENTITY: Self = Self {
        calories: 1.0,
        protein: 1.0,
    };
}

/// Goal adjustments; carbs and fat are never scaled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalAdjustmentConfig {
    /// Calorie surplus and extra protein
    pub gain_muscle: GoalFactors,
    /// Calorie deficit with a small protein bump
    pub lose_fat: GoalFactors,
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            gain_muscle: GoalFactors {
                calories: goal_adjustments::GAIN_MUSCLE_CALORIES,
                protein: goal_adjustments::GAIN_MUSCLE_PROTEIN,
            },
            lose_fat: GoalFactors {
                calories: goal_adjustments::LOSE_FAT_CALORIES,
                protein: goal_adjustments::LOSE_FAT_PROTEIN,
            },
        }
    }
}

impl GoalAdjustmentConfig {
    /// Factors for `goal`; `Maintain` is the identity
    #[must_use]
    pub const fn factors(&self, goal: FitnessGoal) -> GoalFactors {
        match goal {
            FitnessGoal::GainMuscle => self.gain_muscle,
            FitnessGoal::LoseFat => self.lose_fat,
            FitnessGoal::Maintain => GoalFactors::IDENTITY,
        }
    }
}

/// Both tables together, as consumed by the post-processor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdjustmentTables {
    /// Activity multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Goal adjustments
    pub goals: GoalAdjustmentConfig,
}

impl AdjustmentTables {
    /// Reject non-positive or non-finite multipliers
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the first offending entry
    pub fn validate(&self) -> AppResult<()> {
        let a = &self.activity_factors;
        let g = &self.goals;
        let entries = [
            ("activity.sedentary", a.sedentary),
            ("activity.lightly_active", a.lightly_active),
            ("activity.moderately_active", a.moderately_active),
            ("activity.very_active", a.very_active),
            ("activity.extra_active", a.extra_active),
            ("goal.gain_muscle.calories", g.gain_muscle.calories),
            ("goal.gain_muscle.protein", g.gain_muscle.protein),
            ("goal.lose_fat.calories", g.lose_fat.calories),
            ("goal.lose_fat.protein", g.lose_fat.protein),
        ];
        for (name, value) in entries {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::config(format!(
                    "{name} must be a positive multiplier, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_activity_table() {
        let table = ActivityFactorsConfig::default();
        let expected = [1.20, 1.375, 1.55, 1.725, 1.90];
        for (level, factor) in ActivityLevel::ALL.iter().zip(expected) {
            assert!((table.multiplier(*level) - factor).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_maintain_is_identity() {
        assert_eq!(
            GoalAdjustmentConfig::default().factors(FitnessGoal::Maintain),
            GoalFactors::IDENTITY
        );
    }

    #[test]
    fn test_validate_rejects_zero_multiplier() {
        let mut tables = AdjustmentTables::default();
        assert!(tables.validate().is_ok());
        tables.goals.lose_fat.protein = 0.0;
        assert!(tables.validate().is_err());
    }
}
