// ABOUTME: User profile models consumed by the macro prediction path
// ABOUTME: BiologicalSex, ActivityLevel, FitnessGoal, UserProfile, and the string-typed ProfileRequest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::sex_encoding::{FEMALE_CODE, MALE_CODE};
use crate::errors::{AppError, AppResult};

/// Lowercase, trim, and fold `-` and spaces into `_`
fn normalize_category(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Biological sex category used by the trained sex encoding
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BiologicalSex {
    /// Male (`RIAGENDR` = 1)
    Male,
    /// Female (`RIAGENDR` = 2)
    Female,
}

impl BiologicalSex {
    /// Parse a sex category; unrecognized values are rejected, never defaulted
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` when the category is not male or female
    pub fn parse(value: &str) -> AppResult<Self> {
        match normalize_category(value).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(AppError::invalid_profile(format!(
                "unrecognized biological sex category '{other}'"
            ))),
        }
    }

    /// Trained code for this category
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Male => MALE_CODE,
            Self::Female => FEMALE_CODE,
        }
    }

    /// Canonical lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported activity level selecting the PAL multiplier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Hard training twice a day
    ExtraActive,
}

impl ActivityLevel {
    /// All levels in ascending order of energy expenditure
    pub const ALL: [Self; 5] = [
        Self::Sedentary,
        Self::Light,
        Self::Moderate,
        Self::VeryActive,
        Self::ExtraActive,
    ];

    /// Strict parse of a normalized activity string
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_category(value).as_str() {
            "sedentary" => Some(Self::Sedentary),
            "light" | "lightly_active" => Some(Self::Light),
            "moderate" | "moderately_active" => Some(Self::Moderate),
            "very_active" => Some(Self::VeryActive),
            "extra_active" => Some(Self::ExtraActive),
            _ => None,
        }
    }

    /// Parse with fallback to [`ActivityLevel::Sedentary`]
    ///
    /// The fallback keeps the lowest multiplier for unknown input. It is logged so
    /// product can decide whether it should become a rejection instead.
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            warn!(
                activity_level = %value,
                fallback = %Self::Sedentary,
                "Unrecognized activity level, using sedentary multiplier"
            );
            Self::Sedentary
        })
    }

    /// Canonical snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared fitness goal selecting the post-hoc adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    /// Caloric deficit with extra protein
    LoseFat,
    /// No adjustment
    #[default]
    Maintain,
    /// Caloric surplus with extra protein
    GainMuscle,
}

impl FitnessGoal {
    /// Strict parse of a normalized goal string
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_category(value).as_str() {
            "lose_fat" => Some(Self::LoseFat),
            "maintain" => Some(Self::Maintain),
            "gain_muscle" => Some(Self::GainMuscle),
            _ => None,
        }
    }

    /// Parse with fallback to [`FitnessGoal::Maintain`] (no adjustment)
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        Self::parse(value).unwrap_or_else(|| {
            warn!(fitness_goal = %value, "Unrecognized fitness goal, applying no adjustment");
            Self::Maintain
        })
    }

    /// Canonical snake case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoseFat => "lose_fat",
            Self::Maintain => "maintain",
            Self::GainMuscle => "gain_muscle",
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input to one prediction call
///
/// Owned by the caller; the prediction path only borrows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Biological sex category
    pub sex: BiologicalSex,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Fitness goal
    pub fitness_goal: FitnessGoal,
}

impl UserProfile {
    /// Check the numeric constraints of the feature contract
    ///
    /// # Errors
    ///
    /// Returns `InvalidProfile` when age, weight, or height is not positive and finite
    pub fn validate(&self) -> AppResult<()> {
        if self.age == 0 {
            return Err(AppError::invalid_profile("age must be positive"));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(AppError::invalid_profile(format!(
                "weight_kg must be positive, got {}",
                self.weight_kg
            )));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(AppError::invalid_profile(format!(
                "height_cm must be positive, got {}",
                self.height_cm
            )));
        }
        Ok(())
    }
}

/// Prediction request as received from the serving layer
///
/// Categorical fields arrive as free-form strings and are interpreted by
/// [`UserProfile::try_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Age in years
    pub age: i64,
    /// Biological sex category ("male", "female")
    pub sex: String,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Activity level string
    #[serde(default)]
    pub activity_level: String,
    /// Fitness goal string
    #[serde(default)]
    pub fitness_goal: String,
}

impl TryFrom<&ProfileRequest> for UserProfile {
    type Error = AppError;

    fn try_from(request: &ProfileRequest) -> AppResult<Self> {
        let age = u32::try_from(request.age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| {
                AppError::invalid_profile(format!("age must be positive, got {}", request.age))
            })?;

        let profile = Self {
            age,
            sex: BiologicalSex::parse(&request.sex)?,
            weight_kg: request.weight_kg,
            height_cm: request.height_cm,
            activity_level: ActivityLevel::from_str_or_default(&request.activity_level),
            fitness_goal: FitnessGoal::from_str_or_default(&request.fitness_goal),
        };
        profile.validate()?;
        Ok(profile)
    }
}
