// ABOUTME: Feature builder mapping a validated user profile to the model's input vector
// ABOUTME: Column order and the sex encoding are fixed by the training contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macrofit_core::constants::sex_encoding::SEX_ENCODING;
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::{BiologicalSex, FeatureVector, UserProfile};

/// Numeric code of `sex` in the training encoding
///
/// # Errors
///
/// Returns `InvalidProfile` if the category has no code
pub fn sex_code(sex: BiologicalSex) -> AppResult<u8> {
    SEX_ENCODING
        .iter()
        .find(|(name, _)| *name == sex.as_str())
        .map(|(_, code)| *code)
        .ok_or_else(|| AppError::invalid_profile(format!("no encoding for sex category '{sex}'")))
}

/// Build `[age, sex_code, weight_kg, height_cm]` from a profile
///
/// # Errors
///
/// Returns `InvalidProfile` when age, weight, or height is not positive and finite
pub fn build_features(profile: &UserProfile) -> AppResult<FeatureVector> {
    profile.validate()?;
    Ok(FeatureVector([
        f64::from(profile.age),
        f64::from(sex_code(profile.sex)?),
        profile.weight_kg,
        profile.height_cm,
    ]))
}
