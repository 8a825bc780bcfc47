// ABOUTME: Core data models for the Macrofit prediction path
// ABOUTME: Re-exports profile and nutrition types shared by training and serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserProfile` / `ProfileRequest`: validated and raw prediction inputs
//! - `FeatureVector` / `RawPrediction`: the regressor's numeric contract
//! - `MacroRecommendation`: the final integer recommendation

mod nutrition;
mod profile;

pub use nutrition::{CalorieTransform, FeatureVector, MacroRecommendation, RawPrediction};
pub use profile::{ActivityLevel, BiologicalSex, FitnessGoal, ProfileRequest, UserProfile};
