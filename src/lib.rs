// ABOUTME: Main library entry point for the Macrofit macro recommendation engine
// ABOUTME: Serving path (features, regressor, post-processing) and offline training pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit
//!
//! Daily calorie and macronutrient recommendations from a small user profile
//! (age, sex, weight, height, activity level, fitness goal).
//!
//! ## Architecture
//!
//! - **prediction**: Feature Builder → Regressor → Post-Processor, driven by a
//!   [`prediction::MacroPredictor`] built once from a trained artifact
//! - **training**: survey extracts → cleaned dataset → grid-searched random
//!   forest → artifact and report
//! - **config**: environment configuration and adjustment tables
//! - **logging**: structured `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use macrofit::config::MacrofitConfig;
//! use macrofit::errors::AppResult;
//! use macrofit::models::ProfileRequest;
//! use macrofit::prediction::MacroPredictor;
//!
//! fn main() -> AppResult<()> {
//!     let config = MacrofitConfig::from_env()?;
//!     let predictor = MacroPredictor::load(&config.paths.artifact_path, config.adjustments)?;
//!
//!     let request = ProfileRequest {
//!         age: 30,
//!         sex: "female".to_owned(),
//!         weight_kg: 62.0,
//!         height_cm: 168.0,
//!         activity_level: "moderate".to_owned(),
//!         fitness_goal: "maintain".to_owned(),
//!     };
//!     println!("{}", predictor.recommend_request(&request)?);
//!     Ok(())
//! }
//! ```

/// Environment configuration and adjustment tables
pub mod config;

/// Error types
pub mod errors;

/// Structured logging
pub mod logging;

/// Serving path
pub mod prediction;

/// Offline training pipeline
pub mod training;

/// Constants shared with the engine crates
pub use macrofit_core::constants;

/// Profile and nutrition models
pub use macrofit_core::models;
