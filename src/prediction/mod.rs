// ABOUTME: Serving path: feature builder, regressor, post-processor, artifact, and predictor handle
// ABOUTME: Synchronous and pure apart from the one-time artifact load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prediction
//!
//! `UserProfile` → [`build_features`] → [`MacroRegressor::predict`] →
//! [`adjust`] → `MacroRecommendation`

/// Trained artifact persistence and validation
pub mod artifact;
/// Profile to feature vector mapping
pub mod features;
/// Raw prediction to recommendation
pub mod post_processor;
/// Regressor trait and forest implementation
pub mod regressor;
/// Shared predictor handle
pub mod service;

pub use artifact::{EvaluationSummary, SplitSettings, TrainedArtifact};
pub use features::build_features;
pub use post_processor::adjust;
pub use regressor::{ForestRegressor, MacroRegressor};
pub use service::MacroPredictor;
