// ABOUTME: Error types for regression fitting, prediction, and model validation
// ABOUTME: Converts into the shared AppError taxonomy at the crate boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macrofit_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Errors raised by the regression engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// No rows to fit or score
    #[error("dataset is empty")]
    EmptyDataset,

    /// Row or column count disagrees with what the operation expects
    #[error("dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which dimension was checked
        what: &'static str,
        /// Expected size
        expected: usize,
        /// Actual size
        actual: usize,
    },

    /// Hyperparameter or split configuration out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Deserialized model is structurally unsound
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

impl From<RegressionError> for AppError {
    fn from(error: RegressionError) -> Self {
        let code = match error {
            RegressionError::InvalidModel(_) => ErrorCode::ArtifactLoadError,
            RegressionError::EmptyDataset
            | RegressionError::DimensionMismatch { .. }
            | RegressionError::InvalidParameter(_) => ErrorCode::TrainingError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Result alias for the regression engine
pub type RegressionResult<T> = Result<T, RegressionError>;
