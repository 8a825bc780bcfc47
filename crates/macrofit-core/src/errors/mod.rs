// ABOUTME: Unified error handling with error codes, HTTP status mapping, and response formatting
// ABOUTME: Defines the prediction, artifact, and training failure taxonomy shared by all crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in Macrofit returns [`AppResult`]. The [`ErrorCode`]
//! carried by an [`AppError`] decides how the caller reacts:
//!
//! - `InvalidProfile` - reject the single prediction request, never retry
//! - `ArtifactLoadError` - fatal at start-up, the service must not serve
//! - `DataLoadError` - fatal for an offline training run
//!
//! No error class is transient: inference is local and deterministic.

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Profile fields are missing, non-positive, or unrecognized
    #[serde(rename = "INVALID_PROFILE")]
    InvalidProfile,

    /// Trained artifact missing, unreadable, or incompatible with the serving contract
    #[serde(rename = "ARTIFACT_LOAD_ERROR")]
    ArtifactLoadError,
    /// Raw or cleaned survey data missing or malformed
    #[serde(rename = "DATA_LOAD_ERROR")]
    DataLoadError,

    /// Configuration value rejected during validation
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    /// Model fitting failed (empty data, invalid hyperparameters)
    #[serde(rename = "TRAINING_ERROR")]
    TrainingError,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// HTTP status the serving layer should answer with
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidProfile => 400,
            Self::ArtifactLoadError
            | Self::DataLoadError
            | Self::ConfigInvalid
            | Self::TrainingError
            | Self::SerializationError
            | Self::InternalError => 500,
        }
    }

    /// User-facing description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidProfile => "The user profile is invalid",
            Self::ArtifactLoadError => "The trained model artifact could not be loaded",
            Self::DataLoadError => "Training data could not be loaded",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::TrainingError => "Model training failed",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::ArtifactLoadError => "ARTIFACT_LOAD_ERROR",
            Self::DataLoadError => "DATA_LOAD_ERROR",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::TrainingError => "TRAINING_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Profile validation failure
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidProfile, message)
    }

    /// Artifact missing or incompatible
    pub fn artifact_load(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ArtifactLoadError, message)
    }

    /// Training data missing or malformed
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataLoadError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Model fitting error
    pub fn training(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TrainingError, message)
    }

    /// Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string()).with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Error response body handed to the serving layer
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorResponseDetails,
}

/// Error details inside an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        // Internal failures are reported generically to clients
        let message = if error.http_status() >= 500 {
            error.code.description().to_owned()
        } else {
            error.message
        };
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message,
            },
        }
    }
}
