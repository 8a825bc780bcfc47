// ABOUTME: Error handling re-exports for the Macrofit library and binaries
// ABOUTME: The error taxonomy itself lives in macrofit-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Unified error handling
//!
//! See [`macrofit_core::errors`] for the error codes and their meaning.

pub use macrofit_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
