// ABOUTME: Core types and constants for the Macrofit macro recommendation engine
// ABOUTME: Foundation crate with error handling, lookup tables, and domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit Core
//!
//! Foundation crate shared by the regression engine and the prediction/training
//! crate. It changes rarely, which keeps incremental builds of the workspace fast.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `AppResult` alias
//! - **constants**: model contract, lookup tables, survey columns, defaults
//! - **models**: user profile and nutrition value types

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, feature vector, recommendation)
pub mod models;
