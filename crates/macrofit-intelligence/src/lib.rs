// ABOUTME: Regression engine for Macrofit: tree ensembles, metrics, and model selection
// ABOUTME: Pure computation with no I/O; callers own persistence and data loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Macrofit Intelligence
//!
//! Multi-output random forest regression with seeded, thread-count independent
//! fitting.
//!
//! ## Modules
//!
//! - **dataset**: dense matrices and feature/target pairs
//! - **regression**: CART trees, random forests, multi-output wrapper
//! - **metrics**: MSE, R², explained variance
//! - **model_selection**: train/test split, k-fold, grid search

/// Dense matrix and dataset containers
pub mod dataset;

/// Regression engine errors
pub mod error;

/// Evaluation metrics
pub mod metrics;

/// Splitting, cross-validation, and hyperparameter search
pub mod model_selection;

/// Tree ensemble regressors
pub mod regression;

pub use dataset::{Dataset, Matrix};
pub use error::{RegressionError, RegressionResult};
pub use metrics::{MultiOutputScores, TargetScores};
pub use model_selection::{
    cross_val_score, train_test_split, GridSearch, GridSearchResult, KFold, ParamGrid,
};
pub use regression::{ForestParams, MultiOutputForest, RandomForest, TreeParams};
