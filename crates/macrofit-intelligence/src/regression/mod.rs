// ABOUTME: Regression model family used for macro prediction
// ABOUTME: CART trees, bagged random forests, and the multi-output wrapper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Tree ensembles for multi-output regression.
//!
//! - [`RegressionTree`]: a single CART tree on squared error
//! - [`RandomForest`]: bootstrap-aggregated trees for one target
//! - [`MultiOutputForest`]: one forest per target, vector-in/vector-out

mod forest;
mod multi_output;
mod tree;

pub use forest::{ForestParams, RandomForest};
pub use multi_output::MultiOutputForest;
pub use tree::{RegressionTree, TreeNode, TreeParams};
