// ABOUTME: Bagged random forest of regression trees for a single target
// ABOUTME: Trees are fitted in parallel with rayon from per-tree ChaCha streams for reproducibility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::tree::{RegressionTree, TreeParams};
use crate::dataset::Matrix;
use crate::error::{RegressionError, RegressionResult};

/// Forest hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Per-tree growth limits
    pub tree: TreeParams,
    /// Draw a bootstrap sample (with replacement) for every tree
    pub bootstrap: bool,
    /// Base seed; tree `i` draws from ChaCha stream `i` of this seed
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            tree: TreeParams::default(),
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestParams {
    /// Validate forest and tree parameters
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty forest or invalid tree limits
    pub fn validate(&self) -> RegressionResult<()> {
        if self.n_estimators == 0 {
            return Err(RegressionError::InvalidParameter(
                "n_estimators must be at least 1".to_owned(),
            ));
        }
        self.tree.validate()
    }
}

/// Random forest regressor for one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Fit a forest on all rows of `features` against `targets`
    ///
    /// Output is independent of the rayon thread count: every tree owns its
    /// random stream and results are collected in tree order.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, an empty matrix, or a target
    /// length that differs from the row count
    pub fn fit(
        features: &Matrix,
        targets: &[f64],
        params: &ForestParams,
    ) -> RegressionResult<Self> {
        params.validate()?;
        let n_rows = features.n_rows();
        if n_rows == 0 {
            return Err(RegressionError::EmptyDataset);
        }

        let trees = (0..params.n_estimators)
            .into_par_iter()
            .map(|tree_index| {
                let samples = if params.bootstrap {
                    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
                    rng.set_stream(tree_index as u64);
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                RegressionTree::fit(features, targets, samples, &params.tree)
            })
            .collect::<RegressionResult<Vec<_>>>()?;

        Ok(Self {
            n_features: features.n_cols(),
            trees,
        })
    }

    /// Mean prediction of all trees for one row
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|tree| tree.predict_row(row)).sum();
        sum / self.trees.len() as f64
    }

    /// Predict every row of `features`
    #[must_use]
    pub fn predict(&self, features: &Matrix) -> Vec<f64> {
        features.rows().map(|row| self.predict_row(row)).collect()
    }

    /// Number of input features the forest was fitted on
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of trees
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Total node count over all trees
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.trees.iter().map(RegressionTree::node_count).sum()
    }

    /// Check structural soundness after deserialization
    ///
    /// # Errors
    ///
    /// Returns `InvalidModel` for an empty forest or any invalid tree
    pub fn validate(&self) -> RegressionResult<()> {
        if self.trees.is_empty() {
            return Err(RegressionError::InvalidModel("forest has no trees".to_owned()));
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features).map_err(|e| {
                RegressionError::InvalidModel(format!("tree {index}: {e}"))
            })?;
        }
        Ok(())
    }
}
