// ABOUTME: Multi-output regressor fitting one independent random forest per target column
// ABOUTME: Vector-in, vector-out prediction over a feature matrix or a single row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::forest::{ForestParams, RandomForest};
use crate::dataset::{Dataset, Matrix};
use crate::error::{RegressionError, RegressionResult};

/// One forest per target, all sharing the same hyperparameters and seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiOutputForest {
    n_features: usize,
    params: ForestParams,
    forests: Vec<RandomForest>,
}

impl MultiOutputForest {
    /// Fit every target column of `dataset`
    ///
    /// # Errors
    ///
    /// Returns an error for an empty dataset, a dataset without targets, or
    /// invalid parameters
    pub fn fit(dataset: &Dataset, params: &ForestParams) -> RegressionResult<Self> {
        if dataset.is_empty() {
            return Err(RegressionError::EmptyDataset);
        }
        if dataset.targets.n_cols() == 0 {
            return Err(RegressionError::DimensionMismatch {
                what: "target columns",
                expected: 1,
                actual: 0,
            });
        }

        let forests = (0..dataset.targets.n_cols())
            .map(|target| {
                let forest =
                    RandomForest::fit(&dataset.features, &dataset.targets.column(target), params)?;
                debug!(
                    target,
                    trees = forest.n_trees(),
                    nodes = forest.n_nodes(),
                    rows = dataset.len(),
                    "Fitted target forest"
                );
                Ok(forest)
            })
            .collect::<RegressionResult<Vec<_>>>()?;

        Ok(Self {
            n_features: dataset.features.n_cols(),
            params: *params,
            forests,
        })
    }

    /// Predict all targets for one row
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> Vec<f64> {
        self.forests
            .iter()
            .map(|forest| forest.predict_row(row))
            .collect()
    }

    /// Predict all targets for every row of `features`
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when the column count differs from training
    pub fn predict(&self, features: &Matrix) -> RegressionResult<Matrix> {
        if features.n_cols() != self.n_features {
            return Err(RegressionError::DimensionMismatch {
                what: "feature columns",
                expected: self.n_features,
                actual: features.n_cols(),
            });
        }
        let mut predictions = Matrix::new(self.n_outputs());
        for row in features.rows() {
            predictions.push_row(&self.predict_row(row))?;
        }
        Ok(predictions)
    }

    /// Number of input features
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of targets
    #[must_use]
    pub fn n_outputs(&self) -> usize {
        self.forests.len()
    }

    /// Total number of trees across all targets
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.forests.iter().map(RandomForest::n_trees).sum()
    }

    /// Per-target forests in target order
    #[must_use]
    pub fn forests(&self) -> &[RandomForest] {
        &self.forests
    }

    /// Hyperparameters the model was fitted with
    #[must_use]
    pub const fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Check structural soundness after deserialization
    ///
    /// # Errors
    ///
    /// Returns `InvalidModel` when there are no forests, a forest disagrees on
    /// the feature count, or any tree is malformed
    pub fn validate(&self) -> RegressionResult<()> {
        if self.forests.is_empty() {
            return Err(RegressionError::InvalidModel("model has no outputs".to_owned()));
        }
        for (target, forest) in self.forests.iter().enumerate() {
            if forest.n_features() != self.n_features {
                return Err(RegressionError::InvalidModel(format!(
                    "forest {target} expects {} features, model declares {}",
                    forest.n_features(),
                    self.n_features
                )));
            }
            forest.validate()?;
        }
        Ok(())
    }
}
