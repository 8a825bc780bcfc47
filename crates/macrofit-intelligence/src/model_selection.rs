// ABOUTME: Train/test splitting, k-fold cross-validation, and hyperparameter grid search
// ABOUTME: Seeded and order-stable so repeated runs select the same model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model selection utilities.
//!
//! Grid candidates are scored by uniform-average R² over unshuffled k-fold
//! splits. The best mean score wins; ties keep the earliest candidate.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dataset::Dataset;
use crate::error::{RegressionError, RegressionResult};
use crate::metrics::uniform_r2;
use crate::regression::{ForestParams, MultiOutputForest};

// =============================================================================
// Train/test split
// =============================================================================

/// Row indices of a train/test partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    /// Training rows
    pub train: Vec<usize>,
    /// Held-out rows
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with `seed` and hold out `ceil(n * test_fraction)` rows
///
/// # Errors
///
/// Returns `InvalidParameter` if the fraction is outside `(0, 1)` or either
/// side of the split would be empty
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> RegressionResult<SplitIndices> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(RegressionError::InvalidParameter(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }
    let n_test = (n as f64 * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(RegressionError::InvalidParameter(format!(
            "cannot hold out {n_test} of {n} rows"
        )));
    }

    let mut permutation: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    Ok(SplitIndices {
        train,
        test: permutation,
    })
}

// =============================================================================
// K-fold
// =============================================================================

/// Contiguous, unshuffled k-fold splitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KFold {
    n_splits: usize,
}

impl KFold {
    /// Create a splitter
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for fewer than two folds
    pub fn new(n_splits: usize) -> RegressionResult<Self> {
        if n_splits < 2 {
            return Err(RegressionError::InvalidParameter(format!(
                "k-fold needs at least 2 splits, got {n_splits}"
            )));
        }
        Ok(Self { n_splits })
    }

    /// Number of folds
    #[must_use]
    pub const fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Partition `0..n` into folds; the first `n % k` folds get one extra row
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when there are fewer rows than folds
    pub fn split(&self, n: usize) -> RegressionResult<Vec<SplitIndices>> {
        if n < self.n_splits {
            return Err(RegressionError::InvalidParameter(format!(
                "cannot split {n} rows into {} folds",
                self.n_splits
            )));
        }
        let base = n / self.n_splits;
        let extra = n % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < extra);
            let end = start + size;
            folds.push(SplitIndices {
                train: (0..start).chain(end..n).collect(),
                test: (start..end).collect(),
            });
            start = end;
        }
        Ok(folds)
    }
}

/// Uniform R² of `params` on every fold of `dataset`
///
/// # Errors
///
/// Returns an error if the folds cannot be formed or any fit fails
pub fn cross_val_score(
    dataset: &Dataset,
    params: &ForestParams,
    folds: &KFold,
) -> RegressionResult<Vec<f64>> {
    folds
        .split(dataset.len())?
        .iter()
        .map(|fold| {
            let train = dataset.select(&fold.train);
            let test = dataset.select(&fold.test);
            let model = MultiOutputForest::fit(&train, params)?;
            uniform_r2(&model.predict(&test.features)?, &test.targets)
        })
        .collect()
}

// =============================================================================
// Grid search
// =============================================================================

/// Hyperparameter grid over tree count and depth
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamGrid {
    /// Candidate tree counts
    pub n_estimators: Vec<usize>,
    /// Candidate depth limits (`None` = unlimited)
    pub max_depth: Vec<Option<usize>>,
    /// Settings shared by every candidate
    pub base: ForestParams,
}

impl ParamGrid {
    /// Expand into concrete candidates, depth-major then tree count
    #[must_use]
    pub fn candidates(&self) -> Vec<ForestParams> {
        self.max_depth
            .iter()
            .flat_map(|&max_depth| {
                self.n_estimators.iter().map(move |&n_estimators| {
                    let mut params = self.base;
                    params.n_estimators = n_estimators;
                    params.tree.max_depth = max_depth;
                    params
                })
            })
            .collect()
    }
}

/// Cross-validated score of one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Candidate hyperparameters
    pub params: ForestParams,
    /// R² per fold
    pub fold_scores: Vec<f64>,
    /// Mean of `fold_scores`
    pub mean_score: f64,
}

/// Outcome of a grid search with the winner refitted on all rows
#[derive(Debug, Clone)]
pub struct GridSearchResult {
    /// Every candidate in evaluation order
    pub candidates: Vec<CandidateScore>,
    /// Index into `candidates` of the winner
    pub best_index: usize,
    /// Winner refitted on the full dataset
    pub model: MultiOutputForest,
}

impl GridSearchResult {
    /// Hyperparameters of the selected candidate
    #[must_use]
    pub fn best_params(&self) -> &ForestParams {
        &self.candidates[self.best_index].params
    }

    /// Mean cross-validated score of the selected candidate
    #[must_use]
    pub fn best_score(&self) -> f64 {
        self.candidates[self.best_index].mean_score
    }
}

/// Exhaustive grid search scored by k-fold uniform R²
#[derive(Debug, Clone)]
pub struct GridSearch {
    grid: ParamGrid,
    folds: KFold,
}

impl GridSearch {
    /// Build a search over `grid` with `folds`
    #[must_use]
    pub const fn new(grid: ParamGrid, folds: KFold) -> Self {
        Self { grid, folds }
    }

    /// Score every candidate, then refit the best on the full dataset
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for an empty grid, or any fold/fit error
    pub fn fit(&self, dataset: &Dataset) -> RegressionResult<GridSearchResult> {
        let candidates = self.grid.candidates();
        if candidates.is_empty() {
            return Err(RegressionError::InvalidParameter(
                "parameter grid is empty".to_owned(),
            ));
        }

        let mut scored: Vec<CandidateScore> = Vec::with_capacity(candidates.len());
        let mut best_index = 0;
        for (index, params) in candidates.into_iter().enumerate() {
            let fold_scores = cross_val_score(dataset, &params, &self.folds)?;
            let mean_score = fold_scores.iter().sum::<f64>() / fold_scores.len() as f64;
            debug!(
                index,
                n_estimators = params.n_estimators,
                max_depth = ?params.tree.max_depth,
                mean_score,
                "Scored grid candidate"
            );
            if index > 0 && mean_score > scored[best_index].mean_score {
                best_index = index;
            }
            scored.push(CandidateScore {
                params,
                fold_scores,
                mean_score,
            });
        }

        let best = scored[best_index].params;
        info!(
            n_estimators = best.n_estimators,
            max_depth = ?best.tree.max_depth,
            score = scored[best_index].mean_score,
            "Grid search selected candidate"
        );
        let model = MultiOutputForest::fit(dataset, &best)?;

        Ok(GridSearchResult {
            candidates: scored,
            best_index,
            model,
        })
    }
}
