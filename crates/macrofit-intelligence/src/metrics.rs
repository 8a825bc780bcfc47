// ABOUTME: Regression evaluation metrics (MSE, R², explained variance)
// ABOUTME: Per-target scores and uniform averages over multi-output predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Evaluation metrics for model quality.
//!
//! Degenerate targets (zero variance) follow the usual convention: a perfect
//! prediction scores 1.0, anything else 0.0, so averages stay finite.

use serde::{Deserialize, Serialize};

use crate::dataset::Matrix;
use crate::error::{RegressionError, RegressionResult};

fn check_lengths(predicted: &[f64], actual: &[f64]) -> RegressionResult<()> {
    if predicted.len() != actual.len() {
        return Err(RegressionError::DimensionMismatch {
            what: "prediction length",
            expected: actual.len(),
            actual: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }
    Ok(())
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    values.sum::<f64>() / n as f64
}

fn finite_ratio_score(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if numerator == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - numerator / denominator
    }
}

// =============================================================================
// MSE (Mean Squared Error)
// =============================================================================

/// Mean squared error: `mean((actual - predicted)^2)`. Lower is better.
///
/// # Errors
///
/// Returns an error for empty or mismatched inputs
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> RegressionResult<f64> {
    check_lengths(predicted, actual)?;
    Ok(mean(
        predicted
            .iter()
            .zip(actual)
            .map(|(p, a)| (a - p) * (a - p)),
        actual.len(),
    ))
}

// =============================================================================
// R² (Coefficient of determination)
// =============================================================================

/// Coefficient of determination: `1 - SS_res / SS_tot`. Higher is better.
///
/// # Errors
///
/// Returns an error for empty or mismatched inputs
pub fn r2_score(predicted: &[f64], actual: &[f64]) -> RegressionResult<f64> {
    check_lengths(predicted, actual)?;
    let n = actual.len();
    let actual_mean = mean(actual.iter().copied(), n);
    let ss_res: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (a - p) * (a - p))
        .sum();
    let ss_tot: f64 = actual
        .iter()
        .map(|a| (a - actual_mean) * (a - actual_mean))
        .sum();
    Ok(finite_ratio_score(ss_res, ss_tot))
}

// =============================================================================
// Explained variance
// =============================================================================

/// Explained variance: `1 - Var(actual - predicted) / Var(actual)`.
///
/// Unlike R², a constant bias in the predictions is not penalized.
///
/// # Errors
///
/// Returns an error for empty or mismatched inputs
pub fn explained_variance_score(predicted: &[f64], actual: &[f64]) -> RegressionResult<f64> {
    check_lengths(predicted, actual)?;
    let n = actual.len();
    let residuals: Vec<f64> = predicted.iter().zip(actual).map(|(p, a)| a - p).collect();
    let residual_mean = mean(residuals.iter().copied(), n);
    let residual_var = mean(
        residuals
            .iter()
            .map(|r| (r - residual_mean) * (r - residual_mean)),
        n,
    );
    let actual_mean = mean(actual.iter().copied(), n);
    let actual_var = mean(
        actual.iter().map(|a| (a - actual_mean) * (a - actual_mean)),
        n,
    );
    Ok(finite_ratio_score(residual_var, actual_var))
}

// =============================================================================
// Multi-output aggregation
// =============================================================================

/// Scores for one target column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetScores {
    /// Mean squared error
    pub mse: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Explained variance
    pub explained_variance: f64,
}

/// Per-target scores plus their uniform average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiOutputScores {
    /// Scores per target column, in column order
    pub per_target: Vec<TargetScores>,
    /// Uniform average over targets
    pub average: TargetScores,
}

impl MultiOutputScores {
    /// Score predicted against actual, column by column
    ///
    /// # Errors
    ///
    /// Returns an error if the matrices differ in shape or are empty
    pub fn compute(predicted: &Matrix, actual: &Matrix) -> RegressionResult<Self> {
        if predicted.n_cols() != actual.n_cols() {
            return Err(RegressionError::DimensionMismatch {
                what: "output columns",
                expected: actual.n_cols(),
                actual: predicted.n_cols(),
            });
        }
        if actual.n_cols() == 0 {
            return Err(RegressionError::EmptyDataset);
        }

        let per_target = (0..actual.n_cols())
            .map(|col| {
                let p = predicted.column(col);
                let a = actual.column(col);
                Ok(TargetScores {
                    mse: mean_squared_error(&p, &a)?,
                    r2: r2_score(&p, &a)?,
                    explained_variance: explained_variance_score(&p, &a)?,
                })
            })
            .collect::<RegressionResult<Vec<_>>>()?;

        let n = per_target.len();
        let average = TargetScores {
            mse: mean(per_target.iter().map(|s| s.mse), n),
            r2: mean(per_target.iter().map(|s| s.r2), n),
            explained_variance: mean(per_target.iter().map(|s| s.explained_variance), n),
        };

        Ok(Self {
            per_target,
            average,
        })
    }
}

/// Uniform-average R² across all output columns
///
/// # Errors
///
/// Returns an error if the matrices differ in shape or are empty
pub fn uniform_r2(predicted: &Matrix, actual: &Matrix) -> RegressionResult<f64> {
    Ok(MultiOutputScores::compute(predicted, actual)?.average.r2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_prediction() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        assert!(mean_squared_error(&actual, &actual).unwrap().abs() < f64::EPSILON);
        assert!((r2_score(&actual, &actual).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!((explained_variance_score(&actual, &actual).unwrap() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_prediction_scores_zero_r2() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.5; 4];
        assert!(r2_score(&predicted, &actual).unwrap().abs() < 1e-12);
        assert!((mean_squared_error(&predicted, &actual).unwrap() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_bias_penalized_by_r2_not_explained_variance() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [2.0, 3.0, 4.0, 5.0];
        assert!((explained_variance_score(&predicted, &actual).unwrap() - 1.0).abs() < 1e-12);
        assert!((r2_score(&predicted, &actual).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_constant_target_convention() {
        let actual = [5.0, 5.0, 5.0];
        assert!((r2_score(&actual, &actual).unwrap() - 1.0).abs() < f64::EPSILON);
        assert!(r2_score(&[4.0, 5.0, 6.0], &actual).unwrap().abs() < f64::EPSILON);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(matches!(
            mean_squared_error(&[1.0], &[1.0, 2.0]),
            Err(RegressionError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            r2_score(&[], &[]),
            Err(RegressionError::EmptyDataset)
        ));
    }
}
