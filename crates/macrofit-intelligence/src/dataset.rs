// ABOUTME: Dense row-major matrix and feature/target dataset containers
// ABOUTME: Row selection helpers used by splitting, cross-validation, and bootstrap sampling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::error::{RegressionError, RegressionResult};

/// Dense row-major matrix of `f64`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    values: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl Matrix {
    /// Empty matrix with a fixed column count
    #[must_use]
    pub const fn new(n_cols: usize) -> Self {
        Self {
            values: Vec::new(),
            n_rows: 0,
            n_cols,
        }
    }

    /// Build from row slices
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if any row length differs from `n_cols`
    pub fn from_rows<R: AsRef<[f64]>>(n_cols: usize, rows: &[R]) -> RegressionResult<Self> {
        let mut matrix = Self::new(n_cols);
        matrix.values.reserve(rows.len() * n_cols);
        for row in rows {
            matrix.push_row(row.as_ref())?;
        }
        Ok(matrix)
    }

    /// Append one row
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the row length differs from the column count
    pub fn push_row(&mut self, row: &[f64]) -> RegressionResult<()> {
        if row.len() != self.n_cols {
            return Err(RegressionError::DimensionMismatch {
                what: "row length",
                expected: self.n_cols,
                actual: row.len(),
            });
        }
        self.values.extend_from_slice(row);
        self.n_rows += 1;
        Ok(())
    }

    /// Number of rows
    #[must_use]
    pub const fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    #[must_use]
    pub const fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// True when the matrix holds no rows
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Borrow row `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_rows`
    #[must_use]
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.n_cols;
        &self.values[start..start + self.n_cols]
    }

    /// Single cell
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.n_cols + col]
    }

    /// Copy out column `col`
    #[must_use]
    pub fn column(&self, col: usize) -> Vec<f64> {
        (0..self.n_rows).map(|row| self.get(row, col)).collect()
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.n_cols.max(1)).take(self.n_rows)
    }

    /// New matrix made of the given rows, in the given order
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut values = Vec::with_capacity(indices.len() * self.n_cols);
        for &index in indices {
            values.extend_from_slice(self.row(index));
        }
        Self {
            values,
            n_rows: indices.len(),
            n_cols: self.n_cols,
        }
    }

    /// Apply `f` to every value of column `col` in place
    pub fn map_column(&mut self, col: usize, f: impl Fn(f64) -> f64) {
        for row in 0..self.n_rows {
            let cell = &mut self.values[row * self.n_cols + col];
            *cell = f(*cell);
        }
    }
}

/// Paired feature and target matrices with equal row counts
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Feature matrix (`n_rows x n_features`)
    pub features: Matrix,
    /// Target matrix (`n_rows x n_outputs`)
    pub targets: Matrix,
}

impl Dataset {
    /// Pair features and targets
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` when the row counts differ
    pub fn new(features: Matrix, targets: Matrix) -> RegressionResult<Self> {
        if features.n_rows() != targets.n_rows() {
            return Err(RegressionError::DimensionMismatch {
                what: "target rows",
                expected: features.n_rows(),
                actual: targets.n_rows(),
            });
        }
        Ok(Self { features, targets })
    }

    /// Number of samples
    #[must_use]
    pub const fn len(&self) -> usize {
        self.features.n_rows()
    }

    /// True when there are no samples
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Subset of rows, in the given order
    #[must_use]
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            features: self.features.select_rows(indices),
            targets: self.targets.select_rows(indices),
        }
    }
}
