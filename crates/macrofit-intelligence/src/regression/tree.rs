// ABOUTME: CART regression tree grown on squared-error reduction
// ABOUTME: Flat node storage, iterative growth, structural validation for loaded models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Regression tree.
//!
//! Nodes live in a flat `Vec` with the root at index 0. Children always have a
//! higher index than their parent, which makes prediction a bounded walk and
//! lets [`RegressionTree::validate`] reject cyclic models read from disk.

use serde::{Deserialize, Serialize};

use crate::dataset::Matrix;
use crate::error::{RegressionError, RegressionResult};

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; `None` grows until leaves are pure or too small
    pub max_depth: Option<usize>,
    /// Minimum samples required to split an internal node
    pub min_samples_split: usize,
    /// Minimum samples required in each child
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

impl TreeParams {
    /// Reject limits that can never produce a split
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero depth limit or split minimum below 2
    pub fn validate(&self) -> RegressionResult<()> {
        if self.max_depth == Some(0) {
            return Err(RegressionError::InvalidParameter(
                "max_depth must be at least 1".to_owned(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(RegressionError::InvalidParameter(
                "min_samples_split must be at least 2".to_owned(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(RegressionError::InvalidParameter(
                "min_samples_leaf must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// A node of a fitted tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal split: go left when `features[feature] <= threshold`
    Split {
        /// Feature index
        feature: usize,
        /// Split threshold
        threshold: f64,
        /// Left child index
        left: u32,
        /// Right child index
        right: u32,
    },
    /// Terminal node holding the mean target of its samples
    Leaf {
        /// Predicted value
        value: f64,
    },
}

/// Best split found for one node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    score: f64,
}

/// Work item for iterative growth
struct PendingNode {
    index: usize,
    samples: Vec<usize>,
    depth: usize,
}

/// Fitted regression tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Grow a tree on `samples` (row indices into `features`, duplicates allowed)
    ///
    /// # Errors
    ///
    /// Returns an error for invalid parameters, no samples, or a target length
    /// that differs from the feature row count
    pub fn fit(
        features: &Matrix,
        targets: &[f64],
        samples: Vec<usize>,
        params: &TreeParams,
    ) -> RegressionResult<Self> {
        params.validate()?;
        if samples.is_empty() {
            return Err(RegressionError::EmptyDataset);
        }
        if targets.len() != features.n_rows() {
            return Err(RegressionError::DimensionMismatch {
                what: "target length",
                expected: features.n_rows(),
                actual: targets.len(),
            });
        }

        let mut nodes = vec![TreeNode::Leaf { value: 0.0 }];
        let mut stack = vec![PendingNode {
            index: 0,
            samples,
            depth: 0,
        }];

        while let Some(pending) = stack.pop() {
            let value = mean_target(targets, &pending.samples);
            let split = if Self::can_split(&pending, targets, params) {
                best_split(features, targets, &pending.samples, params.min_samples_leaf)
            } else {
                None
            };

            let Some(split) = split else {
                nodes[pending.index] = TreeNode::Leaf { value };
                continue;
            };

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = pending
                .samples
                .iter()
                .partition(|&&row| features.get(row, split.feature) <= split.threshold);

            let left = nodes.len();
            let right = left + 1;
            nodes.push(TreeNode::Leaf { value });
            nodes.push(TreeNode::Leaf { value });
            nodes[pending.index] = TreeNode::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: left as u32,
                right: right as u32,
            };

            let depth = pending.depth + 1;
            stack.push(PendingNode {
                index: right,
                samples: right_samples,
                depth,
            });
            stack.push(PendingNode {
                index: left,
                samples: left_samples,
                depth,
            });
        }

        Ok(Self { nodes })
    }

    fn can_split(pending: &PendingNode, targets: &[f64], params: &TreeParams) -> bool {
        let n = pending.samples.len();
        if n < params.min_samples_split || n < 2 * params.min_samples_leaf {
            return false;
        }
        if params.max_depth.is_some_and(|max| pending.depth >= max) {
            return false;
        }
        // Pure node
        let first = targets[pending.samples[0]];
        pending.samples.iter().any(|&row| targets[row] != first)
    }

    /// Predict one row
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[feature] <= threshold {
                        left as usize
                    } else {
                        right as usize
                    };
                }
            }
        }
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check structural soundness of a deserialized tree
    ///
    /// # Errors
    ///
    /// Returns `InvalidModel` for an empty tree, an out-of-range feature, a
    /// non-finite value, or a child index that does not point forward
    pub fn validate(&self, n_features: usize) -> RegressionResult<()> {
        if self.nodes.is_empty() {
            return Err(RegressionError::InvalidModel("tree has no nodes".to_owned()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Leaf { value } if !value.is_finite() => {
                    return Err(RegressionError::InvalidModel(format!(
                        "leaf {index} holds a non-finite value"
                    )));
                }
                TreeNode::Leaf { .. } => {}
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= n_features {
                        return Err(RegressionError::InvalidModel(format!(
                            "node {index} splits on feature {feature} but the model has {n_features}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(RegressionError::InvalidModel(format!(
                            "node {index} has a non-finite threshold"
                        )));
                    }
                    for child in [left as usize, right as usize] {
                        if child <= index || child >= self.nodes.len() {
                            return Err(RegressionError::InvalidModel(format!(
                                "node {index} has invalid child index {child}"
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn mean_target(targets: &[f64], samples: &[usize]) -> f64 {
    let sum: f64 = samples.iter().map(|&row| targets[row]).sum();
    sum / samples.len() as f64
}

/// Exhaustive search over all features for the split with the largest
/// squared-error reduction.
///
/// Maximizing `sum_l^2 / n_l + sum_r^2 / n_r` is equivalent to minimizing the
/// children's summed squared error. Ties keep the first candidate in feature
/// then threshold order.
fn best_split(
    features: &Matrix,
    targets: &[f64],
    samples: &[usize],
    min_samples_leaf: usize,
) -> Option<SplitCandidate> {
    let n = samples.len();
    let total: f64 = samples.iter().map(|&row| targets[row]).sum();
    let parent_score = total * total / n as f64;

    let mut best: Option<SplitCandidate> = None;
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

    for feature in 0..features.n_cols() {
        pairs.clear();
        pairs.extend(
            samples
                .iter()
                .map(|&row| (features.get(row, feature), targets[row])),
        );
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        for split_at in 1..n {
            left_sum += pairs[split_at - 1].1;
            let n_left = split_at;
            let n_right = n - split_at;
            if n_left < min_samples_leaf {
                continue;
            }
            if n_right < min_samples_leaf {
                break;
            }
            let (below, above) = (pairs[split_at - 1].0, pairs[split_at].0);
            if below >= above {
                continue;
            }

            let right_sum = total - left_sum;
            let score =
                left_sum * left_sum / n_left as f64 + right_sum * right_sum / n_right as f64;
            if best.map_or(true, |b| score > b.score) {
                let mut threshold = below + (above - below) / 2.0;
                if threshold >= above {
                    threshold = below;
                }
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    score,
                });
            }
        }
    }

    // Reject splits that do not reduce the error beyond rounding noise
    best.filter(|b| b.score > parent_score + parent_score.abs() * 1e-12)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Matrix, Vec<f64>) {
        let rows: Vec<[f64; 1]> = (0..10).map(|i| [f64::from(i)]).collect();
        let targets = (0..10).map(|i| if i < 5 { 1.0 } else { 3.0 }).collect();
        (Matrix::from_rows(1, &rows).unwrap(), targets)
    }

    #[test]
    fn test_step_function_is_learned_exactly() {
        let (features, targets) = step_data();
        let tree =
            RegressionTree::fit(&features, &targets, (0..10).collect(), &TreeParams::default())
                .unwrap();

        assert_eq!(tree.node_count(), 3);
        assert!((tree.predict_row(&[2.0]) - 1.0).abs() < f64::EPSILON);
        assert!((tree.predict_row(&[7.0]) - 3.0).abs() < f64::EPSILON);
        assert!(tree.validate(1).is_ok());
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let rows: Vec<[f64; 1]> = (0..32).map(|i| [f64::from(i)]).collect();
        let targets: Vec<f64> = (0..32).map(f64::from).collect();
        let features = Matrix::from_rows(1, &rows).unwrap();
        let params = TreeParams {
            max_depth: Some(2),
            ..TreeParams::default()
        };
        let tree = RegressionTree::fit(&features, &targets, (0..32).collect(), &params).unwrap();
        // Two levels of splits give three internal nodes and four leaves
        assert_eq!(tree.node_count(), 7);
        assert!((tree.predict_row(&[0.0]) - tree.predict_row(&[7.0])).abs() < f64::EPSILON);
        assert!(tree.predict_row(&[0.0]) < tree.predict_row(&[31.0]));
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = RegressionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                TreeNode::Leaf { value: 1.0 },
            ],
        };
        assert!(matches!(tree.validate(1), Err(RegressionError::InvalidModel(_))));
    }
}
