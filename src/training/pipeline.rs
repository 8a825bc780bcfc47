// ABOUTME: Offline training pipeline from survey extracts to a serialized artifact and report
// ABOUTME: Stages run in fixed order and log their row counts on entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Training pipeline
//!
//! `LoadRaw → Join → Select → DropMissing → FilterOutliers → Split → Fit →
//! Evaluate → Serialize`
//!
//! Identical input data and seed produce identical forests. Any failure
//! aborts the run before the artifact is written.

use std::fmt;
use std::path::{Path, PathBuf};

use macrofit_core::errors::{AppError, AppResult};
use macrofit_intelligence::{
    cross_val_score, train_test_split, ForestParams, GridSearch, KFold, MultiOutputScores,
    ParamGrid, TreeParams,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::cleaning::{drop_missing, filter_outliers, read_cleaned_csv, to_dataset, CleanRecord};
use super::report::{inverse_calories, RowCounts, TrainingReport};
use super::survey::RawSurvey;
use crate::config::training::TrainingConfig;
use crate::logging::AppLogger;
use crate::prediction::{EvaluationSummary, SplitSettings, TrainedArtifact};

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Read the raw extracts
    LoadRaw,
    /// Inner join on participant id
    Join,
    /// Keep feature and target columns
    Select,
    /// Drop rows with missing values
    DropMissing,
    /// Drop calorie outliers
    FilterOutliers,
    /// Train/test split
    Split,
    /// Grid search and refit
    Fit,
    /// Held-out evaluation
    Evaluate,
    /// Write artifact and report
    Serialize,
}

impl PipelineStage {
    /// Stage name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoadRaw => "load_raw",
            Self::Join => "join",
            Self::Select => "select",
            Self::DropMissing => "drop_missing",
            Self::FilterOutliers => "filter_outliers",
            Self::Split => "split",
            Self::Fit => "fit",
            Self::Evaluate => "evaluate",
            Self::Serialize => "serialize",
        }
    }

    fn enter(self, rows: usize) {
        AppLogger::log_pipeline_stage(self.as_str(), rows);
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where training data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Directory with the raw survey extracts
    Raw(PathBuf),
    /// Previously cleaned CSV
    Cleaned(PathBuf),
}

/// Cleaned rows plus the counts seen along the way
#[derive(Debug, Clone)]
pub struct CleanedData {
    /// Rows ready for fitting
    pub records: Vec<CleanRecord>,
    /// Counts after join, drop-missing, and filtering
    pub rows: RowCounts,
}

/// Fitted artifact and its report
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Artifact ready to serialize
    pub artifact: TrainedArtifact,
    /// Run report
    pub report: TrainingReport,
}

/// Training pipeline bound to one configuration
#[derive(Debug, Clone)]
pub struct TrainingPipeline {
    config: TrainingConfig,
}

impl TrainingPipeline {
    /// Create a pipeline after validating `config`
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for invalid settings
    pub fn new(config: TrainingConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run every stage up to and including the outlier filter
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError` for missing files or columns
    pub fn clean(&self, source: &DataSource) -> AppResult<CleanedData> {
        match source {
            DataSource::Raw(dir) => {
                PipelineStage::LoadRaw.enter(0);
                let survey = RawSurvey::load(dir)?;

                PipelineStage::Join.enter(survey.demographics.len());
                let joined = survey.join();

                PipelineStage::Select.enter(joined.len());
                PipelineStage::DropMissing.enter(joined.len());
                let complete = drop_missing(&joined);

                Ok(self.filter(joined.len(), complete))
            }
            DataSource::Cleaned(path) => {
                PipelineStage::LoadRaw.enter(0);
                let records = read_cleaned_csv(path)?;
                let count = records.len();
                Ok(self.filter(count, records))
            }
        }
    }

    fn filter(&self, joined: usize, complete: Vec<CleanRecord>) -> CleanedData {
        let complete_count = complete.len();
        PipelineStage::FilterOutliers.enter(complete_count);
        let records = filter_outliers(
            complete,
            self.config.calorie_filter,
            self.config.calorie_transform,
        );
        CleanedData {
            rows: RowCounts {
                joined,
                complete: complete_count,
                filtered: records.len(),
                ..RowCounts::default()
            },
            records,
        }
    }

    fn param_grid(&self) -> ParamGrid {
        ParamGrid {
            n_estimators: self.config.n_estimators_grid.clone(),
            max_depth: self.config.max_depth_grid.clone(),
            base: ForestParams {
                n_estimators: self.config.n_estimators_grid.first().copied().unwrap_or(1),
                tree: TreeParams {
                    max_depth: None,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                },
                bootstrap: true,
                seed: self.config.seed,
            },
        }
    }

    /// Split, fit, and evaluate on cleaned rows
    ///
    /// # Errors
    ///
    /// Returns `TrainingError` when there are too few rows for the split or
    /// folds, or fitting fails
    pub fn train(&self, cleaned: &CleanedData) -> AppResult<TrainingOutcome> {
        let transform = self.config.calorie_transform;
        let dataset = to_dataset(&cleaned.records, transform)?;

        PipelineStage::Split.enter(dataset.len());
        let split = train_test_split(dataset.len(), self.config.test_fraction, self.config.seed)?;
        let train = dataset.select(&split.train);
        let test = dataset.select(&split.test);

        PipelineStage::Fit.enter(train.len());
        let search = GridSearch::new(self.param_grid(), KFold::new(self.config.cv_folds)?)
            .fit(&train)?;
        let best_params = *search.best_params();

        PipelineStage::Evaluate.enter(test.len());
        let mut predicted = search.model.predict(&test.features)?;
        let mut actual = test.targets.clone();
        inverse_calories(&mut predicted, transform);
        inverse_calories(&mut actual, transform);
        let test_scores = MultiOutputScores::compute(&predicted, &actual)?;

        let cross_val_r2 = if self.config.cross_val_folds == 0 {
            None
        } else {
            let scores =
                cross_val_score(&dataset, &best_params, &KFold::new(self.config.cross_val_folds)?)?;
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        info!(
            mse = test_scores.average.mse,
            r2 = test_scores.average.r2,
            explained_variance = test_scores.average.explained_variance,
            cross_val_r2 = ?cross_val_r2,
            "Held-out evaluation"
        );

        let evaluation = EvaluationSummary {
            train_rows: train.len(),
            test_rows: test.len(),
            test_scores,
            grid_search_r2: search.best_score(),
            cross_val_r2,
        };
        let artifact = TrainedArtifact::new(
            search.model,
            transform,
            SplitSettings::from_config(&self.config),
            Some(evaluation.clone()),
        );
        let report = TrainingReport {
            model_version: artifact.model_version.clone(),
            created_at: artifact.created_at,
            calorie_transform: transform,
            rows: RowCounts {
                train: train.len(),
                test: test.len(),
                ..cleaned.rows
            },
            grid_search: search.candidates,
            best_params,
            evaluation,
        };

        Ok(TrainingOutcome { artifact, report })
    }

    /// Full run: clean, train, then write the artifact and its report
    ///
    /// # Errors
    ///
    /// Propagates any stage error; nothing is written on failure
    pub fn run(&self, source: &DataSource, artifact_path: &Path) -> AppResult<TrainingOutcome> {
        let cleaned = self.clean(source)?;
        if cleaned.records.is_empty() {
            return Err(AppError::data_load("no usable rows after cleaning"));
        }
        let outcome = self.train(&cleaned)?;

        PipelineStage::Serialize.enter(cleaned.records.len());
        outcome.artifact.save(artifact_path)?;
        outcome
            .report
            .save(&TrainingReport::path_for(artifact_path))?;
        Ok(outcome)
    }
}
