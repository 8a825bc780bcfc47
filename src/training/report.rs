// ABOUTME: Training report persisted next to the artifact and the predicted-vs-actual calorie CSV
// ABOUTME: Also re-evaluates a saved artifact on the reproduced held-out split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use macrofit_core::constants::model_contract::CALORIES_INDEX;
use macrofit_core::constants::paths::REPORT_SUFFIX;
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::CalorieTransform;
use macrofit_intelligence::model_selection::CandidateScore;
use macrofit_intelligence::{train_test_split, ForestParams, Matrix, MultiOutputScores};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cleaning::{filter_outliers, read_cleaned_csv, to_dataset, CleanRecord};
use crate::config::environment::PathsConfig;
use crate::config::training::TrainingConfig;
use crate::prediction::{EvaluationSummary, SplitSettings, TrainedArtifact};

/// Row counts after each data stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowCounts {
    /// Rows after the join (or rows read from a cleaned CSV)
    pub joined: usize,
    /// Rows with every field present
    pub complete: usize,
    /// Rows kept by the outlier filter
    pub filtered: usize,
    /// Training partition
    pub train: usize,
    /// Held-out partition
    pub test: usize,
}

/// Summary of one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Version of the artifact this report belongs to
    pub model_version: String,
    /// Completion time
    pub created_at: DateTime<Utc>,
    /// Calorie transform used for fitting
    pub calorie_transform: CalorieTransform,
    /// Stage row counts
    pub rows: RowCounts,
    /// Every grid candidate with its fold scores
    pub grid_search: Vec<CandidateScore>,
    /// Selected hyperparameters
    pub best_params: ForestParams,
    /// Held-out evaluation
    pub evaluation: EvaluationSummary,
}

impl TrainingReport {
    /// `<artifact>.report.json` next to the artifact
    #[must_use]
    pub fn path_for(artifact_path: &Path) -> PathBuf {
        let mut name = artifact_path.as_os_str().to_owned();
        name.push(REPORT_SUFFIX);
        PathBuf::from(name)
    }

    /// Write as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns `InternalError` on I/O failure
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| {
            AppError::internal(format!("cannot write report {}", path.display())).with_source(e)
        })?;
        info!(path = %path.display(), "Training report written");
        Ok(())
    }
}

/// One held-out participant's calories
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaloriePrediction {
    /// Reported intake (kcal)
    pub actual_calories: f64,
    /// Model prediction (kcal)
    pub predicted_calories: f64,
}

/// Metrics and per-row calories from re-scoring an artifact
#[derive(Debug, Clone)]
pub struct ArtifactEvaluation {
    /// Test-set metrics with calories in kcal
    pub scores: MultiOutputScores,
    /// Calorie comparison, in test order
    pub calories: Vec<CaloriePrediction>,
}

/// Map the calorie column of `matrix` back to kcal
pub(crate) fn inverse_calories(matrix: &mut Matrix, transform: CalorieTransform) {
    matrix.map_column(CALORIES_INDEX, |value| transform.inverse(value));
}

/// Re-score `artifact` on the held-out split of `records`
///
/// `records` must be the filtered rows the artifact was trained from; the
/// split is reproduced from the seed and test fraction recorded in the
/// artifact.
///
/// # Errors
///
/// Returns `TrainingError` if the split cannot be formed or the model does
/// not accept the data
pub fn evaluate_artifact(
    artifact: &TrainedArtifact,
    records: &[CleanRecord],
) -> AppResult<ArtifactEvaluation> {
    let dataset = to_dataset(records, artifact.calorie_transform)?;
    let split = train_test_split(dataset.len(), artifact.test_fraction, artifact.seed)?;
    let test = dataset.select(&split.test);

    let mut predicted = artifact.model.predict(&test.features)?;
    let mut actual = test.targets;
    inverse_calories(&mut predicted, artifact.calorie_transform);
    inverse_calories(&mut actual, artifact.calorie_transform);

    let scores = MultiOutputScores::compute(&predicted, &actual)?;
    let calories = actual
        .column(CALORIES_INDEX)
        .into_iter()
        .zip(predicted.column(CALORIES_INDEX))
        .map(|(actual_calories, predicted_calories)| CaloriePrediction {
            actual_calories,
            predicted_calories,
        })
        .collect();

    Ok(ArtifactEvaluation { scores, calories })
}

/// Load the artifact at `paths.artifact_path` and re-score it on the cleaned
/// CSV at `paths.cleaned_data_path`
///
/// Rows are filtered and split with the settings recorded in the artifact.
/// `current` is only compared against them; a mismatch is logged.
///
/// # Errors
///
/// Returns `ArtifactLoadError` for a bad artifact, `DataLoadError` for a bad
/// cleaned CSV, or `TrainingError` if the split cannot be reproduced
pub fn evaluate_saved_artifact(
    paths: &PathsConfig,
    current: &TrainingConfig,
) -> AppResult<(TrainedArtifact, ArtifactEvaluation)> {
    let artifact = TrainedArtifact::load(&paths.artifact_path)?;
    let recorded = artifact.split_settings();
    if recorded != SplitSettings::from_config(current) {
        warn!(
            recorded.test_fraction = recorded.test_fraction,
            recorded.seed = recorded.seed,
            current.test_fraction = current.test_fraction,
            current.seed = current.seed,
            "Configured split differs from the artifact, using the artifact's settings"
        );
    }

    let records = filter_outliers(
        read_cleaned_csv(&paths.cleaned_data_path)?,
        recorded.calorie_filter,
        artifact.calorie_transform,
    );
    let evaluation = evaluate_artifact(&artifact, &records)?;
    Ok((artifact, evaluation))
}

/// Write `predicted_vs_actual_calories_<timestamp>.csv` into `dir`
///
/// # Errors
///
/// Returns `InternalError` when the directory or file cannot be written
pub fn write_calorie_comparison(
    dir: &Path,
    rows: &[CaloriePrediction],
    timestamp: DateTime<Utc>,
) -> AppResult<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::internal(format!("cannot create {}", dir.display())).with_source(e)
    })?;
    let path = dir.join(format!(
        "predicted_vs_actual_calories_{}.csv",
        timestamp.format("%Y%m%d_%H%M%S")
    ));

    let file = File::create(&path).map_err(|e| {
        AppError::internal(format!("cannot create {}", path.display())).with_source(e)
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in rows {
        writer.serialize(row).map_err(|e| {
            AppError::internal(format!("cannot write {}", path.display())).with_source(e)
        })?;
    }
    writer.flush().map_err(|e| {
        AppError::internal(format!("cannot flush {}", path.display())).with_source(e)
    })?;

    info!(path = %path.display(), rows = rows.len(), "Calorie comparison written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_appends_suffix() {
        assert_eq!(
            TrainingReport::path_for(Path::new("model/macro_predictor.json")),
            PathBuf::from("model/macro_predictor.json.report.json")
        );
    }

    #[test]
    fn test_inverse_calories_only_touches_first_column() {
        let mut matrix = Matrix::from_rows(4, &[[2200_f64.ln(), 90.0, 250.0, 70.0]]).unwrap();
        inverse_calories(&mut matrix, CalorieTransform::Log);
        assert!((matrix.get(0, 0) - 2200.0).abs() < 1e-9);
        assert!((matrix.get(0, 1) - 90.0).abs() < f64::EPSILON);
    }
}
