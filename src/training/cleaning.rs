// ABOUTME: Cleaning stages between the raw join and model fitting
// ABOUTME: Column selection, missing-value removal, calorie outlier filter, cleaned CSV I/O
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs::{self, File};
use std::path::Path;

use macrofit_core::constants::model_contract::{FEATURE_COUNT, TARGET_COUNT};
use macrofit_core::constants::sex_encoding::SEX_ENCODING;
use macrofit_core::errors::{AppError, AppResult};
use macrofit_core::models::CalorieTransform;
use macrofit_intelligence::{Dataset, Matrix};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::survey::SurveyRecord;
use crate::config::training::CalorieRange;

/// Complete participant row, as written to the cleaned CSV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanRecord {
    /// Age in years
    #[serde(rename = "RIDAGEYR")]
    pub age: f64,
    /// Sex code (1 male, 2 female)
    #[serde(rename = "RIAGENDR")]
    pub sex_code: f64,
    /// Weight in kg
    #[serde(rename = "BMXWT")]
    pub weight_kg: f64,
    /// Height in cm
    #[serde(rename = "BMXHT")]
    pub height_cm: f64,
    /// Energy intake in kcal
    #[serde(rename = "DR1TKCAL")]
    pub calories: f64,
    /// Protein in g
    #[serde(rename = "DR1TPROT")]
    pub protein_g: f64,
    /// Carbohydrate in g
    #[serde(rename = "DR1TCARB")]
    pub carbs_g: f64,
    /// Total fat in g
    #[serde(rename = "DR1TTFAT")]
    pub fat_g: f64,
    /// Minutes of sedentary activity, when the activity extract was joined
    #[serde(rename = "PAD680", default)]
    pub activity_minutes: Option<f64>,
}

impl CleanRecord {
    /// Model features `[age, sex_code, weight_kg, height_cm]`
    #[must_use]
    pub const fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.age, self.sex_code, self.weight_kg, self.height_cm]
    }

    /// Targets `[calories, protein, carbs, fat]` in kcal and grams
    #[must_use]
    pub const fn targets(&self) -> [f64; TARGET_COUNT] {
        [self.calories, self.protein_g, self.carbs_g, self.fat_g]
    }
}

fn is_known_sex_code(code: f64) -> bool {
    SEX_ENCODING
        .iter()
        .any(|(_, known)| f64::from(*known) == code)
}

/// Keep rows with every feature and target present and a known sex code
#[must_use]
pub fn drop_missing(records: &[SurveyRecord]) -> Vec<CleanRecord> {
    let cleaned: Vec<CleanRecord> = records
        .iter()
        .filter_map(|r| {
            Some(CleanRecord {
                age: r.age?,
                sex_code: r.sex_code.filter(|code| is_known_sex_code(*code))?,
                weight_kg: r.weight_kg?,
                height_cm: r.height_cm?,
                calories: r.calories?,
                protein_g: r.protein_g?,
                carbs_g: r.carbs_g?,
                fat_g: r.fat_g?,
                activity_minutes: r.activity_minutes,
            })
        })
        .collect();
    debug!(
        before = records.len(),
        after = cleaned.len(),
        "Dropped incomplete rows"
    );
    cleaned
}

/// Drop calorie outliers; with the log transform, non-positive calories are
/// dropped even when the range filter is disabled
#[must_use]
pub fn filter_outliers(
    records: Vec<CleanRecord>,
    range: Option<CalorieRange>,
    transform: CalorieTransform,
) -> Vec<CleanRecord> {
    let before = records.len();
    let kept: Vec<CleanRecord> = records
        .into_iter()
        .filter(|r| range.map_or(true, |range| range.contains(r.calories)))
        .filter(|r| transform != CalorieTransform::Log || r.calories > 0.0)
        .collect();
    debug!(before, after = kept.len(), "Filtered calorie outliers");
    kept
}

/// Build the fitting dataset, mapping calories into training space
///
/// # Errors
///
/// Returns `TrainingError` if the transformed targets are not finite
pub fn to_dataset(records: &[CleanRecord], transform: CalorieTransform) -> AppResult<Dataset> {
    let mut features = Matrix::new(FEATURE_COUNT);
    let mut targets = Matrix::new(TARGET_COUNT);
    for record in records {
        let mut target = record.targets();
        target[0] = transform.forward(target[0]);
        if !target[0].is_finite() {
            return Err(AppError::training(format!(
                "calorie value {} is not valid under the {transform} transform",
                record.calories
            )));
        }
        if record
            .features()
            .iter()
            .chain(&target[1..])
            .any(|value| !value.is_finite())
        {
            return Err(AppError::training(format!(
                "non-finite feature or target in row {record:?}"
            )));
        }
        features.push_row(&record.features())?;
        targets.push_row(&target)?;
    }
    Ok(Dataset::new(features, targets)?)
}

/// Write records to `path` with survey column names
///
/// # Errors
///
/// Returns `InternalError` when the file cannot be written
pub fn write_cleaned_csv(path: &Path, records: &[CleanRecord]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::internal(format!("cannot create {}", parent.display())).with_source(e)
        })?;
    }
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::internal(format!("cannot create {}", path.display())).with_source(e)
    })?;
    for record in records {
        writer.serialize(record).map_err(|e| {
            AppError::internal(format!("cannot write {}", path.display())).with_source(e)
        })?;
    }
    writer.flush().map_err(|e| {
        AppError::internal(format!("cannot flush {}", path.display())).with_source(e)
    })?;
    info!(path = %path.display(), rows = records.len(), "Cleaned dataset written");
    Ok(())
}

/// Read a cleaned dataset written by [`write_cleaned_csv`]
///
/// # Errors
///
/// Returns `DataLoadError` if the file is missing, a column is absent, a
/// value does not parse or is not finite, or a sex code is unknown
pub fn read_cleaned_csv(path: &Path) -> AppResult<Vec<CleanRecord>> {
    let file = File::open(path).map_err(|e| {
        AppError::data_load(format!("cannot open cleaned dataset {}", path.display()))
            .with_source(e)
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);
    reader
        .deserialize()
        .enumerate()
        .map(|(line, record)| {
            let record: CleanRecord = record.map_err(|e| {
                AppError::data_load(format!(
                    "invalid row {} in {}",
                    line + 2,
                    path.display()
                ))
                .with_source(e)
            })?;
            check_record(&record).map_err(|problem| {
                AppError::data_load(format!(
                    "invalid row {} in {}: {problem}",
                    line + 2,
                    path.display()
                ))
            })?;
            Ok(record)
        })
        .collect()
}

/// Apply the raw-path guarantees to a row read back from a cleaned CSV
fn check_record(record: &CleanRecord) -> Result<(), String> {
    let named = [
        ("RIDAGEYR", record.age),
        ("RIAGENDR", record.sex_code),
        ("BMXWT", record.weight_kg),
        ("BMXHT", record.height_cm),
        ("DR1TKCAL", record.calories),
        ("DR1TPROT", record.protein_g),
        ("DR1TCARB", record.carbs_g),
        ("DR1TTFAT", record.fat_g),
    ];
    if let Some((column, value)) = named.iter().find(|(_, value)| !value.is_finite()) {
        return Err(format!("{column} is not a finite number ({value})"));
    }
    if record.activity_minutes.is_some_and(|minutes| !minutes.is_finite()) {
        return Err("PAD680 is not a finite number".to_owned());
    }
    if !is_known_sex_code(record.sex_code) {
        return Err(format!("unknown RIAGENDR code {}", record.sex_code));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(calories: f64) -> CleanRecord {
        CleanRecord {
            age: 30.0,
            sex_code: 1.0,
            weight_kg: 70.0,
            height_cm: 175.0,
            calories,
            protein_g: 80.0,
            carbs_g: 250.0,
            fat_g: 70.0,
            activity_minutes: None,
        }
    }

    #[test]
    fn test_drop_missing_rejects_incomplete_and_unknown_sex() {
        let complete = SurveyRecord {
            seqn: 1,
            age: Some(30.0),
            sex_code: Some(2.0),
            weight_kg: Some(60.0),
            height_cm: Some(165.0),
            calories: Some(1800.0),
            protein_g: Some(70.0),
            carbs_g: Some(200.0),
            fat_g: Some(60.0),
            activity_minutes: None,
        };
        let missing_fat = SurveyRecord {
            fat_g: None,
            ..complete
        };
        let unknown_sex = SurveyRecord {
            sex_code: Some(9.0),
            ..complete
        };
        let cleaned = drop_missing(&[complete, missing_fat, unknown_sex]);
        assert_eq!(cleaned.len(), 1);
        assert!((cleaned[0].sex_code - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_outlier_filter_bounds_are_inclusive() {
        let records = vec![record(999.0), record(1000.0), record(4500.0), record(4501.0)];
        let kept = filter_outliers(records, Some(CalorieRange::default()), CalorieTransform::Log);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_log_transform_drops_non_positive_calories_without_range() {
        let records = vec![record(0.0), record(-5.0), record(1500.0)];
        assert_eq!(
            filter_outliers(records.clone(), None, CalorieTransform::Log).len(),
            1
        );
        assert_eq!(
            filter_outliers(records, None, CalorieTransform::Identity).len(),
            3
        );
    }

    #[test]
    fn test_dataset_rejects_non_finite_targets() {
        let mut bad = record(2000.0);
        bad.protein_g = f64::NAN;
        let err = to_dataset(&[bad], CalorieTransform::Log).unwrap_err();
        assert_eq!(err.code, macrofit_core::errors::ErrorCode::TrainingError);
    }

    #[test]
    fn test_check_record_mirrors_raw_path() {
        assert!(check_record(&record(2000.0)).is_ok());

        let mut bad = record(2000.0);
        bad.fat_g = f64::INFINITY;
        assert!(check_record(&bad).unwrap_err().contains("DR1TTFAT"));

        let mut bad = record(2000.0);
        bad.sex_code = 9.0;
        assert!(check_record(&bad).unwrap_err().contains("RIAGENDR"));
    }

    #[test]
    fn test_dataset_uses_log_calories() {
        let dataset = to_dataset(&[record(2200.0)], CalorieTransform::Log).unwrap();
        assert!((dataset.targets.get(0, 0) - 2200_f64.ln()).abs() < 1e-12);
        assert!((dataset.features.get(0, 2) - 70.0).abs() < f64::EPSILON);
    }
}
