// ABOUTME: Loader for raw survey CSV extracts (demographics, body measures, dietary totals, activity)
// ABOUTME: Reads only the needed columns and inner-joins the tables on the participant id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Raw survey tables
//!
//! Every extract is a headered CSV keyed by `SEQN`. Cells that are empty, one
//! of the missing markers, unparsable, or non-finite are read as missing.
//! Rows without a usable `SEQN` are skipped; for duplicate ids the first row
//! wins.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use macrofit_core::constants::survey_columns::{
    ACTIVITY_MINUTES, AGE, CALORIES, CARBS, FAT, HEIGHT, MISSING_MARKERS, PROTEIN, SEQN, SEX,
    WEIGHT,
};
use macrofit_core::constants::survey_files;
use macrofit_core::errors::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Parse one survey cell
#[must_use]
pub fn parse_cell(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || MISSING_MARKERS.contains(&raw) {
        return None;
    }
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[allow(clippy::cast_possible_truncation)]
fn parse_seqn(raw: &str) -> Option<i64> {
    parse_cell(raw)
        .filter(|value| value.fract() == 0.0 && *value >= 0.0)
        .map(|value| value as i64)
}

/// One extract reduced to the requested columns
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyTable {
    rows: Vec<(i64, Vec<Option<f64>>)>,
}

impl SurveyTable {
    /// Read `columns` (plus `SEQN`) from the CSV at `path`
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError` if the file cannot be opened or parsed, or a
    /// requested column is absent
    pub fn read(path: &Path, columns: &[&'static str]) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| {
            AppError::data_load(format!("cannot open survey file {}", path.display()))
                .with_source(e)
        })?;
        Self::from_reader(&path.display().to_string(), file, columns)
    }

    /// Read from any CSV source
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError` on malformed CSV or a missing column
    pub fn from_reader<R: Read>(
        name: &str,
        reader: R,
        columns: &[&'static str],
    ) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| {
                AppError::data_load(format!("cannot read header of {name}")).with_source(e)
            })?
            .clone();
        let position = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| {
                    AppError::data_load(format!("{name} is missing required column {column}"))
                })
        };
        let seqn_index = position(SEQN)?;
        let indices = columns
            .iter()
            .map(|&column| position(column))
            .collect::<AppResult<Vec<_>>>()?;

        let mut rows = Vec::new();
        let mut skipped = 0_usize;
        for (line, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::data_load(format!("malformed record {} in {name}", line + 2))
                    .with_source(e)
            })?;
            let Some(seqn) = record.get(seqn_index).and_then(parse_seqn) else {
                skipped += 1;
                continue;
            };
            let values = indices
                .iter()
                .map(|&index| record.get(index).and_then(parse_cell))
                .collect();
            rows.push((seqn, values));
        }

        if skipped > 0 {
            warn!(table = %name, skipped, "Skipped rows without a participant id");
        }
        debug!(table = %name, rows = rows.len(), "Survey table loaded");

        Ok(Self {
            rows,
        })
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn index_by_seqn(&self) -> HashMap<i64, usize> {
        let mut index = HashMap::with_capacity(self.rows.len());
        for (position, (seqn, _)) in self.rows.iter().enumerate() {
            index.entry(*seqn).or_insert(position);
        }
        index
    }
}

/// One joined participant; any field may still be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurveyRecord {
    /// Participant id
    pub seqn: i64,
    /// `RIDAGEYR`
    pub age: Option<f64>,
    /// `RIAGENDR`
    pub sex_code: Option<f64>,
    /// `BMXWT`
    pub weight_kg: Option<f64>,
    /// `BMXHT`
    pub height_cm: Option<f64>,
    /// `DR1TKCAL`
    pub calories: Option<f64>,
    /// `DR1TPROT`
    pub protein_g: Option<f64>,
    /// `DR1TCARB`
    pub carbs_g: Option<f64>,
    /// `DR1TTFAT`
    pub fat_g: Option<f64>,
    /// `PAD680`, only when the activity extract is present
    pub activity_minutes: Option<f64>,
}

/// The extracts needed for training
#[derive(Debug, Clone)]
pub struct RawSurvey {
    /// Demographics (`RIDAGEYR`, `RIAGENDR`)
    pub demographics: SurveyTable,
    /// Body measures (`BMXWT`, `BMXHT`)
    pub body_measures: SurveyTable,
    /// Day-1 dietary totals
    pub dietary: SurveyTable,
    /// Optional physical activity (`PAD680`)
    pub activity: Option<SurveyTable>,
}

impl RawSurvey {
    /// Load the extracts from `dir`
    ///
    /// # Errors
    ///
    /// Returns `DataLoadError` when a mandatory file or column is missing
    pub fn load(dir: &Path) -> AppResult<Self> {
        let demographics =
            SurveyTable::read(&dir.join(survey_files::DEMOGRAPHICS), &[AGE, SEX])?;
        let body_measures =
            SurveyTable::read(&dir.join(survey_files::BODY_MEASURES), &[WEIGHT, HEIGHT])?;
        let dietary = SurveyTable::read(
            &dir.join(survey_files::DIETARY_TOTALS),
            &[CALORIES, PROTEIN, CARBS, FAT],
        )?;

        let activity_path = dir.join(survey_files::PHYSICAL_ACTIVITY);
        let activity = if activity_path.exists() {
            Some(SurveyTable::read(&activity_path, &[ACTIVITY_MINUTES])?)
        } else {
            info!(path = %activity_path.display(), "No activity extract, skipping");
            None
        };

        Ok(Self {
            demographics,
            body_measures,
            dietary,
            activity,
        })
    }

    /// Inner-join demographics, body measures, and diet on `SEQN`, keeping
    /// demographics order; activity is left-joined
    #[must_use]
    pub fn join(&self) -> Vec<SurveyRecord> {
        let body_index = self.body_measures.index_by_seqn();
        let diet_index = self.dietary.index_by_seqn();
        let activity_index = self.activity.as_ref().map(SurveyTable::index_by_seqn);

        self.demographics
            .rows
            .iter()
            .filter_map(|(seqn, demo)| {
                let body = &self.body_measures.rows[*body_index.get(seqn)?].1;
                let diet = &self.dietary.rows[*diet_index.get(seqn)?].1;
                let activity_minutes = self.activity.as_ref().zip(activity_index.as_ref()).and_then(
                    |(table, index)| index.get(seqn).and_then(|&row| table.rows[row].1[0]),
                );
                Some(SurveyRecord {
                    seqn: *seqn,
                    age: demo[0],
                    sex_code: demo[1],
                    weight_kg: body[0],
                    height_cm: body[1],
                    calories: diet[0],
                    protein_g: diet[1],
                    carbs_g: diet[2],
                    fat_g: diet[3],
                    activity_minutes,
                })
            })
            .collect()
    }
}
