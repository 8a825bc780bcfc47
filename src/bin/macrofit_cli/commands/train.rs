// ABOUTME: Train command for macrofit-cli
// ABOUTME: Runs the full pipeline from raw or cleaned data and writes artifact and report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::PathBuf;

use macrofit::config::MacrofitConfig;
use macrofit::errors::AppResult;
use macrofit::training::{DataSource, TrainingPipeline, TrainingReport};

use crate::helpers::display::display_training_report;

/// Train and persist a model
pub fn run(config: &MacrofitConfig, cleaned: Option<PathBuf>) -> AppResult<()> {
    let source = cleaned.map_or_else(
        || DataSource::Raw(config.paths.raw_data_dir.clone()),
        DataSource::Cleaned,
    );

    let pipeline = TrainingPipeline::new(config.training.clone())?;
    let outcome = pipeline.run(&source, &config.paths.artifact_path)?;

    display_training_report(&outcome.report);
    println!(
        "\nModel saved to: {}\nReport saved to: {}",
        config.paths.artifact_path.display(),
        TrainingReport::path_for(&config.paths.artifact_path).display()
    );
    Ok(())
}
