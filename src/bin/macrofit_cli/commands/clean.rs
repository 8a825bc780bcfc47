// ABOUTME: Clean command for macrofit-cli
// ABOUTME: Runs the pipeline up to the outlier filter and writes the cleaned CSV
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macrofit::config::MacrofitConfig;
use macrofit::errors::AppResult;
use macrofit::training::cleaning::write_cleaned_csv;
use macrofit::training::{DataSource, TrainingPipeline};
use tracing::info;

use crate::helpers::display::display_row_counts;

/// Clean the raw extracts and write the result
pub fn run(config: &MacrofitConfig) -> AppResult<()> {
    info!(raw_dir = %config.paths.raw_data_dir.display(), "Cleaning survey extracts");

    let pipeline = TrainingPipeline::new(config.training.clone())?;
    let cleaned = pipeline.clean(&DataSource::Raw(config.paths.raw_data_dir.clone()))?;
    write_cleaned_csv(&config.paths.cleaned_data_path, &cleaned.records)?;

    display_row_counts(&cleaned.rows);
    println!(
        "\nCleaned data saved to: {}",
        config.paths.cleaned_data_path.display()
    );
    Ok(())
}
