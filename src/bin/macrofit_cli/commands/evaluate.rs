// ABOUTME: Evaluate command for macrofit-cli
// ABOUTME: Re-scores an artifact on its held-out split and writes predicted vs actual calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use macrofit::config::MacrofitConfig;
use macrofit::errors::AppResult;
use macrofit::training::{evaluate_saved_artifact, write_calorie_comparison};

use crate::helpers::display::display_scores;

/// Evaluate the configured artifact against the cleaned dataset
pub fn run(config: &MacrofitConfig) -> AppResult<()> {
    let (_, evaluation) = evaluate_saved_artifact(&config.paths, &config.training)?;
    let path = write_calorie_comparison(&config.paths.report_dir, &evaluation.calories, Utc::now())?;

    display_scores(&evaluation.scores);
    println!("\nPredicted vs actual calories saved to: {}", path.display());
    Ok(())
}
