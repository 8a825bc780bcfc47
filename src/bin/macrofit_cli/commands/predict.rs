// ABOUTME: Predict command for macrofit-cli
// ABOUTME: Loads the artifact once and prints the recommendation as JSON on stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use macrofit::config::MacrofitConfig;
use macrofit::errors::AppResult;
use macrofit::models::ProfileRequest;
use macrofit::prediction::MacroPredictor;

/// Print a recommendation for `request`
pub fn run(config: &MacrofitConfig, request: &ProfileRequest) -> AppResult<()> {
    let predictor = MacroPredictor::load(&config.paths.artifact_path, config.adjustments)?;
    let recommendation = predictor.recommend_request(request)?;
    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}
