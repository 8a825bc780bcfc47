// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Output formatting helpers for macrofit-cli
// ABOUTME: Provides consistent display functions for row counts, metrics, and training reports

use macrofit::constants::model_contract::TARGET_ORDER;
use macrofit::training::report::RowCounts;
use macrofit::training::TrainingReport;
use macrofit_intelligence::MultiOutputScores;

/// Display row counts after each cleaning stage
pub fn display_row_counts(rows: &RowCounts) {
    println!("\nDATA SUMMARY:");
    println!("{}", "=".repeat(50));
    println!("   Joined rows:      {}", rows.joined);
    println!("   Complete rows:    {}", rows.complete);
    println!("   After filtering:  {}", rows.filtered);
    if rows.train + rows.test > 0 {
        println!("   Train / Test:     {} / {}", rows.train, rows.test);
    }
}

/// Display uniform-average and per-target metrics
pub fn display_scores(scores: &MultiOutputScores) {
    println!("\nEVALUATION (held-out, calories in kcal):");
    println!("{}", "=".repeat(50));
    println!("   Mean Squared Error: {:.2}", scores.average.mse);
    println!("   R² Score:           {:.4}", scores.average.r2);
    println!(
        "   Explained Variance: {:.4}",
        scores.average.explained_variance
    );

    println!("\n   {:<12} {:>14} {:>8}", "target", "mse", "r2");
    for (name, target) in TARGET_ORDER.iter().zip(&scores.per_target) {
        println!("   {name:<12} {:>14.2} {:>8.4}", target.mse, target.r2);
    }
}

/// Display a training run summary
pub fn display_training_report(report: &TrainingReport) {
    println!("\nTraining Completed Successfully!");
    println!("{}", "=".repeat(50));
    println!("   Model version:     {}", report.model_version);
    println!("   Calorie transform: {}", report.calorie_transform);
    println!(
        "   Best params:       n_estimators={}, max_depth={}",
        report.best_params.n_estimators,
        report
            .best_params
            .tree
            .max_depth
            .map_or_else(|| "None".to_owned(), |depth| depth.to_string())
    );
    println!(
        "   Grid search R²:    {:.4}",
        report.evaluation.grid_search_r2
    );
    if let Some(cv) = report.evaluation.cross_val_r2 {
        println!("   Cross-val R²:      {cv:.4}");
    }

    display_row_counts(&report.rows);
    display_scores(&report.evaluation.test_scores);
}
