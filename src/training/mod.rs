// ABOUTME: Offline training: survey loading, cleaning, pipeline orchestration, and reports
// ABOUTME: Produces the versioned artifact consumed by the prediction module
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cleaning stages and cleaned CSV I/O
pub mod cleaning;
/// Stage orchestration
pub mod pipeline;
/// Training report and calorie comparison output
pub mod report;
/// Raw survey extracts
pub mod survey;

pub use cleaning::CleanRecord;
pub use pipeline::{CleanedData, DataSource, PipelineStage, TrainingOutcome, TrainingPipeline};
pub use report::{
    evaluate_artifact, evaluate_saved_artifact, write_calorie_comparison, CaloriePrediction,
    TrainingReport,
};
pub use survey::{RawSurvey, SurveyRecord};
