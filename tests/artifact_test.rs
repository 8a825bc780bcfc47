// ABOUTME: Integration tests for trained artifact persistence and load-time validation
// ABOUTME: Every contract violation must surface as an artifact load error before serving starts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{init_test_logging, sample_profile, synthetic_records};
use macrofit::config::AdjustmentTables;
use macrofit::errors::ErrorCode;
use macrofit::models::CalorieTransform;
use macrofit::config::CalorieRange;
use macrofit::prediction::{MacroPredictor, SplitSettings, TrainedArtifact};
use macrofit::training::cleaning::to_dataset;
use macrofit_intelligence::{Dataset, ForestParams, MultiOutputForest, TreeParams};
use serde_json::Value;
use tempfile::TempDir;

fn small_forest(dataset: &Dataset) -> MultiOutputForest {
    let params = ForestParams {
        n_estimators: 3,
        tree: TreeParams {
            max_depth: Some(3),
            ..TreeParams::default()
        },
        bootstrap: true,
        seed: 7,
    };
    MultiOutputForest::fit(dataset, &params).unwrap()
}

const SPLIT: SplitSettings = SplitSettings {
    seed: 7,
    test_fraction: 0.25,
    calorie_filter: Some(CalorieRange {
        min: 1000.0,
        max: 4500.0,
    }),
};

fn trained_artifact() -> TrainedArtifact {
    init_test_logging();
    let dataset = to_dataset(&synthetic_records(40), CalorieTransform::Log).unwrap();
    TrainedArtifact::new(small_forest(&dataset), CalorieTransform::Log, SPLIT, None)
}

fn saved_artifact_json(dir: &TempDir) -> (PathBuf, Value) {
    let path = dir.path().join("model").join("macro_predictor.json");
    trained_artifact().save(&path).unwrap();
    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    (path, json)
}

fn write_json(path: &Path, json: &Value) {
    fs::write(path, serde_json::to_string(json).unwrap()).unwrap();
}

fn assert_load_rejected(path: &Path) {
    let err = TrainedArtifact::load(path).unwrap_err();
    assert_eq!(err.code, ErrorCode::ArtifactLoadError, "{err}");

    let err = MacroPredictor::load(path, AdjustmentTables::default())
        .err()
        .unwrap();
    assert_eq!(err.code, ErrorCode::ArtifactLoadError);
}

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_saved_artifact_loads_and_predicts_identically() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("artifact.json");
    let artifact = trained_artifact();
    artifact.save(&path).unwrap();

    let loaded = TrainedArtifact::load(&path).unwrap();
    assert_eq!(loaded.model, artifact.model);
    assert_eq!(loaded.model_version, artifact.model_version);
    assert_eq!(loaded.calorie_transform, CalorieTransform::Log);
    assert_eq!(loaded.split_settings(), SPLIT);

    let before = MacroPredictor::from_artifact(artifact, AdjustmentTables::default()).unwrap();
    let after = MacroPredictor::load(&path, AdjustmentTables::default()).unwrap();
    let profile = sample_profile();
    assert_eq!(
        before.predict_raw(&profile).unwrap(),
        after.predict_raw(&profile).unwrap()
    );
    assert_eq!(
        before.recommend(&profile).unwrap(),
        after.recommend(&profile).unwrap()
    );
}

#[test]
fn test_artifacts_get_distinct_versions() {
    let first = trained_artifact();
    let second = trained_artifact();
    assert_ne!(first.model_version, second.model_version);
    assert_eq!(first.model, second.model);
}

// ============================================================================
// Load Failures
// ============================================================================

#[test]
fn test_missing_file_is_artifact_load_error() {
    let dir = TempDir::new().unwrap();
    assert_load_rejected(&dir.path().join("does_not_exist.json"));
}

#[test]
fn test_garbage_file_is_artifact_load_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("artifact.json");
    fs::write(&path, "{ not json").unwrap();
    assert_load_rejected(&path);
}

#[test]
fn test_unsupported_format_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["format_version"] = Value::from(99);
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_reordered_features_are_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["feature_order"] = serde_json::json!(["sex_code", "age", "weight_kg", "height_cm"]);
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_reordered_targets_are_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["target_order"] = serde_json::json!(["protein_g", "calories", "carbs_g", "fat_g"]);
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_missing_calorie_transform_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json.as_object_mut().unwrap().remove("calorie_transform");
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_changed_sex_encoding_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["sex_encoding"] = serde_json::json!({ "male": 0, "female": 1 });
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_out_of_range_test_fraction_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["test_fraction"] = Value::from(1.5);
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_model_with_wrong_output_count_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (path, mut json) = saved_artifact_json(&dir);
    json["model"]["forests"].as_array_mut().unwrap().pop();
    write_json(&path, &json);
    assert_load_rejected(&path);
}

#[test]
fn test_model_with_wrong_feature_count_is_rejected() {
    init_test_logging();
    let records = synthetic_records(30);
    let features = macrofit_intelligence::Matrix::from_rows(
        2,
        &records
            .iter()
            .map(|r| [r.age, r.weight_kg])
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let targets = to_dataset(&records, CalorieTransform::Log).unwrap().targets;
    let narrow = small_forest(&Dataset::new(features, targets).unwrap());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("artifact.json");
    TrainedArtifact::new(narrow, CalorieTransform::Log, SPLIT, None)
        .save(&path)
        .unwrap();
    assert_load_rejected(&path);
}
