// ABOUTME: Integration tests for the serving path from profile to macro recommendation
// ABOUTME: Covers feature encoding, profile validation, category fallbacks, and post-processing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::thread;

use common::{init_test_logging, profile_with, sample_profile, sample_request, FixedRegressor};
use macrofit::config::AdjustmentTables;
use macrofit::errors::ErrorCode;
use macrofit::models::{
    ActivityLevel, BiologicalSex, CalorieTransform, FitnessGoal, MacroRecommendation,
    UserProfile,
};
use macrofit::prediction::{build_features, MacroPredictor};

fn predictor(output: [f64; 4], transform: CalorieTransform) -> MacroPredictor {
    init_test_logging();
    MacroPredictor::new(
        Box::new(FixedRegressor::new(output)),
        transform,
        AdjustmentTables::default(),
        "test-model",
    )
}

// ============================================================================
// Feature Encoding
// ============================================================================

#[test]
fn test_features_follow_contract_order() {
    let features = build_features(&sample_profile()).unwrap();
    assert_eq!(features.0, [30.0, 2.0, 62.0, 168.0]);

    let male = UserProfile {
        sex: BiologicalSex::Male,
        ..sample_profile()
    };
    assert!((build_features(&male).unwrap().0[1] - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_features_ignore_activity_and_goal() {
    let base = build_features(&sample_profile()).unwrap();
    let active = build_features(&profile_with(
        ActivityLevel::ExtraActive,
        FitnessGoal::GainMuscle,
    ))
    .unwrap();
    assert_eq!(base, active);
}

#[test]
fn test_non_positive_measurements_are_rejected() {
    for profile in [
        UserProfile {
            weight_kg: 0.0,
            ..sample_profile()
        },
        UserProfile {
            height_cm: -170.0,
            ..sample_profile()
        },
        UserProfile {
            weight_kg: f64::NAN,
            ..sample_profile()
        },
        UserProfile {
            age: 0,
            ..sample_profile()
        },
    ] {
        let err = build_features(&profile).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidProfile);
    }
}

// ============================================================================
// Request Parsing
// ============================================================================

#[test]
fn test_unknown_sex_is_rejected_not_defaulted() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);
    let mut request = sample_request("sedentary", "maintain");
    request.sex = "other".to_owned();

    let err = predictor.recommend_request(&request).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidProfile);
}

#[test]
fn test_negative_age_request_is_rejected() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);
    let mut request = sample_request("sedentary", "maintain");
    request.age = -4;

    let err = predictor.recommend_request(&request).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidProfile);
}

#[test]
fn test_unknown_activity_falls_back_to_sedentary() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);

    let fallback = predictor
        .recommend_request(&sample_request("couch potato", "maintain"))
        .unwrap();
    let sedentary = predictor
        .recommend_request(&sample_request("sedentary", "maintain"))
        .unwrap();
    assert_eq!(fallback, sedentary);
    assert_eq!(fallback.total_calories, 2400);
}

#[test]
fn test_unknown_goal_applies_no_adjustment() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);

    let unknown = predictor
        .recommend_request(&sample_request("sedentary", "bulk"))
        .unwrap();
    let maintain = predictor
        .recommend_request(&sample_request("sedentary", "maintain"))
        .unwrap();
    assert_eq!(unknown, maintain);
}

#[test]
fn test_category_strings_are_normalized() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);

    let spaced = predictor
        .recommend_request(&sample_request(" Very Active ", "Gain-Muscle"))
        .unwrap();
    let canonical = predictor
        .recommend(&profile_with(
            ActivityLevel::VeryActive,
            FitnessGoal::GainMuscle,
        ))
        .unwrap();
    assert_eq!(spaced, canonical);
}

// ============================================================================
// Post-processing
// ============================================================================

#[test]
fn test_activity_multipliers() {
    let predictor = predictor([2000.0, 100.0, 250.0, 70.0], CalorieTransform::Identity);
    let expected = [
        (ActivityLevel::Sedentary, 2400),
        (ActivityLevel::Light, 2750),
        (ActivityLevel::Moderate, 3100),
        (ActivityLevel::VeryActive, 3450),
        (ActivityLevel::ExtraActive, 3800),
    ];

    for (level, calories) in expected {
        let rec = predictor
            .recommend(&profile_with(level, FitnessGoal::Maintain))
            .unwrap();
        assert_eq!(rec.total_calories, calories, "activity level {level}");
        assert_eq!(rec.protein, 100, "protein is not scaled by activity");
    }
}

#[test]
fn test_lose_fat_reduces_calories_and_raises_protein() {
    let predictor = predictor([2000.0, 150.0, 250.0, 70.0], CalorieTransform::Identity);
    let rec = predictor
        .recommend(&profile_with(ActivityLevel::Sedentary, FitnessGoal::LoseFat))
        .unwrap();

    assert_eq!(rec.total_calories, 2040);
    assert_eq!(rec.protein, 157);
    assert_eq!(rec.carbs, 250);
    assert_eq!(rec.fat, 70);
}

#[test]
fn test_log_calories_gain_muscle_moderate() {
    let predictor = predictor(
        [2200_f64.ln(), 90.0, 250.0, 70.0],
        CalorieTransform::Log,
    );
    let rec = predictor
        .recommend(&profile_with(ActivityLevel::Moderate, FitnessGoal::GainMuscle))
        .unwrap();

    assert_eq!(
        rec,
        MacroRecommendation {
            total_calories: 3751,
            protein: 108,
            carbs: 250,
            fat: 70,
        }
    );
}

#[test]
fn test_values_are_truncated_not_rounded() {
    let predictor = predictor([1999.99, 99.99, 249.99, 69.99], CalorieTransform::Identity);
    let rec = predictor.recommend(&sample_profile()).unwrap();

    assert_eq!(rec.total_calories, 2399);
    assert_eq!(rec.protein, 99);
    assert_eq!(rec.carbs, 249);
    assert_eq!(rec.fat, 69);
}

#[test]
fn test_negative_raw_values_pass_through_unclamped() {
    let predictor = predictor([2000.0, 100.0, -12.7, 70.0], CalorieTransform::Identity);
    let rec = predictor.recommend(&sample_profile()).unwrap();
    assert_eq!(rec.carbs, -12);
}

#[test]
fn test_raw_prediction_is_untouched_by_post_processing() {
    let predictor = predictor([2200_f64.ln(), 90.0, 250.0, 70.0], CalorieTransform::Log);
    let raw = predictor.predict_raw(&sample_profile()).unwrap();
    assert!((raw.calories() - 2200_f64.ln()).abs() < f64::EPSILON);
    assert_eq!(predictor.calorie_transform(), CalorieTransform::Log);
    assert_eq!(predictor.model_version(), "test-model");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_predictor_is_shared_across_threads() {
    let predictor = Arc::new(predictor(
        [2000.0, 100.0, 250.0, 70.0],
        CalorieTransform::Identity,
    ));

    let handles: Vec<_> = ActivityLevel::ALL
        .into_iter()
        .map(|level| {
            let predictor = Arc::clone(&predictor);
            thread::spawn(move || {
                predictor
                    .recommend(&profile_with(level, FitnessGoal::Maintain))
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<MacroRecommendation> =
        handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0].total_calories, 2400);
    assert_eq!(results[4].total_calories, 3800);
}
