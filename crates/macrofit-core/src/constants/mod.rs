// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Fixed lookup tables, survey column names, and training defaults for Macrofit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains. The lookup tables in
//! [`activity_factors`], [`goal_adjustments`], and [`sex_encoding`] are part of
//! the model contract: changing them changes every recommendation served.

/// Model contract shared between the training pipeline and the serving path
pub mod model_contract {
    /// Number of input features the regressor consumes
    pub const FEATURE_COUNT: usize = 4;

    /// Number of nutrition targets the regressor produces
    pub const TARGET_COUNT: usize = 4;

    /// Feature names in the exact order of the feature vector
    pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = ["age", "sex_code", "weight_kg", "height_cm"];

    /// Target names in the exact order of the raw prediction
    pub const TARGET_ORDER: [&str; TARGET_COUNT] = ["calories", "protein_g", "carbs_g", "fat_g"];

    /// Index of the calorie target inside the raw prediction
    pub const CALORIES_INDEX: usize = 0;
    /// Index of the protein target inside the raw prediction
    pub const PROTEIN_INDEX: usize = 1;
    /// Index of the carbohydrate target inside the raw prediction
    pub const CARBS_INDEX: usize = 2;
    /// Index of the fat target inside the raw prediction
    pub const FAT_INDEX: usize = 3;

    /// Artifact format versions this build can read
    pub const SUPPORTED_FORMAT_VERSIONS: &[u32] = &[1];

    /// Artifact format version written by this build
    pub const CURRENT_FORMAT_VERSION: u32 = 1;
}

/// Biological sex encoding, identical to NHANES `RIAGENDR`
pub mod sex_encoding {
    /// Code for male participants
    pub const MALE_CODE: u8 = 1;
    /// Code for female participants
    pub const FEMALE_CODE: u8 = 2;

    /// Category name to code lookup
    pub const SEX_ENCODING: [(&str, u8); 2] = [("male", MALE_CODE), ("female", FEMALE_CODE)];
}

/// Physical activity level (PAL) energy multipliers
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
pub mod activity_factors {
    /// Little or no exercise
    pub const SEDENTARY: f64 = 1.20;
    /// Light exercise 1-3 days/week
    pub const LIGHT: f64 = 1.375;
    /// Moderate exercise 3-5 days/week
    pub const MODERATE: f64 = 1.55;
    /// Hard exercise 6-7 days/week
    pub const VERY_ACTIVE: f64 = 1.725;
    /// Hard training twice a day or physical job
    pub const EXTRA_ACTIVE: f64 = 1.90;
}

/// Fitness goal adjustments applied after the activity multiplier
pub mod goal_adjustments {
    /// Calorie surplus for muscle gain
    pub const GAIN_MUSCLE_CALORIES: f64 = 1.10;
    /// Extra protein for muscle gain
    pub const GAIN_MUSCLE_PROTEIN: f64 = 1.20;
    /// Calorie deficit for fat loss
    pub const LOSE_FAT_CALORIES: f64 = 0.85;
    /// Protein bump preserving lean mass during a deficit
    pub const LOSE_FAT_PROTEIN: f64 = 1.05;
}

/// NHANES column names used by the training pipeline
pub mod survey_columns {
    /// Respondent sequence number (participant identifier)
    pub const SEQN: &str = "SEQN";
    /// Age in years at screening
    pub const AGE: &str = "RIDAGEYR";
    /// Gender (1 = male, 2 = female)
    pub const SEX: &str = "RIAGENDR";
    /// Weight (kg)
    pub const WEIGHT: &str = "BMXWT";
    /// Standing height (cm)
    pub const HEIGHT: &str = "BMXHT";
    /// Energy (kcal), day 1 total
    pub const CALORIES: &str = "DR1TKCAL";
    /// Protein (g), day 1 total
    pub const PROTEIN: &str = "DR1TPROT";
    /// Carbohydrate (g), day 1 total
    pub const CARBS: &str = "DR1TCARB";
    /// Total fat (g), day 1 total
    pub const FAT: &str = "DR1TTFAT";
    /// Minutes of sedentary activity (optional physical activity extract)
    pub const ACTIVITY_MINUTES: &str = "PAD680";

    /// Feature columns in model contract order
    pub const FEATURE_COLUMNS: [&str; 4] = [AGE, SEX, WEIGHT, HEIGHT];
    /// Target columns in model contract order
    pub const TARGET_COLUMNS: [&str; 4] = [CALORIES, PROTEIN, CARBS, FAT];

    /// Cell values treated as missing besides the empty string
    pub const MISSING_MARKERS: [&str; 3] = [".", "NA", "NaN"];
}

/// Raw survey file names inside the raw data directory
pub mod survey_files {
    /// Demographics extract
    pub const DEMOGRAPHICS: &str = "DEMO_J.csv";
    /// Body measures extract
    pub const BODY_MEASURES: &str = "BMX_J.csv";
    /// Day-1 dietary totals extract
    pub const DIETARY_TOTALS: &str = "DR1TOT_J.csv";
    /// Physical activity extract (optional)
    pub const PHYSICAL_ACTIVITY: &str = "PAQ_J.csv";
}

/// Training pipeline defaults
pub mod training_defaults {
    /// Seed for the split, bootstrap sampling, and cross-validation
    pub const SEED: u64 = 42;
    /// Share of rows held out for evaluation
    pub const TEST_FRACTION: f64 = 0.1;
    /// Folds used by the hyperparameter grid search
    pub const GRID_SEARCH_FOLDS: usize = 3;
    /// Folds used for the cross-validated R² report (0 disables it)
    pub const CROSS_VALIDATION_FOLDS: usize = 5;
    /// Candidate forest sizes
    pub const N_ESTIMATORS_GRID: [usize; 2] = [100, 200];
    /// Candidate depth limits (`None` grows trees until leaves are pure)
    pub const MAX_DEPTH_GRID: [Option<usize>; 3] = [None, Some(10), Some(20)];
    /// Minimum samples required to split an internal node
    pub const MIN_SAMPLES_SPLIT: usize = 2;
    /// Minimum samples required at a leaf
    pub const MIN_SAMPLES_LEAF: usize = 1;
    /// Plausible daily calorie intake range used by the outlier filter
    pub const CALORIE_RANGE: (f64, f64) = (1000.0, 4500.0);
}

/// File system defaults
pub mod paths {
    /// Artifact written by training and loaded by the serving path
    pub const DEFAULT_ARTIFACT_PATH: &str = "model/macro_predictor.json";
    /// Directory holding the raw survey extracts
    pub const DEFAULT_RAW_DATA_DIR: &str = "data/nhanes_raw";
    /// Cleaned dataset produced by the cleaning stage
    pub const DEFAULT_CLEANED_DATA_PATH: &str = "data/nhanes_cleaned.csv";
    /// Directory for evaluation reports
    pub const DEFAULT_REPORT_DIR: &str = "outputs";
    /// Suffix appended to the artifact path for the training report
    pub const REPORT_SUFFIX: &str = ".report.json";
}

/// Service names used in structured logs
pub mod service_names {
    /// Default service name
    pub const MACROFIT: &str = "macrofit";
}
