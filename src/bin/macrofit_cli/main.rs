// ABOUTME: Macrofit CLI - cleaning, training, prediction, and evaluation from the command line
// ABOUTME: Reads MACROFIT_* configuration from the environment; flags override paths and seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Clean the raw survey extracts into a single CSV
//! macrofit-cli clean --raw-dir data/nhanes_raw --output data/nhanes_cleaned.csv
//!
//! # Train from raw extracts (or --cleaned <csv>) and write the artifact
//! macrofit-cli train --output model/macro_predictor.json
//!
//! # Predict a recommendation as JSON
//! macrofit-cli predict --age 30 --sex female --weight-kg 62 --height-cm 168 \
//!     --activity-level moderate --fitness-goal gain_muscle
//!
//! # Re-score an artifact and write predicted vs actual calories
//! macrofit-cli evaluate --cleaned data/nhanes_cleaned.csv
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use macrofit::config::MacrofitConfig;
use macrofit::logging::LoggingConfig;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "macrofit-cli",
    about = "Macrofit macro recommendation CLI",
    long_about = "Clean survey data, train the macro predictor, and compute daily calorie and macronutrient recommendations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Clean raw survey extracts into a training CSV
    Clean {
        /// Directory with DEMO_J.csv, BMX_J.csv, DR1TOT_J.csv (and optional PAQ_J.csv)
        #[arg(long)]
        raw_dir: Option<PathBuf>,

        /// Cleaned CSV destination
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Train the model and write the artifact plus its report
    Train {
        /// Directory with the raw extracts
        #[arg(long, conflicts_with = "cleaned")]
        raw_dir: Option<PathBuf>,

        /// Train from a cleaned CSV instead of the raw extracts
        #[arg(long)]
        cleaned: Option<PathBuf>,

        /// Artifact destination
        #[arg(long)]
        output: Option<PathBuf>,

        /// Seed override
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Predict a daily recommendation and print it as JSON
    Predict {
        /// Age in years
        #[arg(long)]
        age: i64,

        /// Sex (male or female)
        #[arg(long)]
        sex: String,

        /// Weight in kilograms
        #[arg(long)]
        weight_kg: f64,

        /// Height in centimeters
        #[arg(long)]
        height_cm: f64,

        /// sedentary, light, moderate, very_active, extra_active
        #[arg(long, default_value = "sedentary")]
        activity_level: String,

        /// lose_fat, maintain, gain_muscle
        #[arg(long, default_value = "maintain")]
        fitness_goal: String,

        /// Artifact to load
        #[arg(long)]
        artifact: Option<PathBuf>,
    },

    /// Re-score an artifact on its held-out split
    Evaluate {
        /// Artifact to evaluate
        #[arg(long)]
        artifact: Option<PathBuf>,

        /// Cleaned CSV the artifact was trained from
        #[arg(long)]
        cleaned: Option<PathBuf>,

        /// Directory for the calorie comparison CSV
        #[arg(long)]
        report_dir: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    let mut config = MacrofitConfig::from_env()?;
    info!("{}", config.summary());

    match cli.command {
        Command::Clean { raw_dir, output } => {
            if let Some(dir) = raw_dir {
                config.paths.raw_data_dir = dir;
            }
            if let Some(path) = output {
                config.paths.cleaned_data_path = path;
            }
            commands::clean::run(&config)?;
        }
        Command::Train {
            raw_dir,
            cleaned,
            output,
            seed,
        } => {
            if let Some(dir) = raw_dir {
                config.paths.raw_data_dir = dir;
            }
            if let Some(path) = output {
                config.paths.artifact_path = path;
            }
            if let Some(seed) = seed {
                config.training.seed = seed;
            }
            commands::train::run(&config, cleaned)?;
        }
        Command::Predict {
            age,
            sex,
            weight_kg,
            height_cm,
            activity_level,
            fitness_goal,
            artifact,
        } => {
            if let Some(path) = artifact {
                config.paths.artifact_path = path;
            }
            let request = macrofit::models::ProfileRequest {
                age,
                sex,
                weight_kg,
                height_cm,
                activity_level,
                fitness_goal,
            };
            commands::predict::run(&config, &request)?;
        }
        Command::Evaluate {
            artifact,
            cleaned,
            report_dir,
        } => {
            if let Some(path) = artifact {
                config.paths.artifact_path = path;
            }
            if let Some(path) = cleaned {
                config.paths.cleaned_data_path = path;
            }
            if let Some(dir) = report_dir {
                config.paths.report_dir = dir;
            }
            commands::evaluate::run(&config)?;
        }
    }

    Ok(())
}
