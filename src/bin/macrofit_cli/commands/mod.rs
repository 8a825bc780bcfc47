// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for macrofit-cli
// ABOUTME: Provides access to clean, train, predict, and evaluate commands

pub mod clean;
pub mod evaluate;
pub mod predict;
pub mod train;
