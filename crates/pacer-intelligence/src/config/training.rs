// ABOUTME: Fitness-assessment windows and RPE adaptation thresholds
// ABOUTME: Holds the auditable adaptation rule table applied by the window generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_or;
use crate::adaptation::AdaptationRule;
use crate::physiological_constants::{adaptation, fitness};
use serde::{Deserialize, Serialize};

/// Fitness assessment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessConfig {
    /// Trailing aggregation window (days)
    pub assessment_window_days: i64,
    /// Trailing best-effort search window (days)
    pub best_effort_window_days: i64,
    /// Suggested peak as a multiple of current mileage
    pub peak_mileage_multiplier: f64,
    /// Runs needed for high confidence
    pub high_confidence_runs: usize,
    /// Runs needed for medium confidence
    pub medium_confidence_runs: usize,
    /// Latest run must be within this many days for high confidence
    pub recent_run_days: i64,
    /// Runs per week assumed when none were declared
    pub default_runs_per_week: u8,
}

impl Default for FitnessConfig {
    fn default() -> Self {
        Self {
            assessment_window_days: fitness::ASSESSMENT_WINDOW_DAYS,
            best_effort_window_days: fitness::BEST_EFFORT_WINDOW_DAYS,
            peak_mileage_multiplier: fitness::PEAK_MILEAGE_MULTIPLIER,
            high_confidence_runs: fitness::HIGH_CONFIDENCE_RUNS,
            medium_confidence_runs: fitness::MEDIUM_CONFIDENCE_RUNS,
            recent_run_days: fitness::RECENT_RUN_DAYS,
            default_runs_per_week: fitness::DEFAULT_RUNS_PER_WEEK,
        }
    }
}

impl FitnessConfig {
    /// Load fitness configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            assessment_window_days: env_or(
                "PACER_FITNESS_WINDOW_DAYS",
                defaults.assessment_window_days,
            ),
            peak_mileage_multiplier: env_or(
                "PACER_PEAK_MILEAGE_MULTIPLIER",
                defaults.peak_mileage_multiplier,
            ),
            ..defaults
        }
    }
}

/// RPE adaptation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Trailing window of completed workouts (days)
    pub window_days: i64,
    /// Quality RPE at or above this counts as too hard
    pub high_rpe: f64,
    /// Quality RPE at or below this counts as comfortable
    pub comfortable_rpe: f64,
    /// Average easy-run RPE at or above this flags fatigue
    pub easy_run_fatigue_rpe: f64,
    /// Rules evaluated in order; the first match applies
    pub rules: Vec<AdaptationRule>,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            window_days: adaptation::WINDOW_DAYS,
            high_rpe: adaptation::HIGH_RPE,
            comfortable_rpe: adaptation::COMFORTABLE_RPE,
            easy_run_fatigue_rpe: adaptation::EASY_RUN_FATIGUE_RPE,
            rules: AdaptationRule::default_table(),
        }
    }
}

impl AdaptationConfig {
    /// Load adaptation thresholds from environment; the rule table stays default
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            window_days: env_or("PACER_ADAPTATION_WINDOW_DAYS", defaults.window_days),
            high_rpe: env_or("PACER_ADAPTATION_HIGH_RPE", defaults.high_rpe),
            comfortable_rpe: env_or("PACER_ADAPTATION_COMFORTABLE_RPE", defaults.comfortable_rpe),
            easy_run_fatigue_rpe: env_or(
                "PACER_ADAPTATION_EASY_FATIGUE_RPE",
                defaults.easy_run_fatigue_rpe,
            ),
            ..defaults
        }
    }
}
