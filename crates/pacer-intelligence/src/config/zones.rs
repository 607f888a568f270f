// ABOUTME: Pace-zone %VO2max targets, prediction bands, and classifier tolerance
// ABOUTME: Feeds the pace model and the effort classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::env_or;
use crate::physiological_constants::{classification, prediction_bands, zone_percentages};
use pacer_core::models::{EffortCategory, PredictionConfidence};
use serde::{Deserialize, Serialize};

/// Target %VO2max for each training zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneTargets {
    /// Recovery
    pub recovery: f64,
    /// Easy
    pub easy: f64,
    /// Steady
    pub steady: f64,
    /// Marathon
    pub marathon: f64,
    /// Tempo
    pub tempo: f64,
    /// Threshold
    pub threshold: f64,
    /// Interval
    pub interval: f64,
}

impl Default for ZoneTargets {
    fn default() -> Self {
        Self {
            recovery: zone_percentages::RECOVERY,
            easy: zone_percentages::EASY,
            steady: zone_percentages::STEADY,
            marathon: zone_percentages::MARATHON,
            tempo: zone_percentages::TEMPO,
            threshold: zone_percentages::THRESHOLD,
            interval: zone_percentages::INTERVAL,
        }
    }
}

impl ZoneTargets {
    /// Load zone targets from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            recovery: env_or("PACER_ZONE_RECOVERY_PERCENT", defaults.recovery),
            easy: env_or("PACER_ZONE_EASY_PERCENT", defaults.easy),
            steady: env_or("PACER_ZONE_STEADY_PERCENT", defaults.steady),
            marathon: env_or("PACER_ZONE_MARATHON_PERCENT", defaults.marathon),
            tempo: env_or("PACER_ZONE_TEMPO_PERCENT", defaults.tempo),
            threshold: env_or("PACER_ZONE_THRESHOLD_PERCENT", defaults.threshold),
            interval: env_or("PACER_ZONE_INTERVAL_PERCENT", defaults.interval),
        }
    }

    /// Target fraction for a category
    #[must_use]
    pub const fn percent_for(&self, category: EffortCategory) -> f64 {
        match category {
            EffortCategory::Recovery => self.recovery,
            EffortCategory::Easy => self.easy,
            EffortCategory::Steady => self.steady,
            EffortCategory::Marathon => self.marathon,
            EffortCategory::Tempo => self.tempo,
            EffortCategory::Threshold => self.threshold,
            EffortCategory::Interval => self.interval,
        }
    }
}

/// Confidence band widths and source-age thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBands {
    /// High-confidence band
    pub high: f64,
    /// Medium-confidence band
    pub medium: f64,
    /// Low-confidence band
    pub low: f64,
    /// Races younger than this many days are high confidence
    pub recent_race_days: i64,
    /// Sources older than this many days are low confidence
    pub stale_source_days: i64,
}

impl Default for PredictionBands {
    fn default() -> Self {
        Self {
            high: prediction_bands::HIGH,
            medium: prediction_bands::MEDIUM,
            low: prediction_bands::LOW,
            recent_race_days: prediction_bands::RECENT_RACE_DAYS,
            stale_source_days: prediction_bands::STALE_SOURCE_DAYS,
        }
    }
}

impl PredictionBands {
    /// Band width for a confidence level
    #[must_use]
    pub const fn band(&self, confidence: PredictionConfidence) -> f64 {
        match confidence {
            PredictionConfidence::High => self.high,
            PredictionConfidence::Medium => self.medium,
            PredictionConfidence::Low => self.low,
        }
    }
}

/// Effort-classifier tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Two nearest zones closer than this resolve to the harder zone (s/mi)
    pub tie_tolerance_seconds: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            tie_tolerance_seconds: classification::TIE_TOLERANCE_SECONDS,
        }
    }
}
