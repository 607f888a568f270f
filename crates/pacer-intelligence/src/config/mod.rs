// ABOUTME: Planning configuration: every empirical tuning constant in one validated struct
// ABOUTME: Defaults come from physiological_constants; PACER_* variables override them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning Configuration
//!
//! Phase ratios, taper percentages, down-week cadence and the adaptation rule
//! table are tuning values inferred from coaching practice, not physiology.
//! They are kept here so they can be audited and overridden without touching
//! the algorithms.
//!
//! # Module Structure
//!
//! - `periodization` - phase ratios, taper, down weeks, long-run caps
//! - `zones` - zone %VO2max targets, prediction bands, classifier tolerance
//! - `training` - fitness windows and the RPE adaptation rule table
//! - `error` - validation errors

pub mod error;
pub mod periodization;
pub mod training;
pub mod zones;

pub use error::ConfigError;
pub use periodization::{AggressivenessProfile, LongRunConfig, PeriodizationConfig, QualityCaps};
pub use training::{AdaptationConfig, FitnessConfig};
pub use zones::{ClassificationConfig, PredictionBands, ZoneTargets};

use pacer_core::models::EffortCategory;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static PLANNING_CONFIG: OnceLock<PlanningConfig> = OnceLock::new();

/// Tolerance when checking that ratios sum to one
const RATIO_SUM_TOLERANCE: f64 = 0.01;

/// Main planning configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Macro-plan periodization
    pub periodization: PeriodizationConfig,
    /// Pace-zone targets
    pub zones: ZoneTargets,
    /// Prediction confidence bands
    pub prediction: PredictionBands,
    /// Fitness assessment windows
    pub fitness: FitnessConfig,
    /// RPE adaptation
    pub adaptation: AdaptationConfig,
    /// Effort classification
    pub classification: ClassificationConfig,
}

impl PlanningConfig {
    /// Get the global configuration instance
    #[must_use]
    pub fn global() -> &'static Self {
        PLANNING_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load planning config, using defaults");
                Self::default()
            })
        })
    }

    /// Load from environment and validate
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden configuration fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Defaults with `PACER_*` environment overrides; unparsable values keep the default
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            periodization: PeriodizationConfig::from_env(),
            zones: ZoneTargets::from_env(),
            prediction: PredictionBands::default(),
            fitness: FitnessConfig::from_env(),
            adaptation: AdaptationConfig::from_env(),
            classification: ClassificationConfig {
                tie_tolerance_seconds: env_or(
                    "PACER_TIE_TOLERANCE_SECONDS",
                    ClassificationConfig::default().tie_tolerance_seconds,
                ),
            },
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when ratios do not sum to one, taper fractions are not
    /// strictly decreasing, a taper outlasts its fractions, zone targets are
    /// unordered, or a value is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periodization = &self.periodization;

        if periodization.min_plan_weeks < 2 {
            return Err(ConfigError::ValueOutOfRange("min_plan_weeks must be >= 2"));
        }

        for (_, profile) in periodization.profiles() {
            Self::validate_profile(profile)?;
        }

        let max_taper = periodization.moderate.taper_fractions.len() as u32;
        let taper_weeks = [
            periodization.taper_weeks_short,
            periodization.taper_weeks_half,
            periodization.taper_weeks_marathon,
        ];
        if taper_weeks.iter().any(|weeks| !(1..=max_taper).contains(weeks)) {
            return Err(ConfigError::ValueOutOfRange(
                "taper weeks must be between 1 and the number of taper fractions",
            ));
        }

        let long_run = &periodization.long_run;
        if !(0.1..=0.5).contains(&long_run.fraction) {
            return Err(ConfigError::ValueOutOfRange(
                "long_run.fraction must be between 0.1 and 0.5",
            ));
        }
        if long_run.cap_short > long_run.cap_half || long_run.cap_half > long_run.cap_marathon {
            return Err(ConfigError::InvalidRange(
                "long-run caps must be non-decreasing with race distance",
            ));
        }

        let quality = &periodization.quality;
        if quality.max == 0 || quality.default_sessions > quality.max {
            return Err(ConfigError::InvalidRange(
                "quality.default_sessions must be <= quality.max and max > 0",
            ));
        }

        let percents: Vec<f64> = EffortCategory::ALL
            .iter()
            .map(|category| self.zones.percent_for(*category))
            .collect();
        if percents.iter().any(|p| !(0.4..=1.1).contains(p)) {
            return Err(ConfigError::ValueOutOfRange(
                "zone targets must be between 0.4 and 1.1 of VO2max",
            ));
        }
        if percents.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "zone targets must be strictly increasing from recovery to interval",
            ));
        }

        let bands = &self.prediction;
        if !(bands.high < bands.medium && bands.medium < bands.low) {
            return Err(ConfigError::InvalidRange(
                "prediction bands must widen from high to low confidence",
            ));
        }

        let adaptation = &self.adaptation;
        if adaptation.window_days <= 0 {
            return Err(ConfigError::ValueOutOfRange("adaptation.window_days must be positive"));
        }
        if adaptation.comfortable_rpe >= adaptation.high_rpe {
            return Err(ConfigError::InvalidRange(
                "adaptation.comfortable_rpe must be < adaptation.high_rpe",
            ));
        }

        if self.classification.tie_tolerance_seconds < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "classification.tie_tolerance_seconds must be >= 0",
            ));
        }

        Ok(())
    }

    fn validate_profile(profile: &AggressivenessProfile) -> Result<(), ConfigError> {
        let ratio_sum: f64 = profile.phase_ratios.iter().sum();
        if (ratio_sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights("phase ratios must sum to 1.0"));
        }
        if profile.phase_ratios.iter().any(|ratio| *ratio <= 0.0) {
            return Err(ConfigError::ValueOutOfRange("phase ratios must be positive"));
        }

        let fractions = profile.taper_fractions;
        if fractions.iter().any(|f| *f <= 0.0 || *f >= 1.0) {
            return Err(ConfigError::ValueOutOfRange(
                "taper fractions must be between 0 and 1",
            ));
        }
        if fractions.windows(2).any(|pair| pair[0] <= pair[1]) {
            return Err(ConfigError::InvalidRange(
                "taper fractions must be strictly decreasing",
            ));
        }

        if !(0.5..=1.0).contains(&profile.peak_ceiling) {
            return Err(ConfigError::ValueOutOfRange(
                "peak_ceiling must be between 0.5 and 1.0",
            ));
        }
        if profile.down_week_cadence < 2 {
            return Err(ConfigError::ValueOutOfRange("down_week_cadence must be >= 2"));
        }
        if !(0.05..=0.5).contains(&profile.down_week_reduction) {
            return Err(ConfigError::ValueOutOfRange(
                "down_week_reduction must be between 0.05 and 0.5",
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when absent or invalid
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a comma-separated triple such as `0.75,0.5,0.25`
pub(crate) fn env_fractions(key: &str, default: [f64; 3]) -> [f64; 3] {
    env::var(key)
        .ok()
        .and_then(|raw| parse_fractions(&raw).ok())
        .unwrap_or(default)
}

/// Parse exactly three comma-separated numbers
///
/// # Errors
///
/// Returns `ConfigError::Parse` when the value is not three valid numbers
pub fn parse_fractions(raw: &str) -> Result<[f64; 3], ConfigError> {
    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ConfigError::Parse(format!("'{raw}': {e}")))?;

    <[f64; 3]>::try_from(values.as_slice())
        .map_err(|_| ConfigError::Parse(format!("'{raw}': expected exactly three values")))
}
