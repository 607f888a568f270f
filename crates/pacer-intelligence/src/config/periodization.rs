// ABOUTME: Periodization tuning: phase ratios, taper shape, down weeks and long-run caps
// ABOUTME: One profile per plan aggressiveness, overridable through PACER_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{env_fractions, env_or};
use crate::physiological_constants::{periodization, taper};
use pacer_core::constants::race_distances;
use pacer_core::models::PlanAggressiveness;
use serde::{Deserialize, Serialize};

/// Tuning that varies with plan aggressiveness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggressivenessProfile {
    /// Base, build and peak shares of the pre-taper weeks
    pub phase_ratios: [f64; 3],
    /// Taper-week fractions of peak mileage, earliest first
    pub taper_fractions: [f64; 3],
    /// Fraction of the requested peak mileage actually reached
    pub peak_ceiling: f64,
    /// A down week every N weeks
    pub down_week_cadence: u32,
    /// Mileage reduction applied to a down week
    pub down_week_reduction: f64,
}

impl AggressivenessProfile {
    /// Longer base, gentler taper
    #[must_use]
    pub const fn conservative() -> Self {
        Self {
            phase_ratios: periodization::CONSERVATIVE_RATIOS,
            taper_fractions: taper::CONSERVATIVE_FRACTIONS,
            peak_ceiling: periodization::CONSERVATIVE_PEAK_CEILING,
            down_week_cadence: periodization::CONSERVATIVE_DOWN_WEEK_CADENCE,
            down_week_reduction: periodization::CONSERVATIVE_DOWN_WEEK_REDUCTION,
        }
    }

    /// Balanced defaults
    #[must_use]
    pub const fn moderate() -> Self {
        Self {
            phase_ratios: periodization::MODERATE_RATIOS,
            taper_fractions: taper::MODERATE_FRACTIONS,
            peak_ceiling: periodization::MODERATE_PEAK_CEILING,
            down_week_cadence: periodization::DEFAULT_DOWN_WEEK_CADENCE,
            down_week_reduction: periodization::MODERATE_DOWN_WEEK_REDUCTION,
        }
    }

    /// Short base, full peak
    #[must_use]
    pub const fn aggressive() -> Self {
        Self {
            phase_ratios: periodization::AGGRESSIVE_RATIOS,
            taper_fractions: taper::AGGRESSIVE_FRACTIONS,
            peak_ceiling: periodization::AGGRESSIVE_PEAK_CEILING,
            down_week_cadence: periodization::DEFAULT_DOWN_WEEK_CADENCE,
            down_week_reduction: periodization::AGGRESSIVE_DOWN_WEEK_REDUCTION,
        }
    }

    /// Apply `PACER_<PREFIX>_*` overrides on top of `self`
    fn with_env_overrides(self, prefix: &str) -> Self {
        Self {
            phase_ratios: env_fractions(&format!("PACER_{prefix}_PHASE_RATIOS"), self.phase_ratios),
            taper_fractions: env_fractions(
                &format!("PACER_{prefix}_TAPER_FRACTIONS"),
                self.taper_fractions,
            ),
            peak_ceiling: env_or(&format!("PACER_{prefix}_PEAK_CEILING"), self.peak_ceiling),
            down_week_cadence: env_or(
                &format!("PACER_{prefix}_DOWN_WEEK_CADENCE"),
                self.down_week_cadence,
            ),
            down_week_reduction: env_or(
                &format!("PACER_{prefix}_DOWN_WEEK_REDUCTION"),
                self.down_week_reduction,
            ),
        }
    }
}

/// Long-run sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRunConfig {
    /// Long run as a fraction of weekly mileage
    pub fraction: f64,
    /// Cap for races up to 10K
    pub cap_short: u32,
    /// Cap for races up to the half marathon
    pub cap_half: u32,
    /// Cap for the marathon and beyond
    pub cap_marathon: u32,
}

impl Default for LongRunConfig {
    fn default() -> Self {
        Self {
            fraction: periodization::LONG_RUN_FRACTION,
            cap_short: periodization::LONG_RUN_CAP_SHORT,
            cap_half: periodization::LONG_RUN_CAP_HALF,
            cap_marathon: periodization::LONG_RUN_CAP_MARATHON,
        }
    }
}

/// Weekly quality-session limits per phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCaps {
    /// Used when the caller gives no preference
    pub default_sessions: u8,
    /// Base phase
    pub base: u8,
    /// Taper phase
    pub taper: u8,
    /// Down weeks in any phase
    pub down_week: u8,
    /// Absolute weekly cap
    pub max: u8,
}

impl Default for QualityCaps {
    fn default() -> Self {
        Self {
            default_sessions: periodization::DEFAULT_QUALITY_SESSIONS,
            base: periodization::BASE_QUALITY_CAP,
            taper: periodization::TAPER_QUALITY_CAP,
            down_week: periodization::DOWN_WEEK_QUALITY_CAP,
            max: periodization::MAX_QUALITY_SESSIONS,
        }
    }
}

/// Macro-plan periodization configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodizationConfig {
    /// Shortest plan the generator accepts
    pub min_plan_weeks: u32,
    /// Conservative profile
    pub conservative: AggressivenessProfile,
    /// Moderate profile
    pub moderate: AggressivenessProfile,
    /// Aggressive profile
    pub aggressive: AggressivenessProfile,
    /// Long-run sizing
    pub long_run: LongRunConfig,
    /// Quality-session caps
    pub quality: QualityCaps,
    /// Taper weeks for races up to 10K
    pub taper_weeks_short: u32,
    /// Taper weeks for races up to the half marathon
    pub taper_weeks_half: u32,
    /// Taper weeks for the marathon and beyond
    pub taper_weeks_marathon: u32,
    /// B races at least this long are followed by a recovery week
    pub recovery_block_min_race_meters: f64,
}

impl Default for PeriodizationConfig {
    fn default() -> Self {
        Self {
            min_plan_weeks: periodization::MIN_PLAN_WEEKS,
            conservative: AggressivenessProfile::conservative(),
            moderate: AggressivenessProfile::moderate(),
            aggressive: AggressivenessProfile::aggressive(),
            long_run: LongRunConfig::default(),
            quality: QualityCaps::default(),
            taper_weeks_short: taper::SHORT_RACE_WEEKS,
            taper_weeks_half: taper::HALF_MARATHON_WEEKS,
            taper_weeks_marathon: taper::MARATHON_WEEKS,
            recovery_block_min_race_meters: periodization::RECOVERY_BLOCK_MIN_RACE_METERS,
        }
    }
}

impl PeriodizationConfig {
    /// Load periodization configuration from environment
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_plan_weeks: env_or("PACER_MIN_PLAN_WEEKS", defaults.min_plan_weeks),
            conservative: defaults.conservative.with_env_overrides("CONSERVATIVE"),
            moderate: defaults.moderate.with_env_overrides("MODERATE"),
            aggressive: defaults.aggressive.with_env_overrides("AGGRESSIVE"),
            long_run: LongRunConfig {
                fraction: env_or("PACER_LONG_RUN_FRACTION", defaults.long_run.fraction),
                cap_short: env_or("PACER_LONG_RUN_CAP_SHORT", defaults.long_run.cap_short),
                cap_half: env_or("PACER_LONG_RUN_CAP_HALF", defaults.long_run.cap_half),
                cap_marathon: env_or("PACER_LONG_RUN_CAP_MARATHON", defaults.long_run.cap_marathon),
            },
            quality: QualityCaps {
                default_sessions: env_or(
                    "PACER_DEFAULT_QUALITY_SESSIONS",
                    defaults.quality.default_sessions,
                ),
                max: env_or("PACER_MAX_QUALITY_SESSIONS", defaults.quality.max),
                ..defaults.quality
            },
            ..defaults
        }
    }

    /// Profile for an aggressiveness level
    #[must_use]
    pub const fn profile(&self, aggressiveness: PlanAggressiveness) -> &AggressivenessProfile {
        match aggressiveness {
            PlanAggressiveness::Conservative => &self.conservative,
            PlanAggressiveness::Moderate => &self.moderate,
            PlanAggressiveness::Aggressive => &self.aggressive,
        }
    }

    /// Taper length for a race distance, before the plan-length cap
    #[must_use]
    pub fn taper_weeks_for(&self, distance_meters: f64) -> u32 {
        if distance_meters <= race_distances::TEN_K {
            self.taper_weeks_short
        } else if distance_meters <= race_distances::HALF_MARATHON {
            self.taper_weeks_half
        } else {
            self.taper_weeks_marathon
        }
    }

    /// Long-run cap in miles for a race distance
    #[must_use]
    pub fn long_run_cap(&self, distance_meters: f64) -> u32 {
        if distance_meters <= race_distances::TEN_K {
            self.long_run.cap_short
        } else if distance_meters <= race_distances::HALF_MARATHON {
            self.long_run.cap_half
        } else {
            self.long_run.cap_marathon
        }
    }

    /// Iterate the three profiles with their names
    pub(crate) fn profiles(&self) -> [(&'static str, &AggressivenessProfile); 3] {
        [
            ("conservative", &self.conservative),
            ("moderate", &self.moderate),
            ("aggressive", &self.aggressive),
        ]
    }
}
