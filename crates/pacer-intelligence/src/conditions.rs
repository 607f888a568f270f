// ABOUTME: Heat and elevation pace adjustments for effort classification
// ABOUTME: Temperature plus dew point table and a linear altitude penalty above 3000 ft
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Running conditions.
//!
//! Heat uses the temperature + dew point sum (both °F), a common coaching
//! heuristic for how much slower the same effort runs in humid heat.

use pacer_core::models::AthleteProfile;
use serde::{Deserialize, Serialize};

/// (upper bound of temperature + dew point in °F, slowdown percent)
const HEAT_TABLE: [(f64, f64); 9] = [
    (100.0, 0.0),
    (110.0, 0.5),
    (120.0, 1.0),
    (130.0, 2.0),
    (140.0, 3.0),
    (150.0, 4.5),
    (160.0, 6.0),
    (170.0, 8.0),
    (180.0, 10.0),
];

/// Slowdown above the last table row
const EXTREME_HEAT_PERCENT: f64 = 12.0;

/// Elevation where altitude starts to cost pace (feet)
const ELEVATION_THRESHOLD_FEET: f64 = 3_000.0;

/// Slowdown percent per 1000 ft above the threshold
const ELEVATION_PERCENT_PER_1000_FEET: f64 = 0.5;

/// Heat sensitivity at or above this scales heat slowdown up
const HIGH_HEAT_SENSITIVITY: u8 = 4;

/// Heat sensitivity at or below this scales heat slowdown down
const LOW_HEAT_SENSITIVITY: u8 = 2;

/// Conditions a run happened (or will happen) in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Air temperature in °F
    pub temperature_f: Option<f64>,
    /// Dew point in °F
    pub dew_point_f: Option<f64>,
    /// Elevation in feet
    pub elevation_feet: Option<f64>,
    /// Athlete heat sensitivity, 1 (tolerant) to 5 (very sensitive)
    pub heat_sensitivity: Option<u8>,
}

impl Conditions {
    /// Take the athlete's heat sensitivity when none was given explicitly
    #[must_use]
    pub fn for_athlete(self, profile: &AthleteProfile) -> Self {
        Self {
            heat_sensitivity: self.heat_sensitivity.or(profile.heat_sensitivity),
            ..self
        }
    }
}

/// Percent slowdown for a temperature and dew point
#[must_use]
pub fn heat_slowdown_percent(temperature_f: f64, dew_point_f: f64) -> f64 {
    let combined = temperature_f + dew_point_f;
    HEAT_TABLE
        .iter()
        .find(|(upper, _)| combined <= *upper)
        .map_or(EXTREME_HEAT_PERCENT, |(_, percent)| *percent)
}

/// Percent slowdown for elevation
#[must_use]
pub fn elevation_slowdown_percent(elevation_feet: f64) -> f64 {
    ((elevation_feet - ELEVATION_THRESHOLD_FEET) / 1_000.0 * ELEVATION_PERCENT_PER_1000_FEET)
        .max(0.0)
}

fn sensitivity_factor(sensitivity: Option<u8>) -> f64 {
    match sensitivity {
        Some(level) if level >= HIGH_HEAT_SENSITIVITY => 1.25,
        Some(level) if level <= LOW_HEAT_SENSITIVITY => 0.75,
        _ => 1.0,
    }
}

/// Seconds per mile to add to `pace_seconds` for the given conditions
#[must_use]
pub fn condition_adjustment_seconds(pace_seconds: f64, conditions: &Conditions) -> f64 {
    let heat = match (conditions.temperature_f, conditions.dew_point_f) {
        (Some(temperature), Some(dew_point)) => {
            heat_slowdown_percent(temperature, dew_point)
                * sensitivity_factor(conditions.heat_sensitivity)
        }
        _ => 0.0,
    };
    let altitude = conditions
        .elevation_feet
        .map_or(0.0, elevation_slowdown_percent);

    pace_seconds * (heat + altitude) / 100.0
}
