// ABOUTME: Daniels-Gilbert VDOT model: race time to VDOT, VDOT to pace zones and predictions
// ABOUTME: Implausible values are suppressed to None instead of propagated
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pace Model
//!
//! Converts a single fitness number (VDOT) to and from race performances.
//!
//! Two regressions drive everything:
//!
//! - oxygen cost of running at velocity `v` (m/min):
//!   `VO2 = -4.60 + 0.182258·v + 0.000104·v²`
//! - fraction of VO2max sustainable for `t` minutes:
//!   `%max = 0.8 + 0.1894393·e^(-0.012778·t) + 0.2989558·e^(-0.1932605·t)`
//!
//! `VDOT = VO2 / %max`. Pace zones invert the cost curve with the quadratic
//! formula at a fixed %VO2max per zone. Race prediction has no closed form
//! because `%max` depends on the finish time, so it is a bounded fixed-point
//! iteration.
//!
//! # Scientific References
//!
//! - Daniels, J. & Gilbert, J. (1979). *Oxygen Power: Performance Tables for Distance Runners*
//! - Daniels, J. (2013). *Daniels' Running Formula* (3rd ed.). Human Kinetics.

use crate::config::{PlanningConfig, PredictionBands, ZoneTargets};
use crate::physiological_constants::vdot::{
    COST_A, COST_B, COST_C, MAX_VDOT, MIN_DISTANCE_METERS, MIN_VDOT, PERCENT_BASE, PERCENT_K1,
    PERCENT_K2, PERCENT_P1, PERCENT_P2, PREDICTION_MAX_ITERATIONS, PREDICTION_SEED_PERCENT,
    PREDICTION_TOLERANCE,
};
use pacer_core::constants::race_distances::{FIVE_K, HALF_MARATHON, MARATHON, TEN_K};
use pacer_core::constants::units::{METERS_PER_MILE, SECONDS_PER_MINUTE};
use pacer_core::models::{EffortCategory, PredictionConfidence, RacePrediction, TimeRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Distances covered by [`PaceModel::predict_race_times`]
pub const STANDARD_DISTANCES: [f64; 4] = [FIVE_K, TEN_K, HALF_MARATHON, MARATHON];

/// Per-mile target paces in seconds, one per effort category
///
/// Larger values are slower. A zone set built by the model is strictly
/// ordered recovery > easy > ... > interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaceZones {
    /// Recovery pace
    pub recovery: f64,
    /// Easy pace
    pub easy: f64,
    /// Steady pace
    pub steady: f64,
    /// Marathon pace
    pub marathon: f64,
    /// Tempo pace
    pub tempo: f64,
    /// Threshold pace
    pub threshold: f64,
    /// Interval pace
    pub interval: f64,
}

impl PaceZones {
    /// Target pace for a category
    #[must_use]
    pub const fn pace_for(&self, category: EffortCategory) -> f64 {
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

    /// Whether paces strictly decrease from recovery to interval
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        EffortCategory::ALL
            .windows(2)
            .all(|pair| self.pace_for(pair[0]) > self.pace_for(pair[1]))
    }

    /// Every zone slowed (positive) or sped up (negative) by `seconds`
    #[must_use]
    pub fn shifted(&self, seconds: f64) -> Self {
        Self::from_fn(|category| self.pace_for(category) + seconds)
    }

    /// Build a zone set from a per-category function
    pub fn from_fn(mut pace: impl FnMut(EffortCategory) -> f64) -> Self {
        Self {
            recovery: pace(EffortCategory::Recovery),
            easy: pace(EffortCategory::Easy),
            steady: pace(EffortCategory::Steady),
            marathon: pace(EffortCategory::Marathon),
            tempo: pace(EffortCategory::Tempo),
            threshold: pace(EffortCategory::Threshold),
            interval: pace(EffortCategory::Interval),
        }
    }
}

/// VDOT pace model parameterised by zone targets and prediction bands
#[derive(Debug, Clone, Default)]
pub struct PaceModel {
    zones: ZoneTargets,
    bands: PredictionBands,
}

impl PaceModel {
    /// Model using the given planning configuration
    #[must_use]
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            zones: config.zones.clone(),
            bands: config.prediction.clone(),
        }
    }

    /// Whether a VDOT lies in the physiologically plausible range
    #[must_use]
    pub fn is_plausible(vdot: f64) -> bool {
        vdot.is_finite() && (MIN_VDOT..=MAX_VDOT).contains(&vdot)
    }

    /// Fraction of VO2max sustainable for `minutes`
    #[must_use]
    pub fn percent_vo2max(minutes: f64) -> f64 {
        PERCENT_P2.mul_add(
            (PERCENT_K2 * minutes).exp(),
            PERCENT_P1.mul_add((PERCENT_K1 * minutes).exp(), PERCENT_BASE),
        )
    }

    /// Oxygen cost (ml/kg/min) of running at `velocity` m/min
    #[must_use]
    pub fn vo2_cost(velocity: f64) -> f64 {
        (COST_A * velocity).mul_add(velocity, COST_B.mul_add(velocity, COST_C))
    }

    /// Velocity (m/min) whose oxygen cost equals `vo2`
    ///
    /// Solves `A·v² + B·v + (C - vo2) = 0` for the positive root.
    #[must_use]
    pub fn velocity_for_vo2(vo2: f64) -> Option<f64> {
        let c = COST_C - vo2;
        let discriminant = COST_B.mul_add(COST_B, -(4.0 * COST_A * c));
        if discriminant < 0.0 {
            return None;
        }
        let velocity = (discriminant.sqrt() - COST_B) / (2.0 * COST_A);
        (velocity.is_finite() && velocity > 0.0).then_some(velocity)
    }

    /// VDOT from a race performance
    ///
    /// Returns `None` below the minimum distance, for non-positive times, and
    /// when the result falls outside the plausible range.
    #[must_use]
    pub fn calculate_vdot(distance_meters: f64, time_seconds: f64) -> Option<f64> {
        if !distance_meters.is_finite()
            || !time_seconds.is_finite()
            || distance_meters < MIN_DISTANCE_METERS
            || time_seconds <= 0.0
        {
            return None;
        }

        let vdot = Self::implied_vdot(distance_meters, time_seconds / SECONDS_PER_MINUTE);
        if Self::is_plausible(vdot) {
            Some(vdot)
        } else {
            debug!(
                distance_meters,
                time_seconds, vdot, "Discarding implausible VDOT"
            );
            None
        }
    }

    /// Unchecked VDOT for a distance covered in `minutes`
    fn implied_vdot(distance_meters: f64, minutes: f64) -> f64 {
        Self::vo2_cost(distance_meters / minutes) / Self::percent_vo2max(minutes)
    }

    /// Seconds per mile when running at `fraction` of VO2max
    #[must_use]
    pub fn pace_at_fraction(vdot: f64, fraction: f64) -> Option<f64> {
        Self::velocity_for_vo2(vdot * fraction)
            .map(|velocity| METERS_PER_MILE / velocity * SECONDS_PER_MINUTE)
    }

    /// Training pace zones for a VDOT
    ///
    /// Returns `None` when the VDOT is implausible.
    #[must_use]
    pub fn calculate_pace_zones(&self, vdot: f64) -> Option<PaceZones> {
        if !Self::is_plausible(vdot) {
            return None;
        }

        let mut failed = false;
        let zones = PaceZones::from_fn(|category| {
            Self::pace_at_fraction(vdot, self.zones.percent_for(category)).unwrap_or_else(|| {
                failed = true;
                f64::NAN
            })
        });

        (!failed && zones.is_ordered()).then_some(zones)
    }

    /// Predicted finish time in seconds for `distance_meters` at `vdot`
    ///
    /// Seeds at 80% VO2max, then alternates between checking the VDOT implied
    /// by the current guess and re-solving velocity at the %VO2max sustainable
    /// for that guess.
    #[must_use]
    pub fn predict_race_time(vdot: f64, distance_meters: f64) -> Option<f64> {
        if !Self::is_plausible(vdot) || !distance_meters.is_finite() || distance_meters <= 0.0 {
            return None;
        }

        let seed_velocity = Self::velocity_for_vo2(vdot * PREDICTION_SEED_PERCENT)?;
        let mut minutes = distance_meters / seed_velocity;

        for iteration in 0..PREDICTION_MAX_ITERATIONS {
            let implied = Self::implied_vdot(distance_meters, minutes);
            if (implied - vdot).abs() < PREDICTION_TOLERANCE {
                debug!(iteration, minutes, "Race-time prediction converged");
                break;
            }
            let velocity = Self::velocity_for_vo2(vdot * Self::percent_vo2max(minutes))?;
            minutes = distance_meters / velocity;
        }

        let seconds = minutes * SECONDS_PER_MINUTE;
        (seconds.is_finite() && seconds > 0.0).then_some(seconds)
    }

    /// Race pace in seconds per mile for a distance
    #[must_use]
    pub fn race_pace_for_distance(vdot: f64, distance_meters: f64) -> Option<f64> {
        Self::predict_race_time(vdot, distance_meters)
            .map(|seconds| seconds / (distance_meters / METERS_PER_MILE))
    }

    /// Heuristic band around a predicted time
    #[must_use]
    pub fn confidence_interval(
        &self,
        time_seconds: f64,
        confidence: PredictionConfidence,
    ) -> TimeRange {
        let band = self.bands.band(confidence);
        TimeRange {
            min: time_seconds * (1.0 - band),
            max: time_seconds * (1.0 + band),
        }
    }

    /// Confidence implied by how old and how reliable the VDOT source is
    #[must_use]
    pub fn confidence_from_source(&self, age_days: i64, is_race: bool) -> PredictionConfidence {
        if age_days > self.bands.stale_source_days {
            PredictionConfidence::Low
        } else if is_race && age_days <= self.bands.recent_race_days {
            PredictionConfidence::High
        } else {
            PredictionConfidence::Medium
        }
    }

    /// Prediction with band for one distance
    #[must_use]
    pub fn predict(
        &self,
        vdot: f64,
        distance_meters: f64,
        confidence: PredictionConfidence,
    ) -> Option<RacePrediction> {
        let seconds = Self::predict_race_time(vdot, distance_meters)?;
        Some(RacePrediction {
            distance_meters,
            seconds,
            range: self.confidence_interval(seconds, confidence),
            confidence,
        })
    }

    /// Predictions for 5K, 10K, half marathon and marathon
    #[must_use]
    pub fn predict_race_times(
        &self,
        vdot: f64,
        confidence: PredictionConfidence,
    ) -> Vec<RacePrediction> {
        STANDARD_DISTANCES
            .iter()
            .filter_map(|distance| self.predict(vdot, *distance, confidence))
            .collect()
    }
}

/// Format seconds as `h:mm:ss`, or `m:ss` under an hour
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Format seconds per mile as `m:ss/mi`
#[must_use]
pub fn format_pace(seconds_per_mile: f64) -> String {
    format!("{}/mi", format_duration(seconds_per_mile))
}
