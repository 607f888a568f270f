// ABOUTME: Athlete profile snapshot with comfort ratings and training preferences
// ABOUTME: Read-only input the plan generators use to bias volume and intensity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::WorkoutType;

/// Self-reported comfort (1 = dreads it, 5 = loves it) per workout family
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortRatings {
    /// VO2max / interval sessions
    pub vo2max: Option<u8>,
    /// Tempo and threshold running
    pub tempo: Option<u8>,
    /// Long runs
    pub long_run: Option<u8>,
    /// Hill repeats
    pub hills: Option<u8>,
    /// Race-pace work
    pub race_pace: Option<u8>,
}

/// How the athlete prefers workouts to be prescribed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingBy {
    /// Numeric pace targets
    #[default]
    Pace,
    /// Perceived effort only
    Effort,
    /// Heart rate (rendered as effort phrasing by the engine)
    HeartRate,
}

/// Biographical and preference attributes of the athlete
///
/// Immutable per generation call; owned by the calling layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Comfort per workout family
    #[serde(default)]
    pub comfort: ComfortRatings,
    /// Years of consistent running
    pub years_running: Option<f64>,
    /// Free-text injury history entries
    #[serde(default)]
    pub injury_history: Vec<String>,
    /// Injured within the last six months
    #[serde(default)]
    pub recently_injured: bool,
    /// Time available for a weekday run
    pub weekday_availability_minutes: Option<u32>,
    /// Time available for a weekend run
    pub weekend_availability_minutes: Option<u32>,
    /// Life stress, 1 (low) to 5 (high)
    pub stress_level: Option<u8>,
    /// Heat sensitivity, 1 (tolerant) to 5 (very sensitive)
    pub heat_sensitivity: Option<u8>,
    /// Prescription preference
    #[serde(default)]
    pub training_by: TrainingBy,
}

/// Comfort at or below this value counts as low
const LOW_COMFORT: u8 = 2;

/// Years of running below which the athlete is treated as a novice
const NOVICE_YEARS: f64 = 1.0;

/// Injury-history entries that mark an injury-prone athlete
const RECURRING_INJURIES: usize = 2;

impl AthleteProfile {
    /// Comfort rating relevant to a workout type, if the athlete gave one
    #[must_use]
    pub fn comfort_for(&self, workout_type: WorkoutType) -> Option<u8> {
        match workout_type {
            WorkoutType::Intervals => self.comfort.vo2max,
            WorkoutType::Tempo | WorkoutType::Threshold => self.comfort.tempo,
            WorkoutType::LongRun => self.comfort.long_run,
            WorkoutType::Hills => self.comfort.hills,
            WorkoutType::RacePace => self.comfort.race_pace,
            _ => None,
        }
    }

    /// Whether the athlete reported low comfort for this workout type
    #[must_use]
    pub fn has_low_comfort(&self, workout_type: WorkoutType) -> bool {
        self.comfort_for(workout_type)
            .is_some_and(|rating| rating <= LOW_COMFORT)
    }

    /// Novices, recently injured and injury-prone runners get conservative intensity
    #[must_use]
    pub fn needs_caution(&self) -> bool {
        self.recently_injured
            || self.injury_history.len() >= RECURRING_INJURIES
            || self.years_running.is_some_and(|years| years < NOVICE_YEARS)
    }

    /// High life stress (4-5 on the 1-5 scale)
    #[must_use]
    pub fn is_highly_stressed(&self) -> bool {
        self.stress_level.is_some_and(|level| level >= 4)
    }

    /// Whether numeric pace targets should be shown
    #[must_use]
    pub fn wants_pace_targets(&self) -> bool {
        self.training_by == TrainingBy::Pace
    }
}
