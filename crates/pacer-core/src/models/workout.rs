// ABOUTME: Planned and completed workout records plus interval structure segments
// ABOUTME: PlannedWorkout is created scheduled; only the logging collaborator changes status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::EffortCategory;

/// Kind of workout prescribed or logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Very easy short run
    Recovery,
    /// Easy aerobic run
    Easy,
    /// Short easy run the day before a race
    ShakeOut,
    /// Weekly long run
    LongRun,
    /// Moderate steady-state run
    Steady,
    /// Unstructured speed play
    Fartlek,
    /// Hill repeats
    Hills,
    /// Continuous tempo run
    Tempo,
    /// Threshold cruise intervals
    Threshold,
    /// Goal race-pace work
    RacePace,
    /// VO2max intervals
    Intervals,
    /// Race
    Race,
}

impl WorkoutType {
    /// Stable snake-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Easy => "easy",
            Self::ShakeOut => "shake_out",
            Self::LongRun => "long_run",
            Self::Steady => "steady",
            Self::Fartlek => "fartlek",
            Self::Hills => "hills",
            Self::Tempo => "tempo",
            Self::Threshold => "threshold",
            Self::RacePace => "race_pace",
            Self::Intervals => "intervals",
            Self::Race => "race",
        }
    }

    /// Quality sessions are the hard workouts that fill quality slots
    #[must_use]
    pub const fn is_quality(self) -> bool {
        matches!(
            self,
            Self::Fartlek
                | Self::Hills
                | Self::Tempo
                | Self::Threshold
                | Self::RacePace
                | Self::Intervals
        )
    }

    /// Dominant effort of the workout's main set
    #[must_use]
    pub const fn primary_effort(self) -> EffortCategory {
        match self {
            Self::Recovery | Self::ShakeOut => EffortCategory::Recovery,
            Self::Easy | Self::LongRun => EffortCategory::Easy,
            Self::Steady | Self::Fartlek => EffortCategory::Steady,
            Self::RacePace => EffortCategory::Marathon,
            Self::Tempo => EffortCategory::Tempo,
            Self::Threshold | Self::Hills => EffortCategory::Threshold,
            Self::Intervals | Self::Race => EffortCategory::Interval,
        }
    }

    /// One intensity step easier; recovery stays recovery
    #[must_use]
    pub const fn step_down(self) -> Self {
        match self {
            Self::Intervals => Self::Threshold,
            Self::Threshold | Self::RacePace | Self::Hills => Self::Tempo,
            Self::Tempo | Self::Fartlek => Self::Steady,
            Self::Steady | Self::LongRun => Self::Easy,
            Self::Easy | Self::ShakeOut | Self::Recovery => Self::Recovery,
            Self::Race => Self::Race,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a planned workout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    /// Created by the generator
    #[default]
    Scheduled,
    /// Logged as done
    Completed,
    /// Logged as skipped
    Skipped,
    /// Logged with changes
    Modified,
}

/// Role of a segment in a structured workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Easy running before the main set
    WarmUp,
    /// Main-set repetition
    Work,
    /// Jog or walk between repetitions
    Recovery,
    /// Easy running after the main set
    CoolDown,
}

/// One segment of an interval structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSegment {
    /// Role of the segment
    pub kind: SegmentKind,
    /// How many times the segment repeats
    pub repeats: u32,
    /// Distance per repeat in miles
    pub distance_miles: Option<f64>,
    /// Duration per repeat in seconds
    pub duration_seconds: Option<u32>,
    /// Target effort
    pub effort: EffortCategory,
    /// Target pace in seconds per mile when zones are known
    pub target_pace_seconds: Option<f64>,
}

impl IntervalSegment {
    /// Total distance of all repeats, if distance based
    #[must_use]
    pub fn total_distance_miles(&self) -> Option<f64> {
        self.distance_miles
            .map(|distance| distance * f64::from(self.repeats))
    }
}

/// A swap the athlete may choose instead of the prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAlternative {
    /// Workout type of the alternative
    pub workout_type: WorkoutType,
    /// What to do instead
    pub description: String,
}

/// A concrete day-level prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Scheduled date
    pub date: NaiveDate,
    /// Week of the macro plan this workout belongs to
    pub week_number: u32,
    /// Workout type
    pub workout_type: WorkoutType,
    /// Target distance in miles
    pub target_distance_miles: f64,
    /// Target duration in minutes, when pace is known
    pub target_duration_minutes: Option<u32>,
    /// Target pace in seconds per mile, when numeric targets apply
    pub target_pace_seconds: Option<f64>,
    /// Perceived-effort phrasing
    pub effort_description: String,
    /// Interval structure for quality sessions
    pub structure: Option<Vec<IntervalSegment>>,
    /// Why this workout, today
    pub rationale: String,
    /// Acceptable swaps
    pub alternatives: Vec<WorkoutAlternative>,
    /// Key session of the week
    pub is_key_workout: bool,
    /// Lifecycle state
    pub status: WorkoutStatus,
}

/// Where an RPE value came from, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpeSource {
    /// Lightweight post-run reflection
    Reflection,
    /// Full post-run assessment
    Assessment,
    /// Third-party perceived exertion
    Provider,
}

/// Actual outcome of a completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkoutSummary {
    /// Date run
    pub date: NaiveDate,
    /// Logged workout type
    pub workout_type: WorkoutType,
    /// Distance in miles
    pub distance_miles: f64,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Average pace in seconds per mile
    pub pace_seconds_per_mile: Option<f64>,
    /// RPE from the lightweight reflection
    #[serde(default)]
    pub reflection_rpe: Option<u8>,
    /// RPE from the full assessment
    #[serde(default)]
    pub assessment_rpe: Option<u8>,
    /// Perceived exertion reported by a synced provider
    #[serde(default)]
    pub provider_perceived_exertion: Option<f64>,
    /// Whether this matched a planned workout
    #[serde(default)]
    pub matched_planned: bool,
}

impl CompletedWorkoutSummary {
    /// RPE using reflection, then assessment, then provider exertion
    #[must_use]
    pub fn effective_rpe(&self) -> Option<(f64, RpeSource)> {
        self.reflection_rpe
            .map(|rpe| (f64::from(rpe), RpeSource::Reflection))
            .or_else(|| {
                self.assessment_rpe
                    .map(|rpe| (f64::from(rpe), RpeSource::Assessment))
            })
            .or_else(|| {
                self.provider_perceived_exertion
                    .filter(|rpe| (1.0..=10.0).contains(rpe))
                    .map(|rpe| (rpe, RpeSource::Provider))
            })
    }
}

/// Raw history record used for fitness assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Date run
    pub date: NaiveDate,
    /// Distance in miles
    pub distance_miles: f64,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Logged workout type, if known
    #[serde(default)]
    pub workout_type: Option<WorkoutType>,
    /// Whether the run was a race
    #[serde(default)]
    pub is_race: bool,
}
