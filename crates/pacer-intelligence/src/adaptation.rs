// ABOUTME: Rule table turning trailing RPE feedback into adjustments for upcoming sessions
// ABOUTME: Explicit, ordered rules so every adaptation decision is auditable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! RPE adaptation.
//!
//! Completed workouts from the trailing window are reduced to one
//! [`AdaptationSignal`]. The first [`AdaptationRule`] whose trigger matches the
//! signal decides the [`AdaptationAdjustment`] the window generator applies.

use crate::config::AdaptationConfig;
use crate::physiological_constants::adaptation::PROGRESSION_STREAK;
use chrono::NaiveDate;
use pacer_core::models::{CompletedWorkoutSummary, RpeSource, WorkoutType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum easy runs with RPE before easy-day fatigue is judged
const MIN_EASY_RUNS_FOR_FATIGUE: usize = 3;

/// What recent training says about the athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdaptationSignal {
    /// Most recent quality sessions were all rated at or above the high RPE
    HighRpeStreak {
        /// Consecutive hard-rated quality sessions, most recent first
        length: usize,
        /// Their mean RPE
        average_rpe: f64,
    },
    /// Easy days are rated too hard on average
    EasyRunFatigue {
        /// Mean easy-run RPE
        average_rpe: f64,
    },
    /// Most recent quality sessions were all rated comfortable
    ComfortableStreak {
        /// Consecutive comfortable quality sessions
        length: usize,
    },
    /// Nothing notable, or no RPE data
    Neutral,
}

/// Condition under which a rule fires
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleTrigger {
    /// High-RPE streak of at least `min_length`
    HighRpeStreak {
        /// Minimum streak
        min_length: usize,
    },
    /// Easy-run fatigue
    EasyRunFatigue,
    /// Comfortable streak of at least `min_length`
    ComfortableStreak {
        /// Minimum streak
        min_length: usize,
    },
}

impl RuleTrigger {
    /// Whether the trigger matches a signal
    #[must_use]
    pub const fn matches(&self, signal: &AdaptationSignal) -> bool {
        match (self, signal) {
            (Self::HighRpeStreak { min_length }, AdaptationSignal::HighRpeStreak { length, .. })
            | (
                Self::ComfortableStreak { min_length },
                AdaptationSignal::ComfortableStreak { length },
            ) => *length >= *min_length,
            (Self::EasyRunFatigue, AdaptationSignal::EasyRunFatigue { .. }) => true,
            _ => false,
        }
    }
}

/// Changes applied to upcoming sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptationAdjustment {
    /// Intensity steps removed from affected quality sessions
    pub intensity_steps_down: u8,
    /// Seconds per mile added to affected targets (negative is faster)
    pub pace_offset_seconds: f64,
    /// Easy days converted to recovery runs
    pub extra_recovery_days: u8,
    /// Work repetitions added to affected sessions
    pub extra_reps: u8,
    /// Upcoming quality sessions affected
    pub sessions_affected: u8,
}

/// One row of the adaptation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRule {
    /// Stable rule name for logs and audit
    pub name: String,
    /// When the rule fires
    pub trigger: RuleTrigger,
    /// What it changes
    pub adjustment: AdaptationAdjustment,
}

impl AdaptationRule {
    /// Default table, most severe first
    #[must_use]
    pub fn default_table() -> Vec<Self> {
        vec![
            Self {
                name: "sustained_high_rpe".to_owned(),
                trigger: RuleTrigger::HighRpeStreak { min_length: 3 },
                adjustment: AdaptationAdjustment {
                    intensity_steps_down: 2,
                    pace_offset_seconds: 8.0,
                    extra_recovery_days: 1,
                    extra_reps: 0,
                    sessions_affected: 2,
                },
            },
            Self {
                name: "high_rpe".to_owned(),
                trigger: RuleTrigger::HighRpeStreak { min_length: 2 },
                adjustment: AdaptationAdjustment {
                    intensity_steps_down: 1,
                    pace_offset_seconds: 5.0,
                    sessions_affected: 1,
                    ..AdaptationAdjustment::default()
                },
            },
            Self {
                name: "easy_run_fatigue".to_owned(),
                trigger: RuleTrigger::EasyRunFatigue,
                adjustment: AdaptationAdjustment {
                    pace_offset_seconds: 5.0,
                    extra_recovery_days: 1,
                    sessions_affected: 1,
                    ..AdaptationAdjustment::default()
                },
            },
            Self {
                name: "progression".to_owned(),
                trigger: RuleTrigger::ComfortableStreak {
                    min_length: PROGRESSION_STREAK,
                },
                adjustment: AdaptationAdjustment {
                    pace_offset_seconds: -3.0,
                    extra_reps: 1,
                    sessions_affected: 1,
                    ..AdaptationAdjustment::default()
                },
            },
        ]
    }
}

/// Outcome of evaluating recent training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptationDecision {
    /// Observed signal
    pub signal: AdaptationSignal,
    /// Rule that fired, if any
    pub rule: Option<AdaptationRule>,
    /// Sources of the RPE values considered, most recent first
    pub rpe_sources: Vec<RpeSource>,
}

impl AdaptationDecision {
    /// Adjustment to apply; default (no change) when no rule fired
    #[must_use]
    pub fn adjustment(&self) -> AdaptationAdjustment {
        self.rule
            .as_ref()
            .map(|rule| rule.adjustment.clone())
            .unwrap_or_default()
    }
}

/// Reduce recent workouts to a signal and pick the first matching rule
#[must_use]
pub fn evaluate(
    recent: &[CompletedWorkoutSummary],
    as_of: NaiveDate,
    config: &AdaptationConfig,
) -> AdaptationDecision {
    let mut window: Vec<&CompletedWorkoutSummary> = recent
        .iter()
        .filter(|workout| {
            let age = (as_of - workout.date).num_days();
            (0..=config.window_days).contains(&age)
        })
        .collect();
    window.sort_by(|a, b| b.date.cmp(&a.date));

    let quality: Vec<(f64, RpeSource)> = window
        .iter()
        .filter(|workout| workout.workout_type.is_quality())
        .filter_map(|workout| workout.effective_rpe())
        .collect();

    let signal = signal_from(&quality, &window, config);
    let rule = config
        .rules
        .iter()
        .find(|rule| rule.trigger.matches(&signal))
        .cloned();

    debug!(
        quality_sessions = quality.len(),
        signal = ?signal,
        rule = rule.as_ref().map_or("none", |r| r.name.as_str()),
        "Evaluated adaptation"
    );

    AdaptationDecision {
        signal,
        rule,
        rpe_sources: quality.iter().map(|(_, source)| *source).collect(),
    }
}

fn signal_from(
    quality: &[(f64, RpeSource)],
    window: &[&CompletedWorkoutSummary],
    config: &AdaptationConfig,
) -> AdaptationSignal {
    let high: Vec<f64> = quality
        .iter()
        .map(|(rpe, _)| *rpe)
        .take_while(|rpe| *rpe >= config.high_rpe)
        .collect();
    if high.len() >= 2 {
        return AdaptationSignal::HighRpeStreak {
            length: high.len(),
            average_rpe: mean(&high),
        };
    }

    let easy: Vec<f64> = window
        .iter()
        .filter(|workout| {
            matches!(
                workout.workout_type,
                WorkoutType::Easy | WorkoutType::Recovery
            )
        })
        .filter_map(|workout| workout.effective_rpe().map(|(rpe, _)| rpe))
        .collect();
    if easy.len() >= MIN_EASY_RUNS_FOR_FATIGUE && mean(&easy) >= config.easy_run_fatigue_rpe {
        return AdaptationSignal::EasyRunFatigue {
            average_rpe: mean(&easy),
        };
    }

    let comfortable = quality
        .iter()
        .take_while(|(rpe, _)| *rpe <= config.comfortable_rpe)
        .count();
    if comfortable > 0 {
        return AdaptationSignal::ComfortableStreak {
            length: comfortable,
        };
    }

    AdaptationSignal::Neutral
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
