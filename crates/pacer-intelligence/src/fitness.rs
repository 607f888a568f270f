// ABOUTME: Current-fitness estimate from trailing workout history
// ABOUTME: Falls back to declared settings when history is empty; never plans from zeros
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fitness assessment.
//!
//! Aggregates the trailing window (28 days by default) ending at an explicit
//! `as_of` date. The window is split into calendar-free 7-day buckets counted
//! back from `as_of`, so the result does not depend on which weekday the
//! assessment runs.

use crate::config::{FitnessConfig, PlanningConfig};
use crate::errors::PlanError;
use crate::pace_model::PaceModel;
use crate::physiological_constants::periodization::LONG_RUN_FRACTION;
use chrono::NaiveDate;
use pacer_core::constants::{miles_to_meters, units::DAYS_PER_WEEK};
use pacer_core::models::{WorkoutRecord, WorkoutType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Trust level of a fitness estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessConfidence {
    /// Plenty of recent runs
    High,
    /// Some runs
    Medium,
    /// Sparse history or declared settings
    Low,
}

/// Aggregated current fitness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessData {
    /// Average weekly mileage across the window
    pub typical_weekly_mileage: f64,
    /// Mean of each active week's longest run
    pub avg_long_run: f64,
    /// Average runs per week across the window
    pub runs_per_week: f64,
    /// Suggested peak weekly mileage
    pub suggested_peak_mileage: u32,
    /// Runs found in the window
    pub total_runs: usize,
    /// Most recent run in the window
    pub last_run_date: Option<NaiveDate>,
    /// Trust level
    pub confidence: FitnessConfidence,
}

impl FitnessData {
    /// Whether the estimate carries no usable signal
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_runs == 0 || self.typical_weekly_mileage <= 0.0
    }
}

/// Settings the athlete declared explicitly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredSettings {
    /// Current weekly mileage
    pub weekly_mileage: Option<u32>,
    /// Target peak weekly mileage
    pub peak_weekly_mileage: Option<u32>,
    /// Runs per week
    pub runs_per_week: Option<u8>,
}

/// Best VDOT found in recent history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VdotEstimate {
    /// Estimated VDOT
    pub vdot: f64,
    /// Date of the effort
    pub date: NaiveDate,
    /// Whether the effort was a race
    pub is_race: bool,
    /// Days between the effort and the assessment date
    pub age_days: i64,
}

/// Fitness assessor
#[derive(Debug, Clone, Default)]
pub struct FitnessAssessment {
    config: FitnessConfig,
}

impl FitnessAssessment {
    /// Assessor using the given planning configuration
    #[must_use]
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            config: config.fitness.clone(),
        }
    }

    fn window_weeks(&self) -> f64 {
        (self.config.assessment_window_days as f64 / DAYS_PER_WEEK as f64).max(1.0)
    }

    /// Aggregate the trailing window of `history` ending at `as_of`
    #[must_use]
    pub fn assess_current_fitness(
        &self,
        history: &[WorkoutRecord],
        as_of: NaiveDate,
    ) -> FitnessData {
        let window_days = self.config.assessment_window_days;
        let buckets = ((window_days + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK).max(1);
        let mut longest_per_week = vec![0.0_f64; usize::try_from(buckets).unwrap_or(1)];
        let mut total_miles = 0.0;
        let mut total_runs = 0_usize;
        let mut last_run_date: Option<NaiveDate> = None;

        for record in history {
            let age = (as_of - record.date).num_days();
            if age < 0 || age >= window_days || record.distance_miles <= 0.0 {
                continue;
            }
            let bucket = usize::try_from(age / DAYS_PER_WEEK).unwrap_or(0);
            if let Some(longest) = longest_per_week.get_mut(bucket) {
                *longest = longest.max(record.distance_miles);
            }
            total_miles += record.distance_miles;
            total_runs += 1;
            last_run_date = last_run_date.max(Some(record.date));
        }

        let weeks = self.window_weeks();
        let active_weeks: Vec<f64> = longest_per_week.into_iter().filter(|m| *m > 0.0).collect();
        let avg_long_run = if active_weeks.is_empty() {
            0.0
        } else {
            active_weeks.iter().sum::<f64>() / active_weeks.len() as f64
        };
        let typical_weekly_mileage = total_miles / weeks;
        let confidence = self.confidence_for(total_runs, last_run_date, as_of);

        debug!(
            total_runs,
            typical_weekly_mileage,
            avg_long_run,
            confidence = ?confidence,
            "Assessed current fitness"
        );

        FitnessData {
            typical_weekly_mileage,
            avg_long_run,
            runs_per_week: total_runs as f64 / weeks,
            suggested_peak_mileage: self.suggested_peak(typical_weekly_mileage),
            total_runs,
            last_run_date,
            confidence,
        }
    }

    fn suggested_peak(&self, weekly_mileage: f64) -> u32 {
        (weekly_mileage * self.config.peak_mileage_multiplier).round() as u32
    }

    fn confidence_for(
        &self,
        total_runs: usize,
        last_run_date: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> FitnessConfidence {
        let recent = last_run_date
            .is_some_and(|date| (as_of - date).num_days() <= self.config.recent_run_days);
        if total_runs >= self.config.high_confidence_runs && recent {
            FitnessConfidence::High
        } else if total_runs >= self.config.medium_confidence_runs {
            FitnessConfidence::Medium
        } else {
            FitnessConfidence::Low
        }
    }

    /// Substitute declared settings when history carries no signal
    ///
    /// A fallback estimate is always low confidence. History with signal is
    /// returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::MissingSettings` when history is empty and no
    /// weekly mileage was declared
    pub fn apply_fallback(
        &self,
        fitness: FitnessData,
        settings: &DeclaredSettings,
    ) -> Result<FitnessData, PlanError> {
        if !fitness.is_empty() {
            return Ok(fitness);
        }

        let weekly = settings
            .weekly_mileage
            .filter(|miles| *miles > 0)
            .ok_or(PlanError::MissingSettings {
                field: "weekly_mileage",
            })?;
        let weekly_miles = f64::from(weekly);
        let runs_per_week = settings
            .runs_per_week
            .unwrap_or(self.config.default_runs_per_week);

        warn!(
            weekly_mileage = weekly,
            "No usable workout history, falling back to declared settings"
        );

        Ok(FitnessData {
            typical_weekly_mileage: weekly_miles,
            avg_long_run: (weekly_miles * LONG_RUN_FRACTION).round(),
            runs_per_week: f64::from(runs_per_week),
            suggested_peak_mileage: settings
                .peak_weekly_mileage
                .unwrap_or_else(|| self.suggested_peak(weekly_miles)),
            total_runs: fitness.total_runs,
            last_run_date: fitness.last_run_date,
            confidence: FitnessConfidence::Low,
        })
    }

    /// Highest VDOT implied by a race or hard effort in the search window
    ///
    /// Later efforts win ties.
    #[must_use]
    pub fn best_recent_vdot(
        &self,
        history: &[WorkoutRecord],
        as_of: NaiveDate,
    ) -> Option<VdotEstimate> {
        history
            .iter()
            .filter(|record| {
                let age = (as_of - record.date).num_days();
                (0..=self.config.best_effort_window_days).contains(&age) && is_hard_effort(record)
            })
            .filter_map(|record| {
                PaceModel::calculate_vdot(
                    miles_to_meters(record.distance_miles),
                    record.duration_seconds,
                )
                .map(|vdot| VdotEstimate {
                    vdot,
                    date: record.date,
                    is_race: record.is_race || record.workout_type == Some(WorkoutType::Race),
                    age_days: (as_of - record.date).num_days(),
                })
            })
            .max_by(|a, b| a.vdot.total_cmp(&b.vdot).then(a.date.cmp(&b.date)))
    }
}

/// Races and sustained hard sessions are usable VDOT sources
fn is_hard_effort(record: &WorkoutRecord) -> bool {
    record.is_race
        || matches!(
            record.workout_type,
            Some(
                WorkoutType::Race
                    | WorkoutType::Tempo
                    | WorkoutType::Threshold
                    | WorkoutType::RacePace
            )
        )
}
