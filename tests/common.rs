// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup plus race, history and plan-input builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pacer`

use std::sync::Once;

use chrono::{Days, NaiveDate};
use pacer_core::constants::race_distances::{HALF_MARATHON, TEN_K};
use pacer_core::models::{
    AthleteProfile, CompletedWorkoutSummary, PlanAggressiveness, Race, RacePriority,
    WorkoutRecord, WorkoutType,
};
use pacer_intelligence::PlanGenerationInput;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Parse a `YYYY-MM-DD` date
pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
}

/// `start` plus `days`
pub fn days_after(start: NaiveDate, days: u64) -> NaiveDate {
    start.checked_add_days(Days::new(days)).unwrap()
}

/// `start` minus `days`
pub fn days_before(start: NaiveDate, days: u64) -> NaiveDate {
    start.checked_sub_days(Days::new(days)).unwrap()
}

/// Monday used as week 1 of most test plans
pub fn plan_start() -> NaiveDate {
    date("2025-01-06")
}

/// Goal half marathon exactly `weeks` weeks after [`plan_start`]
pub fn half_marathon(weeks: u64) -> Race {
    Race {
        id: "race-half".to_owned(),
        name: "Spring Half".to_owned(),
        date: days_after(plan_start(), weeks * 7),
        distance_meters: HALF_MARATHON,
        priority: RacePriority::A,
        goal_time_seconds: None,
    }
}

/// Intermediate race on a given date
pub fn tune_up(id: &str, on: NaiveDate, priority: RacePriority) -> Race {
    Race {
        id: id.to_owned(),
        name: format!("Tune-up {id}"),
        date: on,
        distance_meters: TEN_K,
        priority,
        goal_time_seconds: None,
    }
}

/// 20 → 30 mpw, 5 runs, moderate half-marathon plan input
pub fn half_marathon_input(weeks: u64) -> PlanGenerationInput {
    PlanGenerationInput {
        race: Some(half_marathon(weeks)),
        start_date: plan_start(),
        current_weekly_mileage: 20,
        peak_weekly_mileage: 30,
        runs_per_week: 5,
        quality_sessions_per_week: Some(2),
        aggressiveness: PlanAggressiveness::Moderate,
        intermediate_races: Vec::new(),
        profile: AthleteProfile::default(),
        vdot: None,
        vdot_confidence: None,
    }
}

/// Four weeks of steady history ending the day before `as_of`
///
/// Five runs a week: four easy 4-mile runs and one 8-mile long run (24 mpw).
pub fn steady_history(as_of: NaiveDate) -> Vec<WorkoutRecord> {
    let mut history = Vec::new();
    for week in 0..4_u64 {
        for (offset, miles) in [(1_u64, 4.0), (2, 4.0), (3, 4.0), (4, 4.0), (6, 8.0)] {
            let back = week * 7 + offset;
            history.push(WorkoutRecord {
                date: as_of.checked_sub_days(Days::new(back)).unwrap(),
                distance_miles: miles,
                duration_seconds: miles * 540.0,
                workout_type: Some(if miles > 5.0 {
                    WorkoutType::LongRun
                } else {
                    WorkoutType::Easy
                }),
                is_race: false,
            });
        }
    }
    history
}

/// Completed quality session with a reflection RPE
pub fn rated_session(on: NaiveDate, workout_type: WorkoutType, rpe: u8) -> CompletedWorkoutSummary {
    CompletedWorkoutSummary {
        date: on,
        workout_type,
        distance_miles: 6.0,
        duration_seconds: 2_880.0,
        pace_seconds_per_mile: Some(480.0),
        reflection_rpe: Some(rpe),
        assessment_rpe: None,
        provider_perceived_exertion: None,
        matched_planned: true,
    }
}
