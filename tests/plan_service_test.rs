// ABOUTME: Integration tests for plan regeneration and rolling window population over the in-memory store
// ABOUTME: Covers fallback settings, VDOT estimation, destructive regeneration and window progression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use pacer::{InMemoryPlanStore, PlanRequest, PlanService, PlanStore, ServiceConfig, WindowRequest};
use pacer_core::constants::meters_to_miles;
use pacer_core::constants::race_distances::FIVE_K;
use pacer_core::errors::ErrorCode;
use pacer_core::models::{AthleteProfile, WorkoutRecord, WorkoutType};
use pacer_intelligence::{DeclaredSettings, StructurePreferences};

fn service() -> PlanService<InMemoryPlanStore> {
    common::init_test_logging();
    PlanService::new(Arc::new(InMemoryPlanStore::new()), ServiceConfig::default())
}

fn plan_request() -> PlanRequest {
    PlanRequest {
        race: Some(common::half_marathon(16)),
        start_date: common::plan_start(),
        history: common::steady_history(common::plan_start()),
        settings: DeclaredSettings::default(),
        preferences: StructurePreferences::default(),
        aggressiveness: None,
        intermediate_races: Vec::new(),
        profile: AthleteProfile::default(),
        vdot: None,
    }
}

fn window_request() -> WindowRequest {
    WindowRequest {
        race: common::half_marathon(16),
        as_of: common::plan_start(),
        preferences: StructurePreferences::default(),
        profile: AthleteProfile::default(),
        intermediate_races: Vec::new(),
        recent_workouts: Vec::new(),
        zones: None,
        vdot: Some(50.0),
    }
}

#[tokio::test]
async fn test_regenerate_stores_plan() {
    let service = service();

    let plan = service.regenerate_plan(&plan_request()).await.unwrap();

    assert_eq!(plan.summary.total_weeks, 16);
    assert_eq!(service.store().plan_count(), 1);
    let stored = service.store().load_plan("race-half").await.unwrap().unwrap();
    assert_eq!(stored.blocks, plan.blocks);
    assert!(service
        .store()
        .populated_weeks("race-half")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_history_drives_plan_inputs() {
    let service = service();

    let input = service.build_plan_input(&plan_request()).unwrap();

    assert_eq!(input.current_weekly_mileage, 24);
    assert_eq!(input.peak_weekly_mileage, 31);
    assert_eq!(input.runs_per_week, 5);
    assert_eq!(input.quality_sessions_per_week, Some(2));
    assert!(input.vdot.is_none());
}

#[tokio::test]
async fn test_missing_race_is_reported() {
    let service = service();
    let request = PlanRequest {
        race: None,
        ..plan_request()
    };

    let error = service.regenerate_plan(&request).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRace);
    assert_eq!(service.store().plan_count(), 0);
}

#[tokio::test]
async fn test_declared_settings_fallback() {
    let service = service();
    let without_history = PlanRequest {
        history: Vec::new(),
        ..plan_request()
    };

    let error = service.regenerate_plan(&without_history).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingSettings);

    let declared = PlanRequest {
        settings: DeclaredSettings {
            weekly_mileage: Some(20),
            peak_weekly_mileage: Some(28),
            runs_per_week: Some(4),
        },
        ..without_history
    };
    let input = service.build_plan_input(&declared).unwrap();
    assert_eq!(input.current_weekly_mileage, 20);
    assert_eq!(input.peak_weekly_mileage, 28);
    assert_eq!(input.runs_per_week, 4);

    assert!(service.regenerate_plan(&declared).await.is_ok());
}

fn three_run_history() -> Vec<WorkoutRecord> {
    let mut history = Vec::new();
    for week in 0..4_u64 {
        for (offset, miles) in [(1_u64, 5.0), (3, 5.0), (6, 8.0)] {
            history.push(WorkoutRecord {
                date: common::days_before(common::plan_start(), week * 7 + offset),
                distance_miles: miles,
                duration_seconds: miles * 540.0,
                workout_type: Some(WorkoutType::Easy),
                is_race: false,
            });
        }
    }
    history
}

#[tokio::test]
async fn test_run_count_from_history_shapes_plan_and_weeks() {
    let service = service();
    let request = PlanRequest {
        history: three_run_history(),
        ..plan_request()
    };

    let input = service.build_plan_input(&request).unwrap();
    assert_eq!(input.runs_per_week, 3);

    let plan = service.regenerate_plan(&request).await.unwrap();
    assert_eq!(plan.runs_per_week, 3);

    // Preferences still ask for five days; the plan's run count wins
    let window = service.populate_next_window(&window_request()).await.unwrap();
    for (week, workouts) in &window.workouts {
        assert_eq!(workouts.len(), 3, "week {week}");
    }
}

#[tokio::test]
async fn test_declared_run_count_reaches_window() {
    let service = service();
    let request = PlanRequest {
        history: Vec::new(),
        settings: DeclaredSettings {
            weekly_mileage: Some(20),
            peak_weekly_mileage: Some(28),
            runs_per_week: Some(4),
        },
        ..plan_request()
    };
    service.regenerate_plan(&request).await.unwrap();

    let window = service.populate_next_window(&window_request()).await.unwrap();

    assert_eq!(window.workouts.len(), 3);
    for workouts in window.workouts.values() {
        assert_eq!(workouts.len(), 4);
    }
}

#[tokio::test]
async fn test_vdot_estimated_from_recent_race() {
    let service = service();
    let mut request = plan_request();
    request.history.push(WorkoutRecord {
        date: common::date("2024-12-27"),
        distance_miles: meters_to_miles(FIVE_K),
        duration_seconds: 1_200.0,
        workout_type: Some(WorkoutType::Race),
        is_race: true,
    });

    let input = service.build_plan_input(&request).unwrap();
    assert!(input.vdot.is_some());
    assert!(input.vdot_confidence.is_some());

    let plan = service.regenerate_plan(&request).await.unwrap();
    assert!(plan.race_prediction.is_some());
}

#[tokio::test]
async fn test_windows_advance_until_plan_is_covered() {
    let service = service();
    service.regenerate_plan(&plan_request()).await.unwrap();

    let first = service.populate_next_window(&window_request()).await.unwrap();
    assert_eq!(first.workouts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(first.workout_count() > 0);

    let second = service.populate_next_window(&window_request()).await.unwrap();
    assert_eq!(second.workouts.keys().copied().collect::<Vec<_>>(), vec![4, 5, 6]);

    let stored = service.store().load_workouts("race-half", 4).await.unwrap();
    assert_eq!(stored, second.workouts[&4]);

    let mut calls = 2;
    loop {
        let window = service.populate_next_window(&window_request()).await.unwrap();
        calls += 1;
        if window.workouts.is_empty() {
            break;
        }
        assert!(calls < 10, "window population never finished");
    }

    assert_eq!(calls, 7);
    let populated = service.store().populated_weeks("race-half").await.unwrap();
    assert_eq!(populated, (1..=16).collect::<BTreeSet<u32>>());
}

#[tokio::test]
async fn test_regeneration_discards_workouts() {
    let service = service();
    service.regenerate_plan(&plan_request()).await.unwrap();
    service.populate_next_window(&window_request()).await.unwrap();
    assert!(!service
        .store()
        .populated_weeks("race-half")
        .await
        .unwrap()
        .is_empty());

    service.regenerate_plan(&plan_request()).await.unwrap();

    assert!(service
        .store()
        .populated_weeks("race-half")
        .await
        .unwrap()
        .is_empty());
    let window = service.populate_next_window(&window_request()).await.unwrap();
    assert_eq!(window.workouts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_concurrent_regenerations_leave_one_plan() {
    let service = Arc::new(service());
    let request = plan_request();

    let (first, second) = tokio::join!(
        service.regenerate_plan(&request),
        service.regenerate_plan(&request)
    );

    assert_eq!(first.unwrap().blocks, second.unwrap().blocks);
    assert_eq!(service.store().plan_count(), 1);
}

#[tokio::test]
async fn test_window_without_plan_is_not_found() {
    let service = service();

    let error = service
        .populate_next_window(&window_request())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_store_rejects_weeks_outside_plan() {
    let service = service();
    service.regenerate_plan(&plan_request()).await.unwrap();

    let mut foreign = BTreeMap::new();
    foreign.insert(17, Vec::new());
    let error = service
        .store()
        .save_workouts("race-half", &foreign)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let error = service
        .store()
        .save_workouts("unknown-race", &BTreeMap::new())
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}
