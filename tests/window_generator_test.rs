// ABOUTME: Integration tests for rolling-window workout generation
// ABOUTME: Window selection, slot expansion, race insertion and protection, adaptation and biases
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use pacer_core::models::{
    AthleteProfile, Block, ComfortRatings, MacroPlan, PlannedWorkout, RacePriority, TrainingBy,
    WorkoutStatus, WorkoutType,
};
use pacer_intelligence::{
    create_weekly_structure, select_window, MacroPlanGenerator, PaceModel, PaceZones,
    StructurePreferences, WindowGenerationInput, WindowGenerator, WindowPlan, MAX_WINDOW_BLOCKS,
};

fn macro_plan() -> MacroPlan {
    MacroPlanGenerator::default()
        .generate(&common::half_marathon_input(16))
        .unwrap()
}

fn zones() -> PaceZones {
    PaceModel::default().calculate_pace_zones(50.0).unwrap()
}

fn weeks(numbers: &[u32]) -> Vec<Block> {
    macro_plan()
        .blocks
        .into_iter()
        .filter(|block| numbers.contains(&block.week_number))
        .collect()
}

fn window_input(blocks: Vec<Block>) -> WindowGenerationInput {
    WindowGenerationInput {
        blocks,
        structure: create_weekly_structure(&StructurePreferences::default()),
        zones: Some(zones()),
        vdot: Some(50.0),
        profile: AthleteProfile::default(),
        goal_race: common::half_marathon(16),
        intermediate_races: Vec::new(),
        recent_workouts: Vec::new(),
        as_of: common::plan_start(),
    }
}

fn generate(input: &WindowGenerationInput) -> WindowPlan {
    WindowGenerator::default().generate(input)
}

fn workout_on(plan: &WindowPlan, date: NaiveDate) -> &PlannedWorkout {
    plan.iter()
        .find(|workout| workout.date == date)
        .unwrap_or_else(|| panic!("no workout on {date}"))
}

#[test]
fn test_select_window_takes_next_unpopulated_blocks() {
    let blocks = macro_plan().blocks;

    let first: Vec<u32> = select_window(&blocks, &BTreeSet::new(), 3)
        .iter()
        .map(|b| b.week_number)
        .collect();
    assert_eq!(first, vec![1, 2, 3]);

    let populated: BTreeSet<u32> = [1, 2, 4].into_iter().collect();
    let next: Vec<u32> = select_window(&blocks, &populated, 3)
        .iter()
        .map(|b| b.week_number)
        .collect();
    assert_eq!(next, vec![3, 5, 6]);
}

#[test]
fn test_select_window_never_exceeds_maximum() {
    let blocks = macro_plan().blocks;

    assert_eq!(select_window(&blocks, &BTreeSet::new(), 10).len(), MAX_WINDOW_BLOCKS);
    assert_eq!(select_window(&blocks, &BTreeSet::new(), 1).len(), 1);

    let all: BTreeSet<u32> = (1..=16).collect();
    assert!(select_window(&blocks, &all, 3).is_empty());
}

#[test]
fn test_base_weeks_expand_weekly_slots() {
    common::init_test_logging();
    let plan = generate(&window_input(weeks(&[1, 2, 3])));

    assert_eq!(plan.workouts.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(plan.workout_count(), 15);

    let blocks = weeks(&[1, 2, 3]);
    for block in &blocks {
        let list = &plan.workouts[&block.week_number];
        assert!(list.iter().all(|w| block.contains(w.date)));
        assert!(list.iter().all(|w| w.week_number == block.week_number));
        assert!(list.windows(2).all(|pair| pair[0].date < pair[1].date));

        let total: f64 = list.iter().map(|w| w.target_distance_miles).sum();
        assert!(
            (total - f64::from(block.target_mileage)).abs() <= 2.0,
            "week {} totals {total} for target {}",
            block.week_number,
            block.target_mileage
        );
    }

    let first_week = &plan.workouts[&1];
    let types: Vec<WorkoutType> = first_week.iter().map(|w| w.workout_type).collect();
    assert_eq!(
        types,
        vec![
            WorkoutType::Hills,
            WorkoutType::Easy,
            WorkoutType::Easy,
            WorkoutType::Easy,
            WorkoutType::LongRun,
        ]
    );
}

#[test]
fn test_numeric_targets_with_zones() {
    let plan = generate(&window_input(weeks(&[1])));

    for workout in plan.iter() {
        assert!(workout.target_pace_seconds.is_some());
        assert!(workout.target_duration_minutes.is_some());
        assert!(workout.effort_description.contains("/mi"));
        assert_eq!(workout.status, WorkoutStatus::Scheduled);
        assert!(!workout.rationale.is_empty());
    }

    let hills = workout_on(&plan, common::date("2025-01-07"));
    assert!(hills.is_key_workout);
    assert!(!hills.alternatives.is_empty());
    let structure = hills.structure.as_ref().unwrap();
    assert!(structure.iter().any(|s| s.target_pace_seconds.is_some()));

    let easy = workout_on(&plan, common::date("2025-01-08"));
    assert!(!easy.is_key_workout);
    assert!(easy.structure.is_none());
    assert!((easy.target_pace_seconds.unwrap() - zones().easy).abs() < 1e-9);
}

#[test]
fn test_effort_only_without_zones() {
    let input = WindowGenerationInput {
        zones: None,
        vdot: None,
        ..window_input(weeks(&[1]))
    };
    let plan = generate(&input);

    assert_eq!(plan.workout_count(), 5);
    for workout in plan.iter() {
        assert!(workout.target_pace_seconds.is_none());
        assert!(workout.target_duration_minutes.is_none());
        assert!(!workout.effort_description.contains("target"));
        assert!(workout.effort_description.contains("RPE"));
    }

    let hills = workout_on(&plan, common::date("2025-01-07"));
    let structure = hills.structure.as_ref().unwrap();
    assert!(structure.iter().all(|s| s.target_pace_seconds.is_none()));
}

#[test]
fn test_effort_preference_hides_paces() {
    let input = WindowGenerationInput {
        profile: AthleteProfile {
            training_by: TrainingBy::Effort,
            ..AthleteProfile::default()
        },
        ..window_input(weeks(&[1]))
    };
    let plan = generate(&input);

    assert!(plan.iter().all(|w| w.target_pace_seconds.is_none()));
}

#[test]
fn test_truncates_to_maximum_blocks() {
    let plan = generate(&window_input(weeks(&[1, 2, 3, 4, 5])));

    assert_eq!(plan.workouts.len(), MAX_WINDOW_BLOCKS);
    assert!(plan.iter().all(|w| w.week_number <= 3));
}

#[test]
fn test_goal_race_week() {
    let plan = generate(&window_input(weeks(&[14, 15, 16])));
    let race_day = common::half_marathon(16).date;

    let race = workout_on(&plan, race_day);
    assert_eq!(race.workout_type, WorkoutType::Race);
    assert!(race.is_key_workout);
    assert!(race.target_pace_seconds.is_some());
    assert!((race.target_distance_miles - 13.1).abs() < 0.05);

    let shake_out = workout_on(&plan, race_day.pred_opt().unwrap());
    assert_eq!(shake_out.workout_type, WorkoutType::ShakeOut);
    assert!((shake_out.target_distance_miles - 3.0).abs() < f64::EPSILON);

    assert!(plan.iter().all(|w| w.date <= race_day));
    assert_eq!(plan.workouts[&16].last().unwrap().date, race_day);
}

#[test]
fn test_quality_before_b_race_becomes_recovery() {
    let mut input = window_input(weeks(&[2]));
    input.intermediate_races.push(common::tune_up(
        "b-10k",
        common::date("2025-01-15"),
        RacePriority::B,
    ));
    let plan = generate(&input);

    let race = workout_on(&plan, common::date("2025-01-15"));
    assert_eq!(race.workout_type, WorkoutType::Race);

    let day_before = workout_on(&plan, common::date("2025-01-14"));
    assert_eq!(day_before.workout_type, WorkoutType::Recovery);
    assert!(day_before.target_distance_miles <= 4.0);
    assert!(day_before.rationale.contains("Tune-up b-10k"));

    assert!(!plan.iter().any(|w| w.workout_type.is_quality()));
}

#[test]
fn test_long_run_after_b_race_is_softened() {
    let mut input = window_input(weeks(&[2]));
    input.intermediate_races.push(common::tune_up(
        "b-sat",
        common::date("2025-01-18"),
        RacePriority::B,
    ));
    let plan = generate(&input);

    let saturday = workout_on(&plan, common::date("2025-01-18"));
    assert_eq!(saturday.workout_type, WorkoutType::Race);

    let sunday = workout_on(&plan, common::date("2025-01-19"));
    assert_eq!(sunday.date.weekday(), Weekday::Sun);
    assert_eq!(sunday.workout_type, WorkoutType::Easy);
    assert!(sunday.target_distance_miles <= 4.0);
    assert!(sunday.target_distance_miles >= 2.0);
}

#[test]
fn test_high_rpe_streak_steps_down_next_session() {
    let mut input = window_input(weeks(&[1, 2]));
    input.recent_workouts = vec![
        common::rated_session(common::date("2025-01-03"), WorkoutType::Tempo, 9),
        common::rated_session(common::date("2025-01-01"), WorkoutType::Threshold, 8),
    ];
    let plan = generate(&input);

    let rule = plan.adaptation.rule.as_ref().unwrap();
    assert_eq!(rule.name, "high_rpe");

    let adjusted = workout_on(&plan, common::date("2025-01-07"));
    assert_eq!(adjusted.workout_type, WorkoutType::Tempo);
    assert!(adjusted.rationale.contains("high_rpe"));

    let untouched = workout_on(&plan, common::date("2025-01-14"));
    assert_eq!(untouched.workout_type, WorkoutType::Hills);
}

#[test]
fn test_sustained_high_rpe_adds_recovery() {
    let mut input = window_input(weeks(&[1, 2]));
    input.recent_workouts = vec![
        common::rated_session(common::date("2025-01-04"), WorkoutType::Tempo, 9),
        common::rated_session(common::date("2025-01-02"), WorkoutType::Intervals, 9),
        common::rated_session(common::date("2024-12-30"), WorkoutType::Threshold, 8),
    ];
    let plan = generate(&input);

    assert_eq!(
        plan.adaptation.rule.as_ref().map(|r| r.name.as_str()),
        Some("sustained_high_rpe")
    );
    assert_eq!(
        workout_on(&plan, common::date("2025-01-07")).workout_type,
        WorkoutType::Steady
    );
    assert_eq!(
        workout_on(&plan, common::date("2025-01-14")).workout_type,
        WorkoutType::Steady
    );
    assert_eq!(
        workout_on(&plan, common::date("2025-01-08")).workout_type,
        WorkoutType::Recovery
    );
}

#[test]
fn test_comfortable_streak_progresses() {
    let baseline = generate(&window_input(weeks(&[1])));
    let mut input = window_input(weeks(&[1]));
    input.recent_workouts = vec![
        common::rated_session(common::date("2025-01-04"), WorkoutType::Tempo, 4),
        common::rated_session(common::date("2025-01-02"), WorkoutType::Tempo, 5),
        common::rated_session(common::date("2024-12-30"), WorkoutType::Hills, 4),
    ];
    let plan = generate(&input);

    assert_eq!(
        plan.adaptation.rule.as_ref().map(|r| r.name.as_str()),
        Some("progression")
    );
    let tuesday = common::date("2025-01-07");
    let faster = workout_on(&plan, tuesday).target_pace_seconds.unwrap();
    let usual = workout_on(&baseline, tuesday).target_pace_seconds.unwrap();
    assert!(faster < usual);
}

#[test]
fn test_stale_feedback_is_ignored() {
    let mut input = window_input(weeks(&[1]));
    input.recent_workouts = vec![
        common::rated_session(common::date("2024-11-01"), WorkoutType::Tempo, 10),
        common::rated_session(common::date("2024-10-30"), WorkoutType::Tempo, 10),
    ];
    let plan = generate(&input);

    assert!(plan.adaptation.rule.is_none());
    assert_eq!(
        workout_on(&plan, common::date("2025-01-07")).workout_type,
        WorkoutType::Hills
    );
}

#[test]
fn test_caution_replaces_intervals() {
    let usual = generate(&window_input(weeks(&[13])));
    let thursday = usual
        .iter()
        .find(|w| w.date.weekday() == Weekday::Thu)
        .unwrap();
    assert_eq!(thursday.workout_type, WorkoutType::Intervals);

    let input = WindowGenerationInput {
        profile: AthleteProfile {
            recently_injured: true,
            ..AthleteProfile::default()
        },
        ..window_input(weeks(&[13]))
    };
    let cautious = generate(&input);

    assert!(!cautious
        .iter()
        .any(|w| w.workout_type == WorkoutType::Intervals));
    let thursday = cautious
        .iter()
        .find(|w| w.date.weekday() == Weekday::Thu)
        .unwrap();
    assert_eq!(thursday.workout_type, WorkoutType::Threshold);
}

#[test]
fn test_low_long_run_comfort_shortens_long_run() {
    let usual = generate(&window_input(weeks(&[1])));
    let input = WindowGenerationInput {
        profile: AthleteProfile {
            comfort: ComfortRatings {
                long_run: Some(1),
                ..ComfortRatings::default()
            },
            ..AthleteProfile::default()
        },
        ..window_input(weeks(&[1]))
    };
    let softened = generate(&input);

    let sunday = common::date("2025-01-12");
    let usual_long = workout_on(&usual, sunday);
    let short_long = workout_on(&softened, sunday);
    assert_eq!(short_long.workout_type, WorkoutType::LongRun);
    assert!(short_long.target_distance_miles < usual_long.target_distance_miles);
    assert!(short_long.target_pace_seconds.unwrap() > usual_long.target_pace_seconds.unwrap());
}

#[test]
fn test_weekday_availability_caps_distance() {
    let input = WindowGenerationInput {
        profile: AthleteProfile {
            weekday_availability_minutes: Some(20),
            ..AthleteProfile::default()
        },
        ..window_input(weeks(&[1]))
    };
    let plan = generate(&input);

    let easy = workout_on(&plan, common::date("2025-01-08"));
    assert!(easy.target_distance_miles < 3.5);
    assert!(easy.target_distance_miles >= 2.0);
    assert!(easy.rationale.contains("available minutes"));

    let long_run = workout_on(&plan, common::date("2025-01-12"));
    assert!((long_run.target_distance_miles - 6.0).abs() < f64::EPSILON);
}
