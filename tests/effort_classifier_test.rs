// ABOUTME: Integration tests for split effort classification and plan-versus-actual assessment
// ABOUTME: Zone sources, harder-zone tie breaking, heat and elevation shifts, structure previews
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::slice;

use pacer_core::models::{
    AthleteProfile, EffortCategory, IntervalSegment, SegmentKind, Split, WorkoutType,
};
use pacer_intelligence::conditions::{elevation_slowdown_percent, heat_slowdown_percent};
use pacer_intelligence::templates::{build_structure, TemplateContext};
use pacer_intelligence::{
    assess_execution, classify_split_efforts_with_zones, condition_adjustment_seconds,
    summarize_efforts, ClassificationContext, Conditions, EffortClassifier, ExecutionAssessment,
    PaceZones,
};

fn fixed_zones() -> PaceZones {
    PaceZones {
        recovery: 600.0,
        easy: 540.0,
        steady: 500.0,
        marathon: 470.0,
        tempo: 450.0,
        threshold: 430.0,
        interval: 400.0,
    }
}

fn with_zones() -> ClassificationContext {
    ClassificationContext {
        zones: Some(fixed_zones()),
        ..ClassificationContext::default()
    }
}

fn categories(splits: &[Split]) -> Vec<Option<EffortCategory>> {
    splits.iter().map(|split| split.category).collect()
}

#[test]
fn test_splits_match_nearest_zone() {
    common::init_test_logging();
    let splits = vec![
        Split::from_pace(1.0, 545.0),
        Split::from_pace(1.0, 505.0),
        Split::from_pace(1.0, 402.0),
        Split::from_pace(1.0, 650.0),
    ];

    let result = classify_split_efforts_with_zones(&splits, &with_zones());

    assert_eq!(
        categories(&result.splits),
        vec![
            Some(EffortCategory::Easy),
            Some(EffortCategory::Steady),
            Some(EffortCategory::Interval),
            Some(EffortCategory::Recovery),
        ]
    );
    let boundaries = result.boundaries.unwrap();
    assert!(!boundaries.inferred);
    assert!(boundaries.condition_adjustment_seconds.abs() < f64::EPSILON);
}

#[test]
fn test_near_ties_resolve_to_harder_zone() {
    let splits = vec![
        // Exactly between tempo and threshold
        Split::from_pace(1.0, 440.0),
        // Closer to tempo, but within the tie tolerance
        Split::from_pace(1.0, 441.5),
        // Clearly tempo
        Split::from_pace(1.0, 444.0),
    ];

    let result = classify_split_efforts_with_zones(&splits, &with_zones());

    assert_eq!(
        categories(&result.splits),
        vec![
            Some(EffortCategory::Threshold),
            Some(EffortCategory::Threshold),
            Some(EffortCategory::Tempo),
        ]
    );
}

#[test]
fn test_heat_shifts_zones_slower() {
    let hot = ClassificationContext {
        zones: Some(fixed_zones()),
        vdot: None,
        conditions: Conditions {
            temperature_f: Some(80.0),
            dew_point_f: Some(70.0),
            elevation_feet: None,
            heat_sensitivity: None,
        },
    };
    // 4.5% of threshold pace
    let expected_shift = 430.0 * 0.045;
    let split = Split::from_pace(1.0, 450.0 + expected_shift);

    let cool = classify_split_efforts_with_zones(slice::from_ref(&split), &with_zones());
    let warm = classify_split_efforts_with_zones(slice::from_ref(&split), &hot);

    assert_eq!(cool.splits[0].category, Some(EffortCategory::Marathon));
    assert_eq!(warm.splits[0].category, Some(EffortCategory::Tempo));
    let boundaries = warm.boundaries.unwrap();
    assert!((boundaries.condition_adjustment_seconds - expected_shift).abs() < 1e-9);
    assert!((boundaries.zones.easy - (540.0 + expected_shift)).abs() < 1e-9);
}

#[test]
fn test_profile_heat_sensitivity_fills_conditions() {
    let profile = AthleteProfile {
        heat_sensitivity: Some(5),
        ..AthleteProfile::default()
    };
    let warm = Conditions {
        temperature_f: Some(80.0),
        dew_point_f: Some(70.0),
        ..Conditions::default()
    };

    let filled = warm.clone().for_athlete(&profile);
    assert_eq!(filled.heat_sensitivity, Some(5));
    assert!(
        condition_adjustment_seconds(400.0, &filled)
            > condition_adjustment_seconds(400.0, &warm)
    );

    let explicit = Conditions {
        heat_sensitivity: Some(1),
        ..warm
    };
    assert_eq!(explicit.for_athlete(&profile).heat_sensitivity, Some(1));
}

#[test]
fn test_condition_tables() {
    assert!(heat_slowdown_percent(60.0, 40.0).abs() < f64::EPSILON);
    assert!((heat_slowdown_percent(80.0, 70.0) - 4.5).abs() < f64::EPSILON);
    assert!((heat_slowdown_percent(100.0, 90.0) - 12.0).abs() < f64::EPSILON);

    assert!(elevation_slowdown_percent(1_000.0).abs() < f64::EPSILON);
    assert!((elevation_slowdown_percent(5_000.0) - 1.0).abs() < 1e-9);

    let sensitive = Conditions {
        temperature_f: Some(80.0),
        dew_point_f: Some(70.0),
        elevation_feet: Some(5_000.0),
        heat_sensitivity: Some(5),
    };
    // (4.5 * 1.25 + 1.0)% of 400
    let expected = 400.0 * (4.5 * 1.25 + 1.0) / 100.0;
    assert!((condition_adjustment_seconds(400.0, &sensitive) - expected).abs() < 1e-9);
    assert!(condition_adjustment_seconds(400.0, &Conditions::default()).abs() < f64::EPSILON);
}

#[test]
fn test_zones_from_vdot() {
    let context = ClassificationContext {
        vdot: Some(50.0),
        ..ClassificationContext::default()
    };
    let classifier = EffortClassifier::default();

    let boundaries = classifier.resolve_boundaries(&[], &context).unwrap();
    assert!(!boundaries.inferred);
    assert!(boundaries.zones.is_ordered());

    let split = Split::from_pace(2.0, boundaries.zones.threshold);
    let result = classifier.classify(&[split], &context);
    assert_eq!(result.splits[0].category, Some(EffortCategory::Threshold));
}

#[test]
fn test_zones_inferred_from_run() {
    let splits = vec![
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 420.0),
    ];

    let result = classify_split_efforts_with_zones(&splits, &ClassificationContext::default());

    let boundaries = result.boundaries.unwrap();
    assert!(boundaries.inferred);
    assert!((boundaries.zones.easy - 540.0).abs() < f64::EPSILON);
    assert_eq!(result.splits[0].category, Some(EffortCategory::Easy));
    assert_eq!(result.splits[3].category, Some(EffortCategory::Interval));
}

#[test]
fn test_unusable_splits_stay_unclassified() {
    let splits = vec![Split::new(0.0, 300.0), Split::new(1.0, 0.0)];

    let result = classify_split_efforts_with_zones(&splits, &ClassificationContext::default());

    assert!(result.boundaries.is_none());
    assert_eq!(categories(&result.splits), vec![None, None]);

    let with_zones = classify_split_efforts_with_zones(&splits, &with_zones());
    assert!(with_zones.boundaries.is_some());
    assert_eq!(categories(&with_zones.splits), vec![None, None]);
}

#[test]
fn test_reclassification_is_stable() {
    let splits = vec![Split::from_pace(1.0, 545.0), Split::from_pace(0.5, 432.0)];

    let once = classify_split_efforts_with_zones(&splits, &with_zones());
    let twice = classify_split_efforts_with_zones(&once.splits, &with_zones());

    assert_eq!(once, twice);
}

#[test]
fn test_summary_and_execution() {
    let splits = vec![
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 540.0),
        Split::from_pace(1.0, 400.0),
    ];
    let classified = classify_split_efforts_with_zones(&splits, &with_zones());
    let summary = summarize_efforts(&classified.splits);

    assert_eq!(summary.dominant, Some(EffortCategory::Easy));
    assert!((summary.total_distance_miles - 4.0).abs() < f64::EPSILON);
    assert!((summary.hard_fraction - 0.25).abs() < f64::EPSILON);

    assert_eq!(
        assess_execution(WorkoutType::Easy, &summary),
        Some(ExecutionAssessment::OnTarget)
    );
    assert_eq!(
        assess_execution(WorkoutType::Intervals, &summary),
        Some(ExecutionAssessment::OnTarget)
    );
}

#[test]
fn test_execution_off_target() {
    let tempo_run = classify_split_efforts_with_zones(
        &[Split::from_pace(3.0, 450.0)],
        &with_zones(),
    );
    let easy_run = classify_split_efforts_with_zones(
        &[Split::from_pace(3.0, 540.0)],
        &with_zones(),
    );
    let tempo_summary = summarize_efforts(&tempo_run.splits);
    let easy_summary = summarize_efforts(&easy_run.splits);

    assert_eq!(
        assess_execution(WorkoutType::Easy, &tempo_summary),
        Some(ExecutionAssessment::HarderThanPlanned)
    );
    assert_eq!(
        assess_execution(WorkoutType::Tempo, &easy_summary),
        Some(ExecutionAssessment::EasierThanPlanned)
    );
    assert_eq!(
        assess_execution(WorkoutType::Easy, &summarize_efforts(&[])),
        None
    );
}

#[test]
fn test_preview_planned_structure() {
    let zones = fixed_zones();
    let segments = vec![
        IntervalSegment {
            kind: SegmentKind::Work,
            repeats: 4,
            distance_miles: Some(1.0),
            duration_seconds: None,
            effort: EffortCategory::Threshold,
            target_pace_seconds: None,
        },
        IntervalSegment {
            kind: SegmentKind::Recovery,
            repeats: 3,
            distance_miles: None,
            duration_seconds: Some(120),
            effort: EffortCategory::Recovery,
            target_pace_seconds: None,
        },
    ];

    let preview = EffortClassifier::default().preview_structure(&segments, &zones);

    assert_eq!(preview.splits.len(), 7);
    let threshold = preview
        .splits
        .iter()
        .filter(|s| s.category == Some(EffortCategory::Threshold))
        .count();
    assert_eq!(threshold, 4);
}

#[test]
fn test_generated_structure_previews_as_intended() {
    let zones = fixed_zones();
    let ctx = TemplateContext {
        zones: Some(&zones),
        race_pace_seconds: None,
        race_distance_meters: 21_097.5,
        pace_offset_seconds: 0.0,
        rep_delta: 0,
    };
    let structure = build_structure(WorkoutType::Threshold, 7.0, &ctx).unwrap();

    let preview = EffortClassifier::default().preview_structure(&structure, &zones);
    let summary = summarize_efforts(&preview.splits);

    assert_eq!(
        assess_execution(WorkoutType::Threshold, &summary),
        Some(ExecutionAssessment::OnTarget)
    );
    assert!(build_structure(WorkoutType::Easy, 5.0, &ctx).is_none());
}
