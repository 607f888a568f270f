// ABOUTME: Integration tests for RPE feedback reduction and the ordered adaptation rule table
// ABOUTME: RPE source priority, easy-day fatigue, first-match rule selection and window limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use pacer_core::models::{CompletedWorkoutSummary, RpeSource, WorkoutType};
use pacer_intelligence::adaptation::evaluate;
use pacer_intelligence::config::AdaptationConfig;
use pacer_intelligence::{AdaptationAdjustment, AdaptationSignal};

fn as_of() -> NaiveDate {
    common::plan_start()
}

fn easy_run(days_ago: u64, rpe: u8) -> CompletedWorkoutSummary {
    CompletedWorkoutSummary {
        distance_miles: 4.0,
        duration_seconds: 2_160.0,
        pace_seconds_per_mile: Some(540.0),
        ..common::rated_session(
            common::days_before(as_of(), days_ago),
            WorkoutType::Easy,
            rpe,
        )
    }
}

fn quality(days_ago: u64, rpe: u8) -> CompletedWorkoutSummary {
    common::rated_session(
        common::days_before(as_of(), days_ago),
        WorkoutType::Tempo,
        rpe,
    )
}

fn rule_name(recent: &[CompletedWorkoutSummary], config: &AdaptationConfig) -> Option<String> {
    evaluate(recent, as_of(), config).rule.map(|rule| rule.name)
}

#[test]
fn test_rpe_source_priority() {
    let mut session = CompletedWorkoutSummary {
        reflection_rpe: Some(6),
        assessment_rpe: Some(8),
        provider_perceived_exertion: Some(9.5),
        ..quality(1, 6)
    };
    assert_eq!(session.effective_rpe(), Some((6.0, RpeSource::Reflection)));

    session.reflection_rpe = None;
    assert_eq!(session.effective_rpe(), Some((8.0, RpeSource::Assessment)));

    session.assessment_rpe = None;
    assert_eq!(session.effective_rpe(), Some((9.5, RpeSource::Provider)));

    session.provider_perceived_exertion = Some(14.0);
    assert_eq!(session.effective_rpe(), None);
}

#[test]
fn test_decision_records_rpe_sources() {
    let from_assessment = CompletedWorkoutSummary {
        reflection_rpe: None,
        assessment_rpe: Some(7),
        ..quality(3, 7)
    };
    let from_provider = CompletedWorkoutSummary {
        reflection_rpe: None,
        provider_perceived_exertion: Some(6.0),
        ..quality(6, 6)
    };
    let recent = vec![from_provider, quality(1, 6), from_assessment];

    let decision = evaluate(&recent, as_of(), &AdaptationConfig::default());

    assert_eq!(
        decision.rpe_sources,
        vec![
            RpeSource::Reflection,
            RpeSource::Assessment,
            RpeSource::Provider,
        ]
    );
}

#[test]
fn test_easy_run_fatigue_rule() {
    common::init_test_logging();
    let recent = vec![easy_run(1, 7), easy_run(2, 6), easy_run(4, 7)];

    let decision = evaluate(&recent, as_of(), &AdaptationConfig::default());

    assert!(matches!(
        decision.signal,
        AdaptationSignal::EasyRunFatigue { average_rpe } if (average_rpe - 20.0 / 3.0).abs() < 1e-9
    ));
    assert_eq!(
        decision.rule.as_ref().map(|rule| rule.name.as_str()),
        Some("easy_run_fatigue")
    );
    let adjustment = decision.adjustment();
    assert_eq!(adjustment.extra_recovery_days, 1);
    assert_eq!(adjustment.intensity_steps_down, 0);
}

#[test]
fn test_easy_fatigue_needs_enough_rated_runs() {
    let recent = vec![easy_run(1, 8), easy_run(2, 8)];

    let decision = evaluate(&recent, as_of(), &AdaptationConfig::default());

    assert_eq!(decision.signal, AdaptationSignal::Neutral);
    assert!(decision.rule.is_none());
    assert_eq!(decision.adjustment(), AdaptationAdjustment::default());
}

#[test]
fn test_high_rpe_streak_beats_easy_fatigue() {
    let config = AdaptationConfig::default();
    let mut recent = vec![easy_run(1, 7), easy_run(3, 7), easy_run(5, 7)];
    recent.extend([quality(2, 9), quality(4, 8), quality(6, 9)]);

    assert_eq!(
        rule_name(&recent, &config).as_deref(),
        Some("sustained_high_rpe")
    );

    // Only the two most recent sessions were hard
    recent.pop();
    recent.push(quality(6, 6));
    assert_eq!(rule_name(&recent, &config).as_deref(), Some("high_rpe"));
}

#[test]
fn test_first_matching_rule_in_table_order_wins() {
    let mut config = AdaptationConfig::default();
    config.rules.swap(0, 1);
    let recent = vec![quality(2, 9), quality(4, 9), quality(6, 9)];

    assert_eq!(rule_name(&recent, &config).as_deref(), Some("high_rpe"));
    assert_eq!(
        rule_name(&recent, &AdaptationConfig::default()).as_deref(),
        Some("sustained_high_rpe")
    );
}

#[test]
fn test_feedback_outside_window_ignored() {
    let recent = vec![easy_run(25, 9), easy_run(26, 9), easy_run(30, 9)];

    let decision = evaluate(&recent, as_of(), &AdaptationConfig::default());

    assert_eq!(decision.signal, AdaptationSignal::Neutral);
    assert!(decision.rpe_sources.is_empty());
}
