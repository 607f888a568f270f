// ABOUTME: Integration tests for the weekday slot builder
// ABOUTME: Verifies long-run anchoring, quality placement, easy filling and rest-day requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Weekday;
use pacer_intelligence::{create_weekly_structure, SlotKind, StructurePreferences};

#[test]
fn test_default_preferences() {
    let structure = create_weekly_structure(&StructurePreferences::default());

    assert_eq!(
        structure.slots,
        [
            SlotKind::Rest,
            SlotKind::Quality,
            SlotKind::Easy,
            SlotKind::Quality,
            SlotKind::Easy,
            SlotKind::Rest,
            SlotKind::Long,
        ]
    );
    assert_eq!(structure.running_days(), 5);
}

#[test]
fn test_quality_placed_away_from_long_run() {
    let preferences = StructurePreferences {
        runs_per_week: 3,
        long_run_day: Weekday::Sat,
        quality_days: Vec::new(),
        rest_days: Vec::new(),
        quality_sessions_per_week: 1,
    };
    let structure = create_weekly_structure(&preferences);

    assert_eq!(structure.slot(Weekday::Sat), SlotKind::Long);
    assert_eq!(structure.days_of(SlotKind::Quality), vec![Weekday::Mon]);
    // Easy day avoids neighbours of hard days when possible
    assert_eq!(structure.days_of(SlotKind::Easy), vec![Weekday::Wed]);
    assert_eq!(structure.running_days(), 3);
}

#[test]
fn test_quality_request_on_long_run_day_is_skipped() {
    let preferences = StructurePreferences {
        runs_per_week: 4,
        long_run_day: Weekday::Sun,
        quality_days: vec![Weekday::Sun, Weekday::Wed],
        rest_days: Vec::new(),
        quality_sessions_per_week: 1,
    };
    let structure = create_weekly_structure(&preferences);

    assert_eq!(structure.slot(Weekday::Sun), SlotKind::Long);
    assert_eq!(structure.days_of(SlotKind::Quality), vec![Weekday::Wed]);
    assert_eq!(structure.running_days(), 4);
}

#[test]
fn test_rest_day_requests_are_kept() {
    let preferences = StructurePreferences {
        runs_per_week: 6,
        long_run_day: Weekday::Sun,
        quality_days: vec![Weekday::Tue, Weekday::Thu],
        rest_days: vec![Weekday::Fri],
        quality_sessions_per_week: 2,
    };
    let structure = create_weekly_structure(&preferences);

    assert_eq!(structure.slot(Weekday::Fri), SlotKind::Rest);
    assert_eq!(structure.running_days(), 6);
    assert_eq!(
        structure.days_of(SlotKind::Easy),
        vec![Weekday::Mon, Weekday::Wed, Weekday::Sat]
    );
}

#[test]
fn test_every_day_running() {
    let preferences = StructurePreferences {
        runs_per_week: 7,
        rest_days: Vec::new(),
        ..StructurePreferences::default()
    };
    let structure = create_weekly_structure(&preferences);

    assert_eq!(structure.running_days(), 7);
    assert!(structure.days_of(SlotKind::Rest).is_empty());
    assert_eq!(structure.days_of(SlotKind::Quality).len(), 2);
}

#[test]
fn test_single_run_is_the_long_run() {
    for runs_per_week in [0, 1] {
        let preferences = StructurePreferences {
            runs_per_week,
            ..StructurePreferences::default()
        };
        let structure = create_weekly_structure(&preferences);

        assert_eq!(structure.running_days(), 1);
        assert_eq!(structure.days_of(SlotKind::Long), vec![Weekday::Sun]);
        assert!(structure.days_of(SlotKind::Quality).is_empty());
    }
}

#[test]
fn test_slot_kind_predicates() {
    assert!(SlotKind::Long.is_hard());
    assert!(SlotKind::Quality.is_hard());
    assert!(!SlotKind::Easy.is_hard());
    assert!(SlotKind::Easy.is_running());
    assert!(!SlotKind::Rest.is_running());
}
