// ABOUTME: Adaptive training-plan engine: pace model, periodization, window generation, effort scoring
// ABOUTME: Every component is a pure synchronous computation over in-memory inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer Intelligence
//!
//! The planning core. Data flows leaves-first:
//!
//! - [`pace_model`]: VDOT to and from race times, per-mile training zones
//! - [`fitness`]: current fitness from recent history, with declared-settings fallback
//! - [`weekly_structure`]: weekday slot assignment from preferences
//! - [`macro_plan`]: multi-week periodized skeleton of [`Block`](pacer_core::models::Block)s
//! - [`window`]: rolling expansion of the next unpopulated blocks into workouts,
//!   adapted by [`adaptation`] from recent RPE feedback
//! - [`effort`]: split-level effort attribution against condition-adjusted zones
//!
//! Nothing here performs I/O, reads the clock, or keeps state between calls.
//! Fetching history and persisting plans belongs to the calling layer.

/// RPE-streak adaptation rule table
pub mod adaptation;

/// Heat and elevation pace adjustments
pub mod conditions;

/// Tunable planning constants loaded from defaults or environment
pub mod config;

/// Split effort classification and plan-vs-actual analysis
pub mod effort;

/// Input-validation error taxonomy
pub mod errors;

/// Current-fitness assessment from workout history
pub mod fitness;

/// Periodized macro plan generation
pub mod macro_plan;

/// VDOT regression, pace zones and race prediction
pub mod pace_model;

/// Empirical constants backing the default configuration
pub mod physiological_constants;

/// Workout templates per phase and slot
pub mod templates;

/// Weekday slot assignment
pub mod weekly_structure;

/// Rolling-window workout generation
pub mod window;

pub use adaptation::{
    AdaptationAdjustment, AdaptationDecision, AdaptationRule, AdaptationSignal, RuleTrigger,
};
pub use conditions::{condition_adjustment_seconds, Conditions};
pub use config::PlanningConfig;
pub use effort::{
    assess_execution, classify_split_efforts_with_zones, summarize_efforts,
    ClassificationContext, EffortClassifier, EffortSummary, ExecutionAssessment,
    SplitClassification, ZoneBoundaries,
};
pub use errors::PlanError;
pub use fitness::{
    DeclaredSettings, FitnessAssessment, FitnessConfidence, FitnessData, VdotEstimate,
};
pub use macro_plan::{MacroPlanGenerator, PhaseLayout, PlanGenerationInput};
pub use pace_model::{format_duration, format_pace, PaceModel, PaceZones};
pub use weekly_structure::{
    create_weekly_structure, SlotKind, StructurePreferences, WeeklyStructure,
};
pub use window::{
    select_window, WindowGenerationInput, WindowGenerator, WindowPlan, MAX_WINDOW_BLOCKS,
};
