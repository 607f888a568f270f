// ABOUTME: Core data models for the training-plan engine
// ABOUTME: Re-exports athlete, race, plan, workout, effort and split structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain records exchanged between the calling layer and the planning engine.
//! Field shapes are exactly what the persistence collaborator stores: phase
//! names are lowercase strings, dates serialize as `YYYY-MM-DD`, mileages are
//! integers and interval structures are JSON-encodable.
//!
//! ## Core Models
//!
//! - `AthleteProfile`: read-only preference and history snapshot
//! - `Race`: goal or intermediate race
//! - `Block` / `MacroPlan`: periodized weekly skeleton
//! - `PlannedWorkout`: concrete day-level prescription
//! - `CompletedWorkoutSummary` / `WorkoutRecord`: what actually happened
//! - `Split` / `EffortCategory`: split-level effort attribution

mod athlete;
mod effort;
mod plan;
mod prediction;
mod race;
mod split;
mod workout;

pub use athlete::{AthleteProfile, ComfortRatings, TrainingBy};
pub use effort::EffortCategory;
pub use plan::{Block, MacroPlan, Phase, PlanAggressiveness, PlanSummary};
pub use prediction::{PredictionConfidence, RacePrediction, TimeRange};
pub use race::{Race, RacePriority};
pub use split::Split;
pub use workout::{
    CompletedWorkoutSummary, IntervalSegment, PlannedWorkout, RpeSource, SegmentKind,
    WorkoutAlternative, WorkoutRecord, WorkoutStatus, WorkoutType,
};
