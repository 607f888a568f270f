// ABOUTME: Input-validation errors raised by the planning engine
// ABOUTME: Each variant carries an actionable user message and maps onto a stable ErrorCode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning errors.
//!
//! Only genuine input problems are raised. Numeric dead ends such as an
//! implausible VDOT or a zero-length split are absorbed by returning `None`.

use pacer_core::errors::{AppError, ErrorCode};
use serde_json::{json, Value};
use thiserror::Error;

/// Distinct input-validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No goal race was supplied
    #[error("a goal race is required")]
    MissingRace,

    /// The race is too close to build a periodized plan
    #[error("only {weeks} weeks until race day, at least {minimum} required")]
    InsufficientTime {
        /// Whole weeks between plan start and race day
        weeks: u32,
        /// Minimum supported plan length
        minimum: u32,
    },

    /// History was empty and the athlete never declared the setting
    #[error("missing training setting: {field}")]
    MissingSettings {
        /// Name of the missing setting
        field: &'static str,
    },

    /// Structurally invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl PlanError {
    /// Message suitable for showing to the athlete
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingRace => {
                "Add a goal race with a date and distance before generating a plan.".to_owned()
            }
            Self::InsufficientTime { weeks, minimum } => format!(
                "Your race is {weeks} weeks away. Plans need at least {minimum} weeks; \
                 pick a later race or train with individual workouts instead."
            ),
            Self::MissingSettings { field } => format!(
                "We could not find recent runs. Set your {} in training settings so the plan \
                 starts from the right volume.",
                field.replace('_', " ")
            ),
            Self::InvalidInput(reason) => format!("Please check your plan settings: {reason}."),
        }
    }

    /// Stable error code for the calling layer
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingRace => ErrorCode::MissingRace,
            Self::InsufficientTime { .. } => ErrorCode::InsufficientTime,
            Self::MissingSettings { .. } => ErrorCode::MissingSettings,
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
        }
    }
}

impl From<PlanError> for AppError {
    fn from(error: PlanError) -> Self {
        let details = match &error {
            PlanError::InsufficientTime { weeks, minimum } => {
                json!({ "weeks": weeks, "minimum_weeks": minimum })
            }
            PlanError::MissingSettings { field } => json!({ "field": field }),
            PlanError::MissingRace | PlanError::InvalidInput(_) => Value::Null,
        };
        Self::new(error.code(), error.user_message()).with_details(details)
    }
}
