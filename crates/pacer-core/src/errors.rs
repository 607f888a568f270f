// ABOUTME: Unified error handling with standard error codes for the planning engine
// ABOUTME: Defines ErrorCode, AppError and AppResult shared by every workspace crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace eventually surfaces an [`AppError`].
//! Domain crates keep their own narrow error enums (`PlanError`, `ConfigError`)
//! and convert into `AppError` at the boundary so the calling layer can map a
//! stable [`ErrorCode`] onto whatever transport it exposes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 3003,

    // Planning (3100-3199)
    #[serde(rename = "MISSING_RACE")]
    MissingRace = 3100,
    #[serde(rename = "INSUFFICIENT_TIME")]
    InsufficientTime = 3101,
    #[serde(rename = "MISSING_SETTINGS")]
    MissingSettings = 3102,

    // Resource Management (4000-4999)
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    #[serde(rename = "RESOURCE_LOCKED")]
    ResourceLocked = 4002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// HTTP status code a transport layer should use for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidInput
            | Self::ValueOutOfRange
            | Self::MissingRace
            | Self::MissingSettings => 400,
            Self::InsufficientTime => 422,
            Self::ResourceNotFound => 404,
            Self::ResourceLocked => 409,
            Self::ConfigError
            | Self::ConfigInvalid
            | Self::InternalError
            | Self::SerializationError => 500,
        }
    }

    /// Generic user-facing description of the error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::ValueOutOfRange => "A value is outside the accepted range",
            Self::MissingRace => "A goal race is required to build a training plan",
            Self::InsufficientTime => "There is not enough time before the race to build a plan",
            Self::MissingSettings => "Training settings are required when no recent history exists",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceLocked => "The resource is being modified by another request",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable, actionable error message
    pub message: String,
    /// Additional structured context
    pub details: Value,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
        }
    }

    /// Attach structured details to the error
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }


    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON error: {error}"),
        )
    }
}

/// Result type alias used across the workspace
pub type AppResult<T> = Result<T, AppError>;
