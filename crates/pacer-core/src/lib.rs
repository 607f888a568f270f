// ABOUTME: Core types and constants for the Pacer adaptive training-plan engine
// ABOUTME: Foundation crate with error handling, unit constants, and plan/workout models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer Core
//!
//! Foundation crate providing shared types for the Pacer training-plan engine.
//! It holds no algorithms: the planning engine in `pacer-intelligence` reads
//! these records and produces them, and the calling layer persists them as-is.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Unit conversions and standard race distances
//! - **models**: Athlete profile, races, blocks, planned/completed workouts, splits

/// Unified error handling system with standard error codes
pub mod errors;

/// Unit conversions and standard race distances
pub mod constants;

/// Plan, workout, athlete and split data models
pub mod models;
