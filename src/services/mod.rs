// ABOUTME: Service layer coordinating the planning core with plan storage
// ABOUTME: Owns fitness fallback, per-race regeneration locking and window population
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service layer
//!
//! The planning core is pure; services here fetch its inputs from the
//! caller, apply the declared-settings fallback, and persist the results.

/// Plan regeneration and rolling window population
pub mod plan_service;

pub use plan_service::{PlanRequest, PlanService, WindowRequest};
