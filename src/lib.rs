// ABOUTME: Main library entry point for the Pacer training-plan service
// ABOUTME: Calling layer around the planning core: configuration, logging, storage and services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pacer
//!
//! Adaptive running training plans. The algorithms live in
//! `pacer-intelligence` and are pure; this crate feeds them and keeps
//! their output.
//!
//! ## Architecture
//!
//! - **Config**: service settings and planning constants from the environment
//! - **Logging**: `tracing-subscriber` setup (json, pretty, compact)
//! - **Store**: `PlanStore` persistence contract and an in-memory implementation
//! - **Services**: plan regeneration under a per-race lock, rolling window population
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use pacer::config::ServiceConfig;
//! use pacer::services::PlanService;
//! use pacer::store::InMemoryPlanStore;
//! use pacer_core::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServiceConfig::from_env()?;
//!     let service = PlanService::new(Arc::new(InMemoryPlanStore::new()), config);
//!     println!("Stored plans: {}", service.store().plan_count());
//!     Ok(())
//! }
//! ```

/// Service configuration from environment variables
pub mod config;

/// Structured logging setup
pub mod logging;

/// Planning services coordinating generators and storage
pub mod services;

/// Plan persistence contract and in-memory store
pub mod store;

pub use config::ServiceConfig;
pub use services::{PlanRequest, PlanService, WindowRequest};
pub use store::{InMemoryPlanStore, PlanStore};
