// ABOUTME: Calling-layer service configuration loaded from environment variables
// ABOUTME: Window size, default aggressiveness and logging options for the planning service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Service configuration
//!
//! Planning constants live in [`PlanningConfig`]; this module only holds the
//! settings of the layer that stores plans and drives the generators.

use std::env;

use pacer_core::errors::AppResult;
use pacer_core::models::PlanAggressiveness;
use pacer_intelligence::window::MAX_WINDOW_BLOCKS;
use pacer_intelligence::PlanningConfig;
use tracing::{info, warn};

use crate::logging::{LogFormat, LoggingConfig};

/// Environment variable names read by [`ServiceConfig::from_env`]
pub mod env_keys {
    /// Blocks materialized per window population
    pub const WINDOW_BLOCKS: &str = "PACER_WINDOW_BLOCKS";
    /// Aggressiveness used when a request omits it
    pub const DEFAULT_AGGRESSIVENESS: &str = "PACER_DEFAULT_AGGRESSIVENESS";
    /// Log format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Log level or filter directive
    pub const LOG_LEVEL: &str = "RUST_LOG";
}

/// Settings for the planning service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Blocks generated per window, never more than [`MAX_WINDOW_BLOCKS`]
    pub window_blocks: usize,
    /// Aggressiveness used when a request omits it
    pub default_aggressiveness: PlanAggressiveness,
    /// Log output format
    pub log_format: LogFormat,
    /// Log level
    pub log_level: String,
    /// Planning constants
    pub planning: PlanningConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            window_blocks: MAX_WINDOW_BLOCKS,
            default_aggressiveness: PlanAggressiveness::default(),
            log_format: LogFormat::default(),
            log_level: "info".into(),
            planning: PlanningConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from environment variables, falling back to defaults per value
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the planning constants fail validation
    pub fn from_env() -> AppResult<Self> {
        let defaults = Self::default();

        let requested_blocks = env::var(env_keys::WINDOW_BLOCKS)
            .ok()
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(defaults.window_blocks);
        let window_blocks = requested_blocks.clamp(1, MAX_WINDOW_BLOCKS);
        if window_blocks != requested_blocks {
            warn!(
                requested = requested_blocks,
                used = window_blocks,
                "Window size outside 1..=3, clamped"
            );
        }

        let default_aggressiveness = env::var(env_keys::DEFAULT_AGGRESSIVENESS)
            .ok()
            .map_or(defaults.default_aggressiveness, |raw| {
                raw.parse::<PlanAggressiveness>().unwrap_or_else(|e| {
                    warn!(error = %e, "Ignoring invalid default aggressiveness");
                    defaults.default_aggressiveness
                })
            });

        let log_format = env::var(env_keys::LOG_FORMAT)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(defaults.log_format);
        let log_level = env::var(env_keys::LOG_LEVEL).unwrap_or(defaults.log_level);

        let planning = PlanningConfig::load()?;

        let config = Self {
            window_blocks,
            default_aggressiveness,
            log_format,
            log_level,
            planning,
        };
        info!(
            window_blocks = config.window_blocks,
            aggressiveness = config.default_aggressiveness.as_str(),
            "Service configuration loaded"
        );
        Ok(config)
    }

    /// Logging configuration derived from these settings
    #[must_use]
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
            ..LoggingConfig::from_env()
        }
    }
}
