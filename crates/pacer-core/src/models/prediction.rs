// ABOUTME: Race-time prediction record with a heuristic confidence band
// ABOUTME: Produced by the pace model and attached to macro plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// How much the VDOT source can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionConfidence {
    /// Recent race result
    High,
    /// Older race or recent hard training effort
    Medium,
    /// Stale or estimated source
    Low,
}

/// Inclusive time range in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Fastest plausible time
    pub min: f64,
    /// Slowest plausible time
    pub max: f64,
}

/// Predicted finish time for one distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacePrediction {
    /// Race distance in meters
    pub distance_meters: f64,
    /// Point estimate in seconds
    pub seconds: f64,
    /// Heuristic band around the estimate
    pub range: TimeRange,
    /// Confidence used to size the band
    pub confidence: PredictionConfidence,
}
