// ABOUTME: Split-level pace record consumed by the effort classifier
// ABOUTME: Carries an optional category so classified lists can be fed back in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::EffortCategory;

/// One split of a logged (or hypothetical) run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    /// Split distance in miles
    pub distance_miles: f64,
    /// Moving time in seconds
    pub moving_time_seconds: f64,
    /// Category from a previous classification; ignored as input
    #[serde(default)]
    pub category: Option<EffortCategory>,
}

impl Split {
    /// Create an unclassified split
    #[must_use]
    pub const fn new(distance_miles: f64, moving_time_seconds: f64) -> Self {
        Self {
            distance_miles,
            moving_time_seconds,
            category: None,
        }
    }

    /// Split from a pace and a distance
    #[must_use]
    pub fn from_pace(distance_miles: f64, pace_seconds_per_mile: f64) -> Self {
        Self::new(distance_miles, distance_miles * pace_seconds_per_mile)
    }

    /// Pace in seconds per mile; `None` for zero-distance or zero-time splits
    #[must_use]
    pub fn pace_seconds_per_mile(&self) -> Option<f64> {
        (self.distance_miles > 0.0 && self.moving_time_seconds > 0.0)
            .then(|| self.moving_time_seconds / self.distance_miles)
    }
}
