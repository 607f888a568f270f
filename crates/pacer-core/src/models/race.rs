// ABOUTME: Goal and intermediate race records
// ABOUTME: Priority decides how much the surrounding days are protected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::meters_to_miles;

/// Race priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacePriority {
    /// Goal race the plan is built around
    A,
    /// Important tune-up race, protected by easier adjacent days
    B,
    /// Training race, run as a hard workout
    C,
}

impl RacePriority {
    /// Days on each side of the race whose quality sessions are softened
    #[must_use]
    pub const fn protection_days(self) -> i64 {
        match self {
            Self::A | Self::B => 2,
            Self::C => 1,
        }
    }
}

/// A race on the athlete's calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    /// Identifier assigned by the calling layer
    pub id: String,
    /// Display name
    pub name: String,
    /// Race day
    pub date: NaiveDate,
    /// Race distance in meters
    pub distance_meters: f64,
    /// Priority
    pub priority: RacePriority,
    /// Optional goal finish time in seconds
    #[serde(default)]
    pub goal_time_seconds: Option<f64>,
}

impl Race {
    /// Race distance in miles
    #[must_use]
    pub fn distance_miles(&self) -> f64 {
        meters_to_miles(self.distance_meters)
    }
}
