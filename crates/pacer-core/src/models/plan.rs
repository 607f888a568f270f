// ABOUTME: Macro plan skeleton types: phases, weekly blocks and the plan summary
// ABOUTME: Blocks are produced once per race and replaced wholesale on regeneration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RacePrediction;

/// Periodization phase of a training week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Aerobic foundation
    Base,
    /// Increasing specific intensity
    Build,
    /// Highest load, race-specific sharpening
    Peak,
    /// Volume reduction before the goal race
    Taper,
    /// Absorbing a race or a fatigue spike
    Recovery,
}

impl Phase {
    /// Stable lowercase name, as persisted
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Build => "build",
            Self::Peak => "peak",
            Self::Taper => "taper",
            Self::Recovery => "recovery",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How hard the plan pushes volume and how long it stays in base
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanAggressiveness {
    /// Longer base, gentler taper, lower peak ceiling
    Conservative,
    /// Balanced defaults
    #[default]
    Moderate,
    /// Short base, full peak ceiling
    Aggressive,
}

impl PlanAggressiveness {
    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl FromStr for PlanAggressiveness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(format!(
                "Unknown plan aggressiveness: '{other}'. Valid options: conservative, moderate, aggressive"
            )),
        }
    }
}

/// One training week of the macro plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// 1-based, contiguous within a plan
    pub week_number: u32,
    /// Periodization phase
    pub phase: Phase,
    /// 1-based week index inside the phase
    pub phase_week: u32,
    /// First day of the block
    pub start_date: NaiveDate,
    /// Last day of the block (inclusive)
    pub end_date: NaiveDate,
    /// Target weekly mileage
    pub target_mileage: u32,
    /// Target long-run distance in miles
    pub long_run_target: u32,
    /// Number of quality sessions planned for the week
    pub quality_sessions_target: u8,
    /// Deliberately reduced week
    pub is_down_week: bool,
    /// Human-readable focus of the week
    pub focus: String,
}

impl Block {
    /// Whether `date` falls within this block
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Every date of the block in order
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|date| *date <= self.end_date)
            .collect()
    }

    /// Number of days covered by the block
    #[must_use]
    pub fn day_count(&self) -> u64 {
        let span = (self.end_date - self.start_date).num_days() + 1;
        u64::try_from(span.max(0)).unwrap_or(0)
    }
}

/// Aggregate figures for a macro plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Number of blocks
    pub total_weeks: u32,
    /// Highest weekly mileage
    pub peak_mileage: u32,
    /// Week number holding the peak mileage (first occurrence)
    pub peak_week: u32,
    /// Sum of all weekly targets
    pub total_miles: u32,
    /// Number of taper weeks including race week
    pub taper_weeks: u32,
    /// Number of down (and recovery) weeks
    pub down_weeks: u32,
}

/// Periodized skeleton for one goal race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroPlan {
    /// Identifier of the goal race this plan belongs to
    pub race_id: String,
    /// Ordered weekly blocks
    pub blocks: Vec<Block>,
    /// Running days per week the plan was sized for
    pub runs_per_week: u8,
    /// Aggregate figures
    pub summary: PlanSummary,
    /// Finish-time prediction when a VDOT was available
    pub race_prediction: Option<RacePrediction>,
}

impl MacroPlan {
    /// Block for a given week number
    #[must_use]
    pub fn block(&self, week_number: u32) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.week_number == week_number)
    }

    /// Block containing a date
    #[must_use]
    pub fn block_for_date(&self, date: NaiveDate) -> Option<&Block> {
        self.blocks.iter().find(|block| block.contains(date))
    }
}
