// ABOUTME: Named effort categories shared by prescriptions and split classification
// ABOUTME: Ordered from easiest (recovery) to hardest (interval)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pace band, declared in ascending order of effort
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortCategory {
    /// Very easy running between hard days
    Recovery,
    /// Conversational aerobic running
    Easy,
    /// Moderate, upper aerobic running
    Steady,
    /// Marathon race effort
    Marathon,
    /// Comfortably hard
    Tempo,
    /// Lactate threshold
    Threshold,
    /// VO2max intervals
    Interval,
}

impl EffortCategory {
    /// All categories, easiest first
    pub const ALL: [Self; 7] = [
        Self::Recovery,
        Self::Easy,
        Self::Steady,
        Self::Marathon,
        Self::Tempo,
        Self::Threshold,
        Self::Interval,
    ];

    /// Stable lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Easy => "easy",
            Self::Steady => "steady",
            Self::Marathon => "marathon",
            Self::Tempo => "tempo",
            Self::Threshold => "threshold",
            Self::Interval => "interval",
        }
    }

    /// Perceived-effort phrasing used when no numeric pace is available
    #[must_use]
    pub const fn effort_phrase(self) -> &'static str {
        match self {
            Self::Recovery => "very easy, RPE 2-3, shorter stride and relaxed breathing",
            Self::Easy => "conversational, RPE 3-4, you could talk in full sentences",
            Self::Steady => "moderate, RPE 5, talking in short sentences",
            Self::Marathon => "controlled and rhythmic, RPE 6, a pace you could hold for hours",
            Self::Tempo => "comfortably hard, RPE 7, only a few words at a time",
            Self::Threshold => "hard but sustainable for about an hour, RPE 7-8",
            Self::Interval => "hard, RPE 8-9, breathing heavily by the end of each rep",
        }
    }

    /// Whether this counts as a hard effort for streak and quality analysis
    #[must_use]
    pub const fn is_hard(self) -> bool {
        matches!(self, Self::Tempo | Self::Threshold | Self::Interval)
    }
}

impl fmt::Display for EffortCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffortCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown effort category: {s}"))
    }
}
