// ABOUTME: Split-level effort attribution against condition-adjusted pace zones
// ABOUTME: Pure classification used for retrospective scoring and for previewing planned structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Effort Classifier
//!
//! Each split's pace is matched to the nearest zone center. When the two
//! nearest centers are within the tie tolerance of each other the harder zone
//! wins, so ambiguous splits are never attributed leniently.
//!
//! Zones come from, in order: explicit zones in the context, zones derived
//! from a VDOT, or zones inferred from the run itself (median split pace
//! treated as easy). Heat and elevation shift explicit and VDOT zones slower
//! before matching; inferred zones already reflect the day's conditions.

use std::collections::BTreeMap;

use crate::conditions::{condition_adjustment_seconds, Conditions};
use crate::config::{ClassificationConfig, PlanningConfig};
use crate::pace_model::{PaceModel, PaceZones};
use pacer_core::models::{EffortCategory, IntervalSegment, Split, WorkoutType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inferred-zone offsets from the easy pace (seconds per mile)
const INFERRED_OFFSETS: [(EffortCategory, f64); 7] = [
    (EffortCategory::Recovery, 45.0),
    (EffortCategory::Easy, 0.0),
    (EffortCategory::Steady, -30.0),
    (EffortCategory::Marathon, -55.0),
    (EffortCategory::Tempo, -75.0),
    (EffortCategory::Threshold, -90.0),
    (EffortCategory::Interval, -120.0),
];

/// Share of distance that counts as a quality session's main set
const MAIN_SET_SHARE: f64 = 0.2;

/// Resolved zone centers used for matching
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneBoundaries {
    /// Zone centers after the condition adjustment
    pub zones: PaceZones,
    /// Seconds per mile added for heat and elevation
    pub condition_adjustment_seconds: f64,
    /// Whether zones were inferred from the splits themselves
    pub inferred: bool,
}

impl ZoneBoundaries {
    /// Shift `zones` by a condition adjustment
    #[must_use]
    pub fn new(zones: &PaceZones, condition_adjustment_seconds: f64) -> Self {
        Self {
            zones: zones.shifted(condition_adjustment_seconds),
            condition_adjustment_seconds,
            inferred: false,
        }
    }

    /// Zones inferred from an easy reference pace
    #[must_use]
    pub fn inferred_from_easy(easy_pace: f64) -> Self {
        let zones = PaceZones::from_fn(|category| {
            let offset = INFERRED_OFFSETS
                .iter()
                .find(|(c, _)| *c == category)
                .map_or(0.0, |(_, offset)| *offset);
            easy_pace + offset
        });
        Self {
            zones,
            condition_adjustment_seconds: 0.0,
            inferred: true,
        }
    }

    /// Category for a pace, resolving near-ties toward the harder zone
    #[must_use]
    pub fn categorize(&self, pace_seconds: f64, tie_tolerance: f64) -> EffortCategory {
        let mut ranked: Vec<(f64, EffortCategory)> = EffortCategory::ALL
            .iter()
            .map(|category| ((pace_seconds - self.zones.pace_for(*category)).abs(), *category))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(b.1.cmp(&a.1)));

        match ranked.as_slice() {
            [(nearest_distance, nearest), (second_distance, second), ..]
                if second > nearest && second_distance - nearest_distance <= tie_tolerance =>
            {
                *second
            }
            [(_, nearest), ..] => *nearest,
            [] => EffortCategory::Easy,
        }
    }
}

/// Inputs that decide which zones a split list is judged against
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationContext {
    /// Explicit zones
    #[serde(default)]
    pub zones: Option<PaceZones>,
    /// VDOT used when no zones are given
    #[serde(default)]
    pub vdot: Option<f64>,
    /// Heat and elevation
    #[serde(default)]
    pub conditions: Conditions,
}

/// Classified splits plus the boundaries they were judged against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitClassification {
    /// Input splits with `category` set; `None` for unusable splits
    pub splits: Vec<Split>,
    /// Boundaries used; `None` when no zone source existed
    pub boundaries: Option<ZoneBoundaries>,
}

/// Distance per effort category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffortSummary {
    /// Miles per category
    pub distance_by_category: BTreeMap<EffortCategory, f64>,
    /// Category covering the most distance
    pub dominant: Option<EffortCategory>,
    /// Total classified miles
    pub total_distance_miles: f64,
    /// Share of distance at tempo or harder
    pub hard_fraction: f64,
}

/// Plan-versus-actual verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionAssessment {
    /// Within one zone of the prescription
    OnTarget,
    /// More than one zone harder
    HarderThanPlanned,
    /// More than one zone easier
    EasierThanPlanned,
}

/// Effort classifier
#[derive(Debug, Clone, Default)]
pub struct EffortClassifier {
    config: ClassificationConfig,
    pace_model: PaceModel,
}

impl EffortClassifier {
    /// Classifier using the given planning configuration
    #[must_use]
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            config: config.classification.clone(),
            pace_model: PaceModel::new(config),
        }
    }

    /// Zone boundaries for a context, inferring from `splits` as a last resort
    #[must_use]
    pub fn resolve_boundaries(
        &self,
        splits: &[Split],
        context: &ClassificationContext,
    ) -> Option<ZoneBoundaries> {
        let zones = context.zones.or_else(|| {
            context
                .vdot
                .and_then(|vdot| self.pace_model.calculate_pace_zones(vdot))
        });

        if let Some(zones) = zones {
            let adjustment = condition_adjustment_seconds(zones.threshold, &context.conditions);
            return Some(ZoneBoundaries::new(&zones, adjustment));
        }

        median_pace(splits).map(ZoneBoundaries::inferred_from_easy)
    }

    /// Categorize every split
    ///
    /// Any category already on an input split is ignored, so classifying a
    /// classified list again yields the same categories.
    #[must_use]
    pub fn classify(
        &self,
        splits: &[Split],
        context: &ClassificationContext,
    ) -> SplitClassification {
        let boundaries = self.resolve_boundaries(splits, context);
        let tolerance = self.config.tie_tolerance_seconds;

        let classified = splits
            .iter()
            .map(|split| Split {
                category: boundaries.as_ref().and_then(|b| {
                    split
                        .pace_seconds_per_mile()
                        .map(|pace| b.categorize(pace, tolerance))
                }),
                ..split.clone()
            })
            .collect();

        debug!(
            splits = splits.len(),
            inferred = boundaries.as_ref().is_some_and(|b| b.inferred),
            adjustment = boundaries.as_ref().map_or(0.0, |b| b.condition_adjustment_seconds),
            "Classified split efforts"
        );

        SplitClassification {
            splits: classified,
            boundaries,
        }
    }

    /// Classify the splits a planned structure would produce at its targets
    #[must_use]
    pub fn preview_structure(
        &self,
        segments: &[IntervalSegment],
        zones: &PaceZones,
    ) -> SplitClassification {
        let splits = hypothetical_splits(segments, zones);
        let context = ClassificationContext {
            zones: Some(*zones),
            ..ClassificationContext::default()
        };
        self.classify(&splits, &context)
    }
}

/// Classify with default configuration
#[must_use]
pub fn classify_split_efforts_with_zones(
    splits: &[Split],
    context: &ClassificationContext,
) -> SplitClassification {
    EffortClassifier::default().classify(splits, context)
}

/// One split per segment repetition at the segment's target pace
#[must_use]
pub fn hypothetical_splits(segments: &[IntervalSegment], zones: &PaceZones) -> Vec<Split> {
    segments
        .iter()
        .flat_map(|segment| {
            let pace = segment
                .target_pace_seconds
                .unwrap_or_else(|| zones.pace_for(segment.effort));
            let split = match (segment.distance_miles, segment.duration_seconds) {
                (Some(distance), _) => Some(Split::from_pace(distance, pace)),
                (None, Some(duration)) if pace > 0.0 => {
                    Some(Split::new(f64::from(duration) / pace, f64::from(duration)))
                }
                _ => None,
            };
            (0..segment.repeats).filter_map(move |_| split.clone())
        })
        .collect()
}

fn median_pace(splits: &[Split]) -> Option<f64> {
    let mut paces: Vec<f64> = splits
        .iter()
        .filter_map(Split::pace_seconds_per_mile)
        .collect();
    if paces.is_empty() {
        return None;
    }
    paces.sort_by(f64::total_cmp);
    let mid = paces.len() / 2;
    Some(if paces.len() % 2 == 0 {
        (paces[mid - 1] + paces[mid]) / 2.0
    } else {
        paces[mid]
    })
}

/// Distance per category across classified splits
#[must_use]
pub fn summarize_efforts(splits: &[Split]) -> EffortSummary {
    let mut distance_by_category: BTreeMap<EffortCategory, f64> = BTreeMap::new();
    for split in splits {
        if let Some(category) = split.category {
            *distance_by_category.entry(category).or_insert(0.0) += split.distance_miles;
        }
    }

    let total_distance_miles: f64 = distance_by_category.values().sum();
    let hard_distance: f64 = distance_by_category
        .iter()
        .filter(|(category, _)| category.is_hard())
        .map(|(_, miles)| *miles)
        .sum();
    let dominant = distance_by_category
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(category, _)| *category);

    EffortSummary {
        dominant,
        total_distance_miles,
        hard_fraction: if total_distance_miles > 0.0 {
            hard_distance / total_distance_miles
        } else {
            0.0
        },
        distance_by_category,
    }
}

/// Compare what was run with what was prescribed
///
/// Quality sessions are judged by their hardest category covering a
/// meaningful share of distance; everything else by the dominant category.
/// Returns `None` when nothing was classified.
#[must_use]
pub fn assess_execution(
    planned: WorkoutType,
    summary: &EffortSummary,
) -> Option<ExecutionAssessment> {
    let measured = if planned.is_quality() {
        summary
            .distance_by_category
            .iter()
            .rev()
            .find(|(_, miles)| **miles >= summary.total_distance_miles * MAIN_SET_SHARE)
            .map(|(category, _)| *category)
    } else {
        summary.dominant
    }?;

    let expected = planned.primary_effort() as i32;
    let actual = measured as i32;
    Some(if actual > expected + 1 {
        ExecutionAssessment::HarderThanPlanned
    } else if actual < expected - 1 {
        ExecutionAssessment::EasierThanPlanned
    } else {
        ExecutionAssessment::OnTarget
    })
}
