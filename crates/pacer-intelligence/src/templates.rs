// ABOUTME: Workout templates: quality type per phase, interval structures, rationale and swaps
// ABOUTME: Structures target zone paces when known and effort categories always
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::pace_model::PaceZones;
use pacer_core::constants::race_distances::{FIVE_K, HALF_MARATHON, TEN_K};
use pacer_core::constants::round_half_mile;
use pacer_core::models::{
    EffortCategory, IntervalSegment, Phase, SegmentKind, WorkoutAlternative, WorkoutType,
};

/// Warm-up for sessions of at least this many miles is longer
const LONG_SESSION_MILES: f64 = 6.0;

/// Inputs shared by every template
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateContext<'a> {
    /// Zones for numeric targets; `None` yields effort-only structures
    pub zones: Option<&'a PaceZones>,
    /// Goal race pace in seconds per mile
    pub race_pace_seconds: Option<f64>,
    /// Goal race distance
    pub race_distance_meters: f64,
    /// Seconds per mile added to every work target
    pub pace_offset_seconds: f64,
    /// Work repetitions added (or removed when negative)
    pub rep_delta: i32,
}

impl TemplateContext<'_> {
    fn pace_for(&self, effort: EffortCategory) -> Option<f64> {
        self.zones
            .map(|zones| zones.pace_for(effort) + self.pace_offset_seconds)
    }

    fn reps(&self, base: f64, min: i32, max: i32) -> u32 {
        (base.floor() as i32 + self.rep_delta).clamp(min, max) as u32
    }
}

/// Quality workout for the `index`-th quality slot of a week
#[must_use]
pub fn quality_type_for(phase: Phase, index: usize, race_distance_meters: f64) -> WorkoutType {
    let rotation = match phase {
        Phase::Base => [WorkoutType::Hills, WorkoutType::Fartlek],
        Phase::Build => [WorkoutType::Tempo, WorkoutType::Threshold],
        Phase::Peak if race_distance_meters <= TEN_K => {
            [WorkoutType::Intervals, WorkoutType::RacePace]
        }
        Phase::Peak => [WorkoutType::RacePace, WorkoutType::Intervals],
        Phase::Taper => [WorkoutType::RacePace, WorkoutType::RacePace],
        Phase::Recovery => [WorkoutType::Easy, WorkoutType::Easy],
    };
    rotation[index % rotation.len()]
}

/// Effort category matching race pace for a distance
#[must_use]
pub fn race_effort_for_distance(distance_meters: f64) -> EffortCategory {
    if distance_meters <= FIVE_K {
        EffortCategory::Interval
    } else if distance_meters <= TEN_K {
        EffortCategory::Threshold
    } else if distance_meters <= HALF_MARATHON {
        EffortCategory::Tempo
    } else {
        EffortCategory::Marathon
    }
}

fn segment(
    kind: SegmentKind,
    repeats: u32,
    distance_miles: Option<f64>,
    duration_seconds: Option<u32>,
    effort: EffortCategory,
    target_pace_seconds: Option<f64>,
) -> IntervalSegment {
    IntervalSegment {
        kind,
        repeats,
        distance_miles,
        duration_seconds,
        effort,
        target_pace_seconds,
    }
}

/// Interval structure for a quality session of `total_miles`
///
/// Returns `None` for workout types without a structured main set.
#[must_use]
pub fn build_structure(
    workout_type: WorkoutType,
    total_miles: f64,
    ctx: &TemplateContext<'_>,
) -> Option<Vec<IntervalSegment>> {
    if !workout_type.is_quality() {
        return None;
    }

    let warm_up = if total_miles >= LONG_SESSION_MILES { 1.5 } else { 1.0 };
    let cool_down = 1.0;
    let work = (total_miles - warm_up - cool_down).max(1.0);
    let easy = ctx.zones.map(|zones| zones.easy);

    let main_set = match workout_type {
        WorkoutType::Tempo => vec![segment(
            SegmentKind::Work,
            1,
            Some(round_half_mile(work).max(1.0)),
            None,
            EffortCategory::Tempo,
            ctx.pace_for(EffortCategory::Tempo),
        )],
        WorkoutType::Threshold => {
            let reps = ctx.reps(work, 2, 6);
            with_recoveries(
                segment(
                    SegmentKind::Work,
                    reps,
                    Some(1.0),
                    None,
                    EffortCategory::Threshold,
                    ctx.pace_for(EffortCategory::Threshold),
                ),
                timed(SegmentKind::Recovery, reps - 1, 60, EffortCategory::Recovery),
            )
        }
        WorkoutType::Intervals => {
            let reps = ctx.reps(work / 0.75, 3, 8);
            with_recoveries(
                segment(
                    SegmentKind::Work,
                    reps,
                    Some(0.5),
                    None,
                    EffortCategory::Interval,
                    ctx.pace_for(EffortCategory::Interval),
                ),
                timed(SegmentKind::Recovery, reps - 1, 120, EffortCategory::Recovery),
            )
        }
        WorkoutType::Hills => {
            let reps = ctx.reps(work * 3.0, 6, 10);
            with_recoveries(
                timed(SegmentKind::Work, reps, 60, EffortCategory::Threshold),
                timed(SegmentKind::Recovery, reps - 1, 90, EffortCategory::Recovery),
            )
        }
        WorkoutType::Fartlek => {
            let reps = ctx.reps(work * 2.0, 4, 10);
            with_recoveries(
                timed(SegmentKind::Work, reps, 120, EffortCategory::Tempo),
                timed(SegmentKind::Recovery, reps - 1, 60, EffortCategory::Easy),
            )
        }
        _ => {
            let effort = race_effort_for_distance(ctx.race_distance_meters);
            let rep_miles = if ctx.race_distance_meters <= TEN_K { 1.0 } else { 2.0 };
            let reps = ctx.reps(work / rep_miles, 2, 5);
            let pace = ctx.race_pace_seconds.map_or_else(
                || ctx.pace_for(effort),
                |race_pace| ctx.zones.map(|_| race_pace + ctx.pace_offset_seconds),
            );
            with_recoveries(
                segment(SegmentKind::Work, reps, Some(rep_miles), None, effort, pace),
                segment(
                    SegmentKind::Recovery,
                    reps - 1,
                    Some(0.25),
                    None,
                    EffortCategory::Recovery,
                    None,
                ),
            )
        }
    };

    let mut segments = Vec::with_capacity(main_set.len() + 2);
    let easy_run = |kind, miles| segment(kind, 1, Some(miles), None, EffortCategory::Easy, easy);
    segments.push(easy_run(SegmentKind::WarmUp, warm_up));
    segments.extend(main_set);
    segments.push(easy_run(SegmentKind::CoolDown, cool_down));
    Some(segments)
}

fn timed(kind: SegmentKind, repeats: u32, seconds: u32, effort: EffortCategory) -> IntervalSegment {
    segment(kind, repeats, None, Some(seconds), effort, None)
}

fn with_recoveries(work: IntervalSegment, recovery: IntervalSegment) -> Vec<IntervalSegment> {
    if recovery.repeats == 0 {
        vec![work]
    } else {
        vec![work, recovery]
    }
}

/// Why a workout type appears in a given phase
#[must_use]
pub fn rationale_for(workout_type: WorkoutType, phase: Phase, phase_week: u32) -> String {
    let purpose = match workout_type {
        WorkoutType::Hills => "hill repeats build strength and economy without track speed",
        WorkoutType::Fartlek => "relaxed surges introduce faster running while the base grows",
        WorkoutType::Tempo => "sustained comfortably hard running raises lactate threshold",
        WorkoutType::Threshold => "cruise intervals bank time at threshold with short breaks",
        WorkoutType::RacePace => "rehearses goal-race rhythm and pacing",
        WorkoutType::Intervals => "VO2max repeats sharpen top-end aerobic power",
        WorkoutType::LongRun => "builds endurance and durability for race day",
        WorkoutType::Easy => "aerobic volume that supports the key sessions",
        WorkoutType::Recovery => "keeps the legs moving while absorbing harder work",
        WorkoutType::ShakeOut => "loosens up the day before the race",
        WorkoutType::Steady => "moderate aerobic running",
        WorkoutType::Race => "race day",
    };
    format!("{} week {phase_week}: {purpose}.", capitalize(phase.as_str()))
}

pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Acceptable swaps for a workout
#[must_use]
pub fn alternatives_for(workout_type: WorkoutType, distance_miles: f64) -> Vec<WorkoutAlternative> {
    if workout_type.is_quality() {
        return vec![
            WorkoutAlternative {
                workout_type,
                description: "Run the main set on a treadmill or flat loop by effort"
                    .to_owned(),
            },
            WorkoutAlternative {
                workout_type: WorkoutType::Steady,
                description: format!(
                    "Short on energy: {:.1} mi at a steady effort instead",
                    round_half_mile(distance_miles * 0.8)
                ),
            },
        ];
    }

    match workout_type {
        WorkoutType::LongRun => vec![WorkoutAlternative {
            workout_type: WorkoutType::Easy,
            description: "Split into two easy runs on the same day".to_owned(),
        }],
        WorkoutType::Easy => vec![WorkoutAlternative {
            workout_type: WorkoutType::Recovery,
            description: "Swap for 30-40 minutes of easy cross-training".to_owned(),
        }],
        _ => Vec::new(),
    }
}
