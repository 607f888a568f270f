// ABOUTME: Rolling-window expansion of unpopulated macro-plan blocks into planned workouts
// ABOUTME: Applies profile biases, RPE adaptation and race protection before emitting workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Window Generator
//!
//! Only the next few unpopulated blocks are materialized. Each call:
//!
//! 1. Expands weekly slots into draft workouts per block
//! 2. Applies athlete profile biases (comfort, caution, stress)
//! 3. Applies the adaptation rule chosen from recent RPE feedback
//! 4. Inserts races and protects the days around them
//! 5. Resolves targets (numeric when zones are known, effort-only otherwise)
//!
//! The output map contains exactly the week numbers of the blocks processed.

use std::collections::{BTreeMap, BTreeSet};

use crate::adaptation::{self, AdaptationAdjustment, AdaptationDecision};
use crate::config::PlanningConfig;
use crate::pace_model::{format_pace, PaceModel, PaceZones};
use crate::templates::{
    alternatives_for, build_structure, capitalize, quality_type_for, race_effort_for_distance,
    rationale_for, TemplateContext,
};
use crate::weekly_structure::{SlotKind, WeeklyStructure};
use chrono::{Datelike, NaiveDate, Weekday};
use pacer_core::constants::round_half_mile;
use pacer_core::models::{
    AthleteProfile, Block, CompletedWorkoutSummary, EffortCategory, Phase, PlannedWorkout, Race,
    WorkoutStatus, WorkoutType,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Maximum blocks materialized per call
pub const MAX_WINDOW_BLOCKS: usize = 3;

/// Quality session share of weekly mileage
const QUALITY_SHARE: f64 = 0.15;
/// Quality session distance bounds (miles)
const QUALITY_MIN_MILES: f64 = 3.0;
const QUALITY_MAX_MILES: f64 = 10.0;
/// Shortest easy, recovery or capped run (miles)
const MIN_RUN_MILES: f64 = 2.0;
/// Shake-out distance the day before the goal race (miles)
const SHAKE_OUT_MILES: f64 = 3.0;
/// Long run multiplier for low long-run comfort
const LOW_COMFORT_LONG_RUN_FACTOR: f64 = 0.9;
/// Seconds per mile softened on long runs for low comfort
const LOW_COMFORT_LONG_RUN_SOFTENING: f64 = 10.0;
/// Seconds per mile softened on quality targets under high stress
const STRESS_PACE_SOFTENING: f64 = 5.0;
/// Longest run on a protected day (miles)
const PROTECTED_RUN_MAX_MILES: f64 = 4.0;
/// Recovery run share of the easy run it replaces
const RECOVERY_RUN_FACTOR: f64 = 0.75;

/// Next unpopulated blocks in week order, at most `max_blocks`
#[must_use]
pub fn select_window(
    blocks: &[Block],
    populated_weeks: &BTreeSet<u32>,
    max_blocks: usize,
) -> Vec<Block> {
    let mut pending: Vec<&Block> = blocks
        .iter()
        .filter(|block| !populated_weeks.contains(&block.week_number))
        .collect();
    pending.sort_by_key(|block| block.week_number);
    pending
        .into_iter()
        .take(max_blocks.min(MAX_WINDOW_BLOCKS))
        .cloned()
        .collect()
}

/// Everything needed to expand a window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowGenerationInput {
    /// Blocks to expand; anything past the window size is ignored
    pub blocks: Vec<Block>,
    /// Weekday slot assignment
    pub structure: WeeklyStructure,
    /// Training zones; absent zones yield effort-only prescriptions
    #[serde(default)]
    pub zones: Option<PaceZones>,
    /// Current VDOT, used for goal race pace
    #[serde(default)]
    pub vdot: Option<f64>,
    /// Athlete profile snapshot
    #[serde(default)]
    pub profile: AthleteProfile,
    /// Goal race
    pub goal_race: Race,
    /// B/C races
    #[serde(default)]
    pub intermediate_races: Vec<Race>,
    /// Completed workouts for adaptation
    #[serde(default)]
    pub recent_workouts: Vec<CompletedWorkoutSummary>,
    /// Date the window is generated on
    pub as_of: NaiveDate,
}

/// Generated workouts plus the adaptation decision behind them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowPlan {
    /// Workouts per week number, each list in date order
    pub workouts: BTreeMap<u32, Vec<PlannedWorkout>>,
    /// Adaptation evaluated from recent workouts
    pub adaptation: AdaptationDecision,
}

impl WindowPlan {
    /// Total workouts across the window
    #[must_use]
    pub fn workout_count(&self) -> usize {
        self.workouts.values().map(Vec::len).sum()
    }

    /// Workouts in date order
    pub fn iter(&self) -> impl Iterator<Item = &PlannedWorkout> + '_ {
        self.workouts.values().flatten()
    }
}

#[derive(Debug, Clone)]
struct Draft {
    date: NaiveDate,
    week_number: u32,
    phase: Phase,
    phase_week: u32,
    workout_type: WorkoutType,
    distance_miles: f64,
    pace_offset_seconds: f64,
    rep_delta: i32,
    race: Option<Race>,
    notes: Vec<String>,
}

impl Draft {
    fn new(block: &Block, date: NaiveDate, workout_type: WorkoutType, distance_miles: f64) -> Self {
        Self {
            date,
            week_number: block.week_number,
            phase: block.phase,
            phase_week: block.phase_week,
            workout_type,
            distance_miles,
            pace_offset_seconds: 0.0,
            rep_delta: 0,
            race: None,
            notes: Vec::new(),
        }
    }

    fn is_fixed(&self) -> bool {
        matches!(self.workout_type, WorkoutType::Race | WorkoutType::ShakeOut)
    }
}

/// Expands blocks into planned workouts
#[derive(Debug, Clone, Default)]
pub struct WindowGenerator {
    config: PlanningConfig,
}

impl WindowGenerator {
    /// Generator using the given planning configuration
    #[must_use]
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Expand the window
    #[must_use]
    pub fn generate(&self, input: &WindowGenerationInput) -> WindowPlan {
        let mut blocks = input.blocks.clone();
        blocks.sort_by_key(|block| block.week_number);
        blocks.dedup_by_key(|block| block.week_number);
        if blocks.len() > MAX_WINDOW_BLOCKS {
            warn!(
                given = blocks.len(),
                max = MAX_WINDOW_BLOCKS,
                "Window truncated to the maximum block count"
            );
            blocks.truncate(MAX_WINDOW_BLOCKS);
        }

        let decision = adaptation::evaluate(
            &input.recent_workouts,
            input.as_of,
            &self.config.adaptation,
        );

        let mut races: Vec<Race> = input.intermediate_races.clone();
        races.push(input.goal_race.clone());

        let mut drafts: Vec<Draft> = blocks
            .iter()
            .flat_map(|block| draft_block(block, &input.structure, &races, &input.goal_race))
            .collect();
        drafts.sort_by_key(|draft| draft.date);

        apply_profile_biases(&mut drafts, &input.profile);
        apply_adaptation(&mut drafts, &decision);
        protect_races(&mut drafts, &races);

        let race_pace = input
            .vdot
            .and_then(|vdot| {
                PaceModel::race_pace_for_distance(vdot, input.goal_race.distance_meters)
            })
            .or_else(|| {
                input.zones.map(|zones| {
                    zones.pace_for(race_effort_for_distance(input.goal_race.distance_meters))
                })
            });
        let resolver = TargetResolver {
            zones: input
                .zones
                .filter(|_| input.profile.wants_pace_targets()),
            goal_race_id: &input.goal_race.id,
            race_pace,
            race_distance_meters: input.goal_race.distance_meters,
            profile: &input.profile,
        };

        let mut workouts: BTreeMap<u32, Vec<PlannedWorkout>> = blocks
            .iter()
            .map(|block| (block.week_number, Vec::new()))
            .collect();
        for draft in drafts {
            if let Some(week) = workouts.get_mut(&draft.week_number) {
                week.push(resolver.resolve(draft));
            }
        }

        let plan = WindowPlan {
            workouts,
            adaptation: decision,
        };
        info!(
            weeks = plan.workouts.len(),
            workouts = plan.workout_count(),
            numeric_targets = resolver.zones.is_some(),
            "Generated workout window"
        );
        plan
    }
}

fn race_on(races: &[Race], date: NaiveDate) -> Option<&Race> {
    races.iter().find(|race| race.date == date)
}

fn draft_block(
    block: &Block,
    structure: &WeeklyStructure,
    races: &[Race],
    goal_race: &Race,
) -> Vec<Draft> {
    let mileage = f64::from(block.target_mileage);
    let quality_miles =
        round_half_mile(mileage * QUALITY_SHARE).clamp(QUALITY_MIN_MILES, QUALITY_MAX_MILES);
    let shake_out_day = goal_race.date.pred_opt();

    let mut drafts = Vec::new();
    let mut quality_remaining = block.quality_sessions_target;
    let mut quality_index = 0;

    for date in block.dates() {
        if let Some(race) = race_on(races, date) {
            debug!(race = %race.name, %date, "Inserted race into window");
            let mut draft = Draft::new(block, date, WorkoutType::Race, race.distance_miles());
            draft.race = Some(race.clone());
            drafts.push(draft);
            continue;
        }
        if shake_out_day == Some(date) {
            drafts.push(Draft::new(block, date, WorkoutType::ShakeOut, SHAKE_OUT_MILES));
            continue;
        }

        let draft = match structure.slot(date.weekday()) {
            SlotKind::Rest => continue,
            SlotKind::Long => Draft::new(
                block,
                date,
                WorkoutType::LongRun,
                f64::from(block.long_run_target),
            ),
            SlotKind::Quality if quality_remaining > 0 => {
                quality_remaining -= 1;
                let mut workout_type =
                    quality_type_for(block.phase, quality_index, goal_race.distance_meters);
                quality_index += 1;
                if block.is_down_week && workout_type.is_quality() {
                    workout_type = workout_type.step_down();
                }
                Draft::new(block, date, workout_type, quality_miles)
            }
            SlotKind::Quality | SlotKind::Easy => Draft::new(block, date, WorkoutType::Easy, 0.0),
        };
        drafts.push(draft);
    }

    share_easy_mileage(&mut drafts, mileage);
    drafts
}

fn share_easy_mileage(drafts: &mut [Draft], mileage: f64) {
    let easy_days = drafts
        .iter()
        .filter(|draft| draft.workout_type == WorkoutType::Easy)
        .count();
    if easy_days == 0 {
        return;
    }
    let committed: f64 = drafts
        .iter()
        .filter(|draft| draft.workout_type != WorkoutType::Easy)
        .map(|draft| draft.distance_miles)
        .sum();
    let easy_miles =
        round_half_mile((mileage - committed) / easy_days as f64).max(MIN_RUN_MILES);
    for draft in drafts
        .iter_mut()
        .filter(|draft| draft.workout_type == WorkoutType::Easy)
    {
        draft.distance_miles = easy_miles;
    }
}

fn apply_profile_biases(drafts: &mut [Draft], profile: &AthleteProfile) {
    let cautious = profile.needs_caution();
    let stressed = profile.is_highly_stressed();

    for draft in drafts.iter_mut().filter(|draft| !draft.is_fixed()) {
        if cautious && draft.workout_type == WorkoutType::Intervals {
            draft.workout_type = WorkoutType::Threshold;
            draft
                .notes
                .push("Threshold instead of VO2max work while building back.".to_owned());
        }

        if profile.has_low_comfort(draft.workout_type) {
            if draft.workout_type == WorkoutType::LongRun {
                draft.distance_miles =
                    round_half_mile(draft.distance_miles * LOW_COMFORT_LONG_RUN_FACTOR);
                draft.pace_offset_seconds += LOW_COMFORT_LONG_RUN_SOFTENING;
                draft
                    .notes
                    .push("Long run shortened and softened to build confidence.".to_owned());
            } else {
                draft.rep_delta -= 1;
                draft
                    .notes
                    .push("Main set trimmed by one repetition to build confidence.".to_owned());
            }
        }

        if stressed && draft.workout_type.is_quality() {
            draft.pace_offset_seconds += STRESS_PACE_SOFTENING;
            draft
                .notes
                .push("Targets eased slightly while life stress is high.".to_owned());
        }
    }
}

fn apply_adaptation(drafts: &mut [Draft], decision: &AdaptationDecision) {
    let Some(rule_name) = decision.rule.as_ref().map(|rule| rule.name.as_str()) else {
        return;
    };
    let AdaptationAdjustment {
        intensity_steps_down,
        pace_offset_seconds,
        extra_recovery_days,
        extra_reps,
        sessions_affected,
    } = decision.adjustment();

    let quality = drafts
        .iter_mut()
        .filter(|draft| draft.workout_type.is_quality())
        .take(usize::from(sessions_affected));
    for draft in quality {
        for _ in 0..intensity_steps_down {
            draft.workout_type = draft.workout_type.step_down();
        }
        draft.pace_offset_seconds += pace_offset_seconds;
        draft.rep_delta += i32::from(extra_reps);
        draft
            .notes
            .push(format!("Adjusted from recent effort feedback ({rule_name})."));
    }

    let easy = drafts
        .iter_mut()
        .filter(|draft| draft.workout_type == WorkoutType::Easy)
        .take(usize::from(extra_recovery_days));
    for draft in easy {
        draft.workout_type = WorkoutType::Recovery;
        draft.distance_miles =
            round_half_mile(draft.distance_miles * RECOVERY_RUN_FACTOR).max(MIN_RUN_MILES);
        draft
            .notes
            .push(format!("Extra recovery from recent effort feedback ({rule_name})."));
    }

    debug!(
        rule = rule_name,
        steps_down = intensity_steps_down,
        recovery_days = extra_recovery_days,
        "Applied adaptation to window"
    );
}

fn protect_races(drafts: &mut [Draft], races: &[Race]) {
    for race in races {
        let protection = race.priority.protection_days();
        for draft in drafts.iter_mut().filter(|draft| !draft.is_fixed()) {
            let gap = (draft.date - race.date).num_days().abs();
            if gap == 0 || gap > protection {
                continue;
            }
            let softened = if draft.workout_type.is_quality() {
                Some(if gap <= 1 {
                    WorkoutType::Recovery
                } else {
                    WorkoutType::Easy
                })
            } else if draft.workout_type == WorkoutType::LongRun {
                Some(WorkoutType::Easy)
            } else {
                None
            };

            if let Some(workout_type) = softened {
                debug!(
                    race = %race.name,
                    date = %draft.date,
                    from = %draft.workout_type,
                    to = %workout_type,
                    "Protected race"
                );
                draft.workout_type = workout_type;
                draft.distance_miles = draft
                    .distance_miles
                    .clamp(MIN_RUN_MILES, PROTECTED_RUN_MAX_MILES);
                draft.notes.push(format!("Kept easy around {}.", race.name));
            }
        }
    }
}

struct TargetResolver<'a> {
    zones: Option<PaceZones>,
    goal_race_id: &'a str,
    race_pace: Option<f64>,
    race_distance_meters: f64,
    profile: &'a AthleteProfile,
}

impl TargetResolver<'_> {
    fn effort_for(&self, workout_type: WorkoutType) -> EffortCategory {
        if workout_type == WorkoutType::RacePace {
            race_effort_for_distance(self.race_distance_meters)
        } else {
            workout_type.primary_effort()
        }
    }

    fn pace_for(&self, draft: &Draft) -> Option<f64> {
        let zones = self.zones.as_ref()?;
        match draft.workout_type {
            WorkoutType::Race => draft.race.as_ref().and_then(|race| {
                race.goal_time_seconds
                    .filter(|_| race.distance_meters > 0.0)
                    .map(|goal| goal / race.distance_miles())
                    .or_else(|| (race.id == self.goal_race_id).then_some(self.race_pace).flatten())
            }),
            WorkoutType::RacePace => self
                .race_pace
                .map(|pace| pace + draft.pace_offset_seconds),
            other => Some(zones.pace_for(self.effort_for(other)) + draft.pace_offset_seconds),
        }
    }

    fn availability_minutes(&self, date: NaiveDate) -> Option<u32> {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => self.profile.weekend_availability_minutes,
            _ => self.profile.weekday_availability_minutes,
        }
    }

    fn resolve(&self, mut draft: Draft) -> PlannedWorkout {
        let pace = self.pace_for(&draft);

        if let (Some(pace), Some(minutes)) = (pace, self.availability_minutes(draft.date)) {
            let needed = draft.distance_miles * pace / 60.0;
            if draft.workout_type != WorkoutType::Race && pace > 0.0 && needed > f64::from(minutes)
            {
                draft.distance_miles =
                    round_half_mile(f64::from(minutes) * 60.0 / pace).max(MIN_RUN_MILES);
                draft
                    .notes
                    .push(format!("Shortened to fit {minutes} available minutes."));
            }
        }

        let effort = self.effort_for(draft.workout_type);
        let ctx = TemplateContext {
            zones: self.zones.as_ref(),
            race_pace_seconds: self.race_pace,
            race_distance_meters: self.race_distance_meters,
            pace_offset_seconds: draft.pace_offset_seconds,
            rep_delta: draft.rep_delta,
        };
        let structure = build_structure(draft.workout_type, draft.distance_miles, &ctx);

        let phrase = capitalize(effort.effort_phrase());
        let effort_description = pace.map_or_else(
            || phrase.clone(),
            |pace| format!("{phrase}; target {}", format_pace(pace)),
        );

        let mut rationale = rationale_for(draft.workout_type, draft.phase, draft.phase_week);
        for note in &draft.notes {
            rationale.push(' ');
            rationale.push_str(note);
        }

        PlannedWorkout {
            date: draft.date,
            week_number: draft.week_number,
            workout_type: draft.workout_type,
            target_distance_miles: draft.distance_miles,
            target_duration_minutes: pace
                .map(|pace| (draft.distance_miles * pace / 60.0).round() as u32),
            target_pace_seconds: pace,
            effort_description,
            structure,
            rationale,
            alternatives: alternatives_for(draft.workout_type, draft.distance_miles),
            is_key_workout: draft.workout_type.is_quality()
                || matches!(draft.workout_type, WorkoutType::LongRun | WorkoutType::Race),
            status: WorkoutStatus::Scheduled,
        }
    }
}
