// ABOUTME: Periodization engine building the weekly block skeleton for a goal race
// ABOUTME: Deterministic phase partition, mileage ramp with down weeks, and taper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Macro Plan Generator
//!
//! Builds one [`Block`] per week between the plan start and race day:
//!
//! 1. whole weeks between start and race; fewer than the minimum is an error
//! 2. taper length from race distance, capped at a quarter of the plan
//! 3. remaining weeks split into base, build and peak by aggressiveness
//! 4. linear mileage ramp from current mileage to the peak ceiling across
//!    base and build, held through peak, with periodic down weeks
//! 5. taper weeks at fixed fractions of peak, strictly decreasing
//!
//! Identical inputs always produce identical blocks.

use std::collections::HashMap;

use crate::config::{AggressivenessProfile, PeriodizationConfig, PlanningConfig};
use crate::errors::PlanError;
use crate::pace_model::PaceModel;
use chrono::{Days, NaiveDate};
use pacer_core::constants::units::DAYS_PER_WEEK;
use pacer_core::models::{
    AthleteProfile, Block, MacroPlan, Phase, PlanAggressiveness, PlanSummary,
    PredictionConfidence, Race, RacePriority,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything the generator needs to build a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanGenerationInput {
    /// Goal race
    pub race: Option<Race>,
    /// First day of week 1
    pub start_date: NaiveDate,
    /// Current weekly mileage
    pub current_weekly_mileage: u32,
    /// Requested peak weekly mileage
    pub peak_weekly_mileage: u32,
    /// Running days per week
    pub runs_per_week: u8,
    /// Quality sessions per week in build and peak
    #[serde(default)]
    pub quality_sessions_per_week: Option<u8>,
    /// How hard the plan pushes
    #[serde(default)]
    pub aggressiveness: PlanAggressiveness,
    /// B/C races before the goal race
    #[serde(default)]
    pub intermediate_races: Vec<Race>,
    /// Athlete profile snapshot
    #[serde(default)]
    pub profile: AthleteProfile,
    /// Current VDOT, if known
    #[serde(default)]
    pub vdot: Option<f64>,
    /// Trust in the VDOT source
    #[serde(default)]
    pub vdot_confidence: Option<PredictionConfidence>,
}

/// Number of weeks per phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseLayout {
    /// Base weeks
    pub base: u32,
    /// Build weeks
    pub build: u32,
    /// Peak weeks
    pub peak: u32,
    /// Taper weeks including race week
    pub taper: u32,
}

impl PhaseLayout {
    /// Total weeks covered
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.base + self.build + self.peak + self.taper
    }

    /// Weeks before the taper
    #[must_use]
    pub const fn pre_taper(&self) -> u32 {
        self.base + self.build + self.peak
    }

    /// Phase of a 1-based week number
    #[must_use]
    pub const fn phase_of(&self, week: u32) -> Phase {
        if week <= self.base {
            Phase::Base
        } else if week <= self.base + self.build {
            Phase::Build
        } else if week <= self.pre_taper() {
            Phase::Peak
        } else {
            Phase::Taper
        }
    }
}

/// Per-week targets before dates and focus text are attached
#[derive(Debug, Clone)]
struct WeekTarget {
    phase: Phase,
    scheduled: u32,
    mileage: u32,
    is_down_week: bool,
    recovery_from: Option<String>,
}

/// Periodized macro plan generator
#[derive(Debug, Clone, Default)]
pub struct MacroPlanGenerator {
    config: PeriodizationConfig,
    pace_model: PaceModel,
}

impl MacroPlanGenerator {
    /// Generator using the given planning configuration
    #[must_use]
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            config: config.periodization.clone(),
            pace_model: PaceModel::new(config),
        }
    }

    /// Build the macro plan
    ///
    /// # Errors
    ///
    /// - `PlanError::MissingRace` when no goal race is given
    /// - `PlanError::InsufficientTime` when fewer than the minimum whole weeks remain
    /// - `PlanError::InvalidInput` for a zero peak, zero runs per week, or a
    ///   race without a positive distance
    pub fn generate(&self, input: &PlanGenerationInput) -> Result<MacroPlan, PlanError> {
        let race = input.race.as_ref().ok_or(PlanError::MissingRace)?;
        Self::validate(input, race)?;

        let total_weeks = self.total_weeks(input.start_date, race.date)?;
        let layout = self.phase_layout(total_weeks, race.distance_meters, input.aggressiveness);
        let profile = self.effective_profile(input);

        debug!(
            race_id = %race.id,
            total_weeks,
            base = layout.base,
            build = layout.build,
            peak = layout.peak,
            taper = layout.taper,
            aggressiveness = input.aggressiveness.as_str(),
            "Partitioned plan phases"
        );

        let ceiling = Self::peak_ceiling(input.peak_weekly_mileage, &profile);
        let mut targets = Self::ramp(input.current_weekly_mileage, ceiling, &layout, &profile);
        self.insert_recovery_weeks(&mut targets, input, &layout, &profile);
        Self::apply_taper(&mut targets, ceiling, &layout, &profile);

        let blocks = self.assemble_blocks(&targets, input, race);
        let summary = Self::summarize(&blocks, layout.taper);

        let race_prediction = input.vdot.and_then(|vdot| {
            self.pace_model.predict(
                vdot,
                race.distance_meters,
                input.vdot_confidence.unwrap_or(PredictionConfidence::Medium),
            )
        });

        info!(
            race_id = %race.id,
            total_weeks = summary.total_weeks,
            peak_mileage = summary.peak_mileage,
            down_weeks = summary.down_weeks,
            "Generated macro plan"
        );

        Ok(MacroPlan {
            race_id: race.id.clone(),
            blocks,
            runs_per_week: input.runs_per_week,
            summary,
            race_prediction,
        })
    }

    fn validate(input: &PlanGenerationInput, race: &Race) -> Result<(), PlanError> {
        if !(1..=7).contains(&input.runs_per_week) {
            return Err(PlanError::InvalidInput(format!(
                "runs per week must be between 1 and 7, got {}",
                input.runs_per_week
            )));
        }
        if input.peak_weekly_mileage == 0 {
            return Err(PlanError::InvalidInput(
                "peak weekly mileage must be greater than zero".to_owned(),
            ));
        }
        if !race.distance_meters.is_finite() || race.distance_meters <= 0.0 {
            return Err(PlanError::InvalidInput(
                "race distance must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Whole weeks between `start` and `race_day`
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InsufficientTime` below the configured minimum
    pub fn total_weeks(&self, start: NaiveDate, race_day: NaiveDate) -> Result<u32, PlanError> {
        let days = (race_day - start).num_days().max(0);
        let weeks = u32::try_from(days / DAYS_PER_WEEK).unwrap_or(0);
        if weeks < self.config.min_plan_weeks {
            return Err(PlanError::InsufficientTime {
                weeks,
                minimum: self.config.min_plan_weeks,
            });
        }
        Ok(weeks)
    }

    /// Split `total_weeks` into base, build, peak and taper
    #[must_use]
    pub fn phase_layout(
        &self,
        total_weeks: u32,
        distance_meters: f64,
        aggressiveness: PlanAggressiveness,
    ) -> PhaseLayout {
        let taper = self
            .config
            .taper_weeks_for(distance_meters)
            .min((total_weeks / 4).max(1));
        let remaining = total_weeks.saturating_sub(taper);
        let [base_ratio, _, peak_ratio] = self.config.profile(aggressiveness).phase_ratios;

        let mut base = ((f64::from(remaining) * base_ratio).round() as u32).max(1);
        let mut peak = ((f64::from(remaining) * peak_ratio).round() as u32).max(1);
        while base + peak >= remaining && (base > 1 || peak > 1) {
            if base >= peak {
                base -= 1;
            } else {
                peak -= 1;
            }
        }
        let build = remaining.saturating_sub(base + peak);

        PhaseLayout {
            base,
            build,
            peak,
            taper,
        }
    }

    fn effective_profile(&self, input: &PlanGenerationInput) -> AggressivenessProfile {
        let mut profile = self.config.profile(input.aggressiveness).clone();
        if input.profile.needs_caution() {
            profile.down_week_cadence = profile
                .down_week_cadence
                .min(self.config.conservative.down_week_cadence);
        }
        profile
    }

    /// Highest weekly mileage the plan will reach
    fn peak_ceiling(requested_peak: u32, profile: &AggressivenessProfile) -> u32 {
        let ceiling = (f64::from(requested_peak) * profile.peak_ceiling).round() as u32;
        ceiling.clamp(1, requested_peak)
    }

    /// Mileage ramp and down weeks for every pre-taper week, placeholders after
    fn ramp(
        current: u32,
        ceiling: u32,
        layout: &PhaseLayout,
        profile: &AggressivenessProfile,
    ) -> Vec<WeekTarget> {
        let start = f64::from(current.clamp(1, ceiling));
        let ramp_weeks = layout.base + layout.build;
        let mut targets = Vec::with_capacity(layout.total() as usize);

        for week in 1..=layout.total() {
            let phase = layout.phase_of(week);
            let scheduled = if week <= ramp_weeks && ramp_weeks > 1 {
                let progress = f64::from(week - 1) / f64::from(ramp_weeks - 1);
                (f64::from(ceiling) - start).mul_add(progress, start).round() as u32
            } else {
                ceiling
            };
            let mileage = scheduled.min(ceiling);

            let previous = targets.last().map(|t: &WeekTarget| t.mileage);
            let due = week % profile.down_week_cadence == 0 && week <= layout.pre_taper();
            let down = previous
                .filter(|_| due)
                .and_then(|prev| Self::down_week_mileage(prev, profile.down_week_reduction));

            if let Some(reduced) = down {
                debug!(week, mileage = reduced, "Scheduled down week");
            }

            targets.push(WeekTarget {
                phase,
                scheduled: mileage,
                mileage: down.unwrap_or(mileage),
                is_down_week: down.is_some(),
                recovery_from: None,
            });
        }

        targets
    }

    /// Reduced mileage strictly below `previous`, or `None` when no reduction is possible
    fn down_week_mileage(previous: u32, reduction: f64) -> Option<u32> {
        if previous <= 1 {
            return None;
        }
        let reduced = (f64::from(previous) * (1.0 - reduction)).round() as u32;
        Some(reduced.min(previous - 1).max(1))
    }

    /// Turn the week after a long B race into a recovery week
    fn insert_recovery_weeks(
        &self,
        targets: &mut [WeekTarget],
        input: &PlanGenerationInput,
        layout: &PhaseLayout,
        profile: &AggressivenessProfile,
    ) {
        let mut races: Vec<&Race> = input
            .intermediate_races
            .iter()
            .filter(|race| {
                race.priority == RacePriority::B
                    && race.distance_meters >= self.config.recovery_block_min_race_meters
                    && race.date >= input.start_date
            })
            .collect();
        races.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));

        for race in races {
            let race_week = (race.date - input.start_date).num_days() / DAYS_PER_WEEK + 1;
            let recovery_week = u32::try_from(race_week + 1).unwrap_or(u32::MAX);
            if recovery_week > layout.pre_taper() {
                continue;
            }

            let index = (recovery_week - 1) as usize;
            let Some(previous) = index
                .checked_sub(1)
                .and_then(|i| targets.get(i))
                .map(|t| t.mileage)
            else {
                continue;
            };
            let Some(target) = targets.get_mut(index) else {
                continue;
            };
            if !target.is_down_week || target.mileage >= previous {
                match Self::down_week_mileage(previous, profile.down_week_reduction) {
                    Some(reduced) => target.mileage = reduced,
                    None => continue,
                }
            }
            target.phase = Phase::Recovery;
            target.is_down_week = true;
            target.recovery_from = Some(race.name.clone());

            debug!(
                week = recovery_week,
                race = %race.name,
                mileage = target.mileage,
                "Inserted recovery week after intermediate race"
            );

            // No two reduced weeks back to back
            if let Some(next) = targets.get_mut(index + 1) {
                if next.is_down_week && next.recovery_from.is_none() {
                    next.is_down_week = false;
                    next.mileage = next.scheduled;
                }
            }
        }

        Self::settle_down_weeks(targets, layout, profile);
    }

    /// Re-derive every reduced pre-taper week from its current predecessor so
    /// each stays strictly below the week before it
    fn settle_down_weeks(
        targets: &mut [WeekTarget],
        layout: &PhaseLayout,
        profile: &AggressivenessProfile,
    ) {
        let pre_taper = (layout.pre_taper() as usize).min(targets.len());
        for index in 1..pre_taper {
            let previous = targets[index - 1].mileage;
            let target = &mut targets[index];
            if !target.is_down_week || target.mileage < previous {
                continue;
            }
            if let Some(reduced) = Self::down_week_mileage(previous, profile.down_week_reduction) {
                target.mileage = reduced;
            } else {
                target.is_down_week = false;
                target.recovery_from = None;
                target.phase = layout.phase_of(index as u32 + 1);
            }
            debug!(week = index + 1, mileage = target.mileage, "Settled reduced week");
        }
    }

    /// Taper mileage as strictly decreasing fractions of peak. Taper weeks
    /// beyond the configured fractions keep stepping down from the last one
    fn apply_taper(
        targets: &mut [WeekTarget],
        ceiling: u32,
        layout: &PhaseLayout,
        profile: &AggressivenessProfile,
    ) {
        let first_taper = layout.pre_taper() as usize;
        let last_fraction = profile.taper_fractions.last().copied().unwrap_or(0.5);
        for offset in 0..layout.taper as usize {
            let fraction = profile
                .taper_fractions
                .get(offset)
                .copied()
                .unwrap_or(last_fraction);
            let index = first_taper + offset;
            let previous = index
                .checked_sub(1)
                .and_then(|i| targets.get(i))
                .map_or(ceiling + 1, |t| t.mileage);
            let mut mileage = (f64::from(ceiling) * fraction).round() as u32;
            if previous > 1 {
                mileage = mileage.min(previous - 1);
            }
            if let Some(target) = targets.get_mut(index) {
                target.mileage = mileage.max(1).min(previous.max(1));
                target.phase = Phase::Taper;
            }
        }
    }

    fn assemble_blocks(
        &self,
        targets: &[WeekTarget],
        input: &PlanGenerationInput,
        race: &Race,
    ) -> Vec<Block> {
        let long_run_cap = self.config.long_run_cap(race.distance_meters);
        let requested_quality = input
            .quality_sessions_per_week
            .unwrap_or(self.config.quality.default_sessions)
            .min(self.config.quality.max)
            .min(input.runs_per_week.saturating_sub(1));
        let mut phase_weeks: HashMap<Phase, u32> = HashMap::new();
        let week_count = targets.len();

        targets
            .iter()
            .enumerate()
            .map(|(index, target)| {
                let week_number = index as u32 + 1;
                let start_date = input
                    .start_date
                    .checked_add_days(Days::new(u64::from(week_number - 1) * 7))
                    .unwrap_or(input.start_date);
                let end_date = if index + 1 == week_count {
                    race.date
                } else {
                    start_date
                        .checked_add_days(Days::new(6))
                        .unwrap_or(start_date)
                };
                let phase_week = phase_weeks.entry(target.phase).or_insert(0);
                *phase_week += 1;

                let long_run = (f64::from(target.mileage) * self.config.long_run.fraction).round()
                    as u32;

                Block {
                    week_number,
                    phase: target.phase,
                    phase_week: *phase_week,
                    start_date,
                    end_date,
                    target_mileage: target.mileage,
                    long_run_target: long_run.min(long_run_cap),
                    quality_sessions_target: self.quality_for(target, requested_quality),
                    is_down_week: target.is_down_week,
                    focus: Self::focus_for(target),
                }
            })
            .collect()
    }

    fn quality_for(&self, target: &WeekTarget, requested: u8) -> u8 {
        let caps = &self.config.quality;
        let phase_cap = match target.phase {
            Phase::Base => caps.base,
            Phase::Build | Phase::Peak => requested,
            Phase::Taper => caps.taper,
            Phase::Recovery => 0,
        };
        let cap = if target.is_down_week {
            phase_cap.min(caps.down_week)
        } else {
            phase_cap
        };
        requested.min(cap)
    }

    fn focus_for(target: &WeekTarget) -> String {
        if let Some(race) = &target.recovery_from {
            return format!("Recover from {race}: easy running only");
        }
        if target.is_down_week {
            return "Down week: absorb recent training at reduced volume".to_owned();
        }
        match target.phase {
            Phase::Base => "Aerobic foundation: easy volume with one light quality session",
            Phase::Build => "Threshold development: tempo and cruise intervals",
            Phase::Peak => "Race-specific sharpening at the highest volume",
            Phase::Taper => "Freshen up: reduced volume with short race-pace touches",
            Phase::Recovery => "Recovery: easy running only",
        }
        .to_owned()
    }

    fn summarize(blocks: &[Block], taper_weeks: u32) -> PlanSummary {
        let (peak_week, peak_mileage) = blocks
            .iter()
            .fold((0, 0), |(week, best), block| {
                if block.target_mileage > best {
                    (block.week_number, block.target_mileage)
                } else {
                    (week, best)
                }
            });

        PlanSummary {
            total_weeks: blocks.len() as u32,
            peak_mileage,
            peak_week,
            total_miles: blocks.iter().map(|block| block.target_mileage).sum(),
            taper_weeks,
            down_weeks: blocks.iter().filter(|block| block.is_down_week).count() as u32,
        }
    }
}
