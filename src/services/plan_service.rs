// ABOUTME: Plan regeneration under a per-race lock and rolling population of the next workout window
// ABOUTME: Applies the fitness fallback before generation and persists results through PlanStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::NaiveDate;
use dashmap::DashMap;
use pacer_core::errors::{AppError, AppResult};
use pacer_core::models::{
    AthleteProfile, CompletedWorkoutSummary, MacroPlan, PlanAggressiveness, PredictionConfidence,
    Race, WorkoutRecord,
};
use pacer_intelligence::window::select_window;
use pacer_intelligence::{
    create_weekly_structure, DeclaredSettings, FitnessAssessment, MacroPlanGenerator, PaceModel,
    PaceZones, PlanError, PlanGenerationInput, StructurePreferences, WindowGenerationInput,
    WindowGenerator, WindowPlan,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::store::PlanStore;

/// Request to (re)generate a race's macro plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Goal race
    pub race: Option<Race>,
    /// First day of week 1
    pub start_date: NaiveDate,
    /// Workout history for fitness assessment
    #[serde(default)]
    pub history: Vec<WorkoutRecord>,
    /// Settings the athlete declared
    #[serde(default)]
    pub settings: DeclaredSettings,
    /// Weekly structure preferences
    #[serde(default)]
    pub preferences: StructurePreferences,
    /// How hard the plan pushes; service default when absent
    #[serde(default)]
    pub aggressiveness: Option<PlanAggressiveness>,
    /// B/C races before the goal race
    #[serde(default)]
    pub intermediate_races: Vec<Race>,
    /// Athlete profile snapshot
    #[serde(default)]
    pub profile: AthleteProfile,
    /// Known VDOT; estimated from history when absent
    #[serde(default)]
    pub vdot: Option<f64>,
}

/// Request to populate the next workout window of a race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRequest {
    /// Goal race
    pub race: Race,
    /// Date of generation
    pub as_of: NaiveDate,
    /// Weekly structure preferences
    #[serde(default)]
    pub preferences: StructurePreferences,
    /// Athlete profile snapshot
    #[serde(default)]
    pub profile: AthleteProfile,
    /// B/C races
    #[serde(default)]
    pub intermediate_races: Vec<Race>,
    /// Completed workouts for adaptation
    #[serde(default)]
    pub recent_workouts: Vec<CompletedWorkoutSummary>,
    /// Explicit zones
    #[serde(default)]
    pub zones: Option<PaceZones>,
    /// VDOT for zones and race pace
    #[serde(default)]
    pub vdot: Option<f64>,
}

/// Coordinates generators and storage
pub struct PlanService<S: PlanStore> {
    store: Arc<S>,
    config: ServiceConfig,
    macro_generator: MacroPlanGenerator,
    window_generator: WindowGenerator,
    assessment: FitnessAssessment,
    pace_model: PaceModel,
    race_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: PlanStore> PlanService<S> {
    /// Service over `store`
    #[must_use]
    pub fn new(store: Arc<S>, config: ServiceConfig) -> Self {
        Self {
            macro_generator: MacroPlanGenerator::new(&config.planning),
            window_generator: WindowGenerator::new(&config.planning),
            assessment: FitnessAssessment::new(&config.planning),
            pace_model: PaceModel::new(&config.planning),
            store,
            config,
            race_locks: DashMap::new(),
        }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn race_lock(&self, race_id: &str) -> Arc<Mutex<()>> {
        self.race_locks
            .entry(race_id.to_owned())
            .or_default()
            .clone()
    }

    /// Drop the race's lock once only the map holds it
    fn release_race_lock(&self, race_id: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.race_locks
            .remove_if(race_id, |_, held| Arc::strong_count(held) == 1);
    }

    fn estimate_vdot(&self, request: &PlanRequest) -> (Option<f64>, Option<PredictionConfidence>) {
        self.assessment
            .best_recent_vdot(&request.history, request.start_date)
            .map_or((None, None), |estimate| {
                let confidence = self
                    .pace_model
                    .confidence_from_source(estimate.age_days, estimate.is_race);
                (Some(estimate.vdot), Some(confidence))
            })
    }

    /// Macro-plan input from a request, with fitness fallback and VDOT estimation
    ///
    /// # Errors
    ///
    /// Returns `MissingSettings` when history has no signal and no weekly
    /// mileage was declared
    pub fn build_plan_input(
        &self,
        request: &PlanRequest,
    ) -> Result<PlanGenerationInput, PlanError> {
        let fitness = self
            .assessment
            .assess_current_fitness(&request.history, request.start_date);
        let fitness = self.assessment.apply_fallback(fitness, &request.settings)?;

        let (vdot, vdot_confidence) = request
            .vdot
            .filter(|vdot| PaceModel::is_plausible(*vdot))
            .map_or_else(|| self.estimate_vdot(request), |vdot| (Some(vdot), None));

        let current = fitness.typical_weekly_mileage.round() as u32;
        let peak = request
            .settings
            .peak_weekly_mileage
            .unwrap_or(fitness.suggested_peak_mileage)
            .max(current)
            .max(1);
        let runs_per_week = request
            .settings
            .runs_per_week
            .unwrap_or_else(|| fitness.runs_per_week.round().clamp(1.0, 7.0) as u8);

        debug!(
            current_mileage = current,
            peak_mileage = peak,
            runs_per_week,
            confidence = ?fitness.confidence,
            vdot = ?vdot,
            "Resolved plan inputs"
        );

        Ok(PlanGenerationInput {
            race: request.race.clone(),
            start_date: request.start_date,
            current_weekly_mileage: current,
            peak_weekly_mileage: peak,
            runs_per_week,
            quality_sessions_per_week: Some(request.preferences.quality_sessions_per_week),
            aggressiveness: request
                .aggressiveness
                .unwrap_or(self.config.default_aggressiveness),
            intermediate_races: request.intermediate_races.clone(),
            profile: request.profile.clone(),
            vdot,
            vdot_confidence,
        })
    }

    /// Destructively regenerate a race's plan
    ///
    /// Regenerations of the same race are serialized; different races run
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns the planning error for invalid input, or a storage error
    pub async fn regenerate_plan(&self, request: &PlanRequest) -> AppResult<MacroPlan> {
        let race = request.race.as_ref().ok_or(PlanError::MissingRace)?;
        let lock = self.race_lock(&race.id);
        let result = {
            let _guard = lock.lock().await;
            self.regenerate_locked(request).await
        };
        self.release_race_lock(&race.id, lock);
        result
    }

    async fn regenerate_locked(&self, request: &PlanRequest) -> AppResult<MacroPlan> {
        let input = self.build_plan_input(request)?;
        let plan = self.macro_generator.generate(&input)?;
        self.store.replace_plan(&plan).await?;

        info!(
            race_id = %plan.race_id,
            weeks = plan.summary.total_weeks,
            runs_per_week = plan.runs_per_week,
            "Regenerated plan"
        );
        Ok(plan)
    }

    /// Generate and store workouts for the next unpopulated blocks
    ///
    /// Returns an empty window once every block is populated.
    ///
    /// # Errors
    ///
    /// Returns not-found when the race has no plan, or a storage error
    pub async fn populate_next_window(&self, request: &WindowRequest) -> AppResult<WindowPlan> {
        let lock = self.race_lock(&request.race.id);
        let result = {
            let _guard = lock.lock().await;
            self.populate_locked(request).await
        };
        self.release_race_lock(&request.race.id, lock);
        result
    }

    async fn populate_locked(&self, request: &WindowRequest) -> AppResult<WindowPlan> {
        let Some(macro_plan) = self.store.load_plan(&request.race.id).await? else {
            return Err(AppError::not_found(format!(
                "Plan for race {}",
                request.race.id
            )));
        };
        let populated = self.store.populated_weeks(&request.race.id).await?;
        let window = select_window(&macro_plan.blocks, &populated, self.config.window_blocks);

        // Lay weeks out for the run count the plan was sized for
        let preferences = StructurePreferences {
            runs_per_week: macro_plan.runs_per_week,
            ..request.preferences.clone()
        };

        let zones = request.zones.or_else(|| {
            request
                .vdot
                .and_then(|vdot| self.pace_model.calculate_pace_zones(vdot))
        });
        let input = WindowGenerationInput {
            blocks: window,
            structure: create_weekly_structure(&preferences),
            zones,
            vdot: request.vdot,
            profile: request.profile.clone(),
            goal_race: request.race.clone(),
            intermediate_races: request.intermediate_races.clone(),
            recent_workouts: request.recent_workouts.clone(),
            as_of: request.as_of,
        };

        let plan = self.window_generator.generate(&input);
        self.store
            .save_workouts(&request.race.id, &plan.workouts)
            .await?;

        info!(
            race_id = %request.race.id,
            weeks = ?plan.workouts.keys().collect::<Vec<_>>(),
            already_populated = populated.len(),
            "Populated workout window"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pacer_core::models::RacePriority;

    use super::*;
    use crate::store::InMemoryPlanStore;

    fn request(race_id: &str) -> PlanRequest {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        PlanRequest {
            race: Some(Race {
                id: race_id.to_owned(),
                name: "Spring 10K".to_owned(),
                date: NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
                distance_meters: 10_000.0,
                priority: RacePriority::A,
                goal_time_seconds: None,
            }),
            start_date: start,
            history: Vec::new(),
            settings: DeclaredSettings {
                weekly_mileage: Some(20),
                peak_weekly_mileage: Some(30),
                runs_per_week: Some(4),
            },
            preferences: StructurePreferences::default(),
            aggressiveness: None,
            intermediate_races: Vec::new(),
            profile: AthleteProfile::default(),
            vdot: None,
        }
    }

    #[tokio::test]
    async fn test_race_locks_released_after_use() {
        let service = PlanService::new(
            Arc::new(InMemoryPlanStore::new()),
            ServiceConfig::default(),
        );

        for race_id in ["r1", "r2", "r3"] {
            service.regenerate_plan(&request(race_id)).await.unwrap();
        }
        assert!(service.race_locks.is_empty());

        let missing = PlanRequest {
            start_date: NaiveDate::from_ymd_opt(2025, 2, 24).unwrap(),
            ..request("r4")
        };
        assert!(service.regenerate_plan(&missing).await.is_err());
        assert!(service.race_locks.is_empty());
    }
}
