// ABOUTME: Persistence contract for macro plans and generated workouts, keyed by race identifier
// ABOUTME: Async PlanStore trait plus a DashMap-backed in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plan storage
//!
//! Blocks and workouts are stored exactly as the generators produce them.
//! A plan is replaced wholesale: replacing drops every block and workout of
//! the race before the new blocks are written.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use pacer_core::errors::{AppError, AppResult};
use pacer_core::models::{MacroPlan, PlannedWorkout};
use tracing::debug;

/// Storage for plans and their workouts
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Delete the race's blocks and workouts, then store `plan`
    async fn replace_plan(&self, plan: &MacroPlan) -> AppResult<()>;

    /// Stored plan for a race
    async fn load_plan(&self, race_id: &str) -> AppResult<Option<MacroPlan>>;

    /// Week numbers that already have workouts
    async fn populated_weeks(&self, race_id: &str) -> AppResult<BTreeSet<u32>>;

    /// Store workouts per week, replacing any already stored for those weeks
    async fn save_workouts(
        &self,
        race_id: &str,
        workouts: &BTreeMap<u32, Vec<PlannedWorkout>>,
    ) -> AppResult<()>;

    /// Workouts stored for one week
    async fn load_workouts(&self, race_id: &str, week_number: u32)
        -> AppResult<Vec<PlannedWorkout>>;
}

#[derive(Debug, Clone)]
struct StoredPlan {
    plan: MacroPlan,
    workouts: BTreeMap<u32, Vec<PlannedWorkout>>,
}

/// In-memory store for tests and the command-line tool
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlanStore {
    plans: Arc<DashMap<String, StoredPlan>>,
}

impl InMemoryPlanStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans
    #[must_use]
    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn replace_plan(&self, plan: &MacroPlan) -> AppResult<()> {
        let previous = self.plans.insert(
            plan.race_id.clone(),
            StoredPlan {
                plan: plan.clone(),
                workouts: BTreeMap::new(),
            },
        );
        debug!(
            race_id = %plan.race_id,
            blocks = plan.blocks.len(),
            replaced = previous.is_some(),
            "Stored macro plan"
        );
        Ok(())
    }

    async fn load_plan(&self, race_id: &str) -> AppResult<Option<MacroPlan>> {
        Ok(self.plans.get(race_id).map(|stored| stored.plan.clone()))
    }

    async fn populated_weeks(&self, race_id: &str) -> AppResult<BTreeSet<u32>> {
        Ok(self
            .plans
            .get(race_id)
            .map(|stored| stored.workouts.keys().copied().collect())
            .unwrap_or_default())
    }

    async fn save_workouts(
        &self,
        race_id: &str,
        workouts: &BTreeMap<u32, Vec<PlannedWorkout>>,
    ) -> AppResult<()> {
        let mut stored = self
            .plans
            .get_mut(race_id)
            .ok_or_else(|| AppError::not_found(format!("Plan for race {race_id}")))?;

        if let Some(week) = workouts
            .keys()
            .find(|week| stored.plan.block(**week).is_none())
        {
            return Err(AppError::invalid_input(format!(
                "Week {week} is not part of the plan for race {race_id}"
            )));
        }

        for (week, list) in workouts {
            stored.workouts.insert(*week, list.clone());
        }
        debug!(race_id, weeks = workouts.len(), "Stored window workouts");
        Ok(())
    }

    async fn load_workouts(
        &self,
        race_id: &str,
        week_number: u32,
    ) -> AppResult<Vec<PlannedWorkout>> {
        Ok(self
            .plans
            .get(race_id)
            .and_then(|stored| stored.workouts.get(&week_number).cloned())
            .unwrap_or_default())
    }
}
