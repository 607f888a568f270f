// ABOUTME: Plan generation commands for pacer-cli
// ABOUTME: Runs the planning service over an in-memory store and prints plans and windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;
use std::sync::Arc;

use pacer::config::ServiceConfig;
use pacer::services::{PlanRequest, PlanService, WindowRequest};
use pacer::store::InMemoryPlanStore;
use pacer_core::errors::AppResult;
use serde_json::json;
use tracing::info;

use crate::helpers::io::{print_json, read_json};

fn service(config: ServiceConfig) -> PlanService<InMemoryPlanStore> {
    PlanService::new(Arc::new(InMemoryPlanStore::new()), config)
}

/// Generate and print a macro plan
pub async fn plan(config: ServiceConfig, input: &Path) -> AppResult<()> {
    let request: PlanRequest = read_json(input).await?;
    let plan = service(config).regenerate_plan(&request).await?;
    print_json(&plan)
}

/// Generate a plan, then populate `count` consecutive windows
pub async fn window(
    config: ServiceConfig,
    plan_input: &Path,
    window_input: &Path,
    count: u32,
) -> AppResult<()> {
    let plan_request: PlanRequest = read_json(plan_input).await?;
    let window_request: WindowRequest = read_json(window_input).await?;

    let service = service(config);
    let plan = service.regenerate_plan(&plan_request).await?;

    let mut windows = Vec::new();
    for index in 0..count.max(1) {
        let window = service.populate_next_window(&window_request).await?;
        if window.workouts.is_empty() {
            info!(index, "Every block is populated");
            break;
        }
        windows.push(window);
    }

    print_json(&json!({
        "summary": plan.summary,
        "race_prediction": plan.race_prediction,
        "windows": windows,
    }))
}
