// ABOUTME: Effort classification command for pacer-cli
// ABOUTME: Classifies logged splits and compares them with the planned workout type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use pacer::config::ServiceConfig;
use pacer_core::errors::AppResult;
use pacer_core::models::{AthleteProfile, Split, WorkoutType};
use pacer_intelligence::{
    assess_execution, summarize_efforts, ClassificationContext, EffortClassifier,
};
use serde::Deserialize;
use serde_json::json;

use crate::helpers::io::{print_json, read_json};

/// Classification input file
#[derive(Deserialize)]
struct ClassifyInput {
    splits: Vec<Split>,
    #[serde(default)]
    context: ClassificationContext,
    #[serde(default)]
    planned_type: Option<WorkoutType>,
    #[serde(default)]
    profile: AthleteProfile,
}

/// Classify splits and print categories, summary and plan-vs-actual verdict
pub async fn classify(config: &ServiceConfig, input: &Path) -> AppResult<()> {
    let input: ClassifyInput = read_json(input).await?;
    let context = ClassificationContext {
        conditions: input.context.conditions.for_athlete(&input.profile),
        ..input.context
    };

    let classification =
        EffortClassifier::new(&config.planning).classify(&input.splits, &context);
    let summary = summarize_efforts(&classification.splits);
    let assessment = input
        .planned_type
        .and_then(|planned| assess_execution(planned, &summary));

    print_json(&json!({
        "classification": classification,
        "summary": summary,
        "assessment": assessment,
    }))
}
