// ABOUTME: Pace model commands for pacer-cli
// ABOUTME: VDOT from a result, training zones and race predictions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacer::config::ServiceConfig;
use pacer_core::errors::{AppError, AppResult};
use pacer_core::models::PredictionConfidence;
use pacer_intelligence::{format_duration, format_pace, PaceModel};
use serde_json::json;
use tracing::info;

use crate::helpers::io::print_json;
use crate::helpers::parse::parse_time;

fn checked_vdot(vdot: f64) -> AppResult<f64> {
    if PaceModel::is_plausible(vdot) {
        Ok(vdot)
    } else {
        Err(AppError::invalid_input(format!(
            "VDOT {vdot} is outside the plausible range"
        )))
    }
}

/// VDOT and zones from a race result
pub fn vdot(config: &ServiceConfig, distance_meters: f64, time: &str) -> AppResult<()> {
    let seconds = parse_time(time).map_err(AppError::invalid_input)?;
    let vdot = PaceModel::calculate_vdot(distance_meters, seconds).ok_or_else(|| {
        AppError::invalid_input(format!(
            "No plausible VDOT for {distance_meters} m in {}",
            format_duration(seconds)
        ))
    })?;
    info!(distance_meters, seconds, vdot, "Calculated VDOT");

    let zones = PaceModel::new(&config.planning).calculate_pace_zones(vdot);
    print_json(&json!({
        "vdot": (vdot * 10.0).round() / 10.0,
        "zones": zones,
    }))
}

/// Training zones for a VDOT, with formatted paces
pub fn zones(config: &ServiceConfig, vdot: f64) -> AppResult<()> {
    let vdot = checked_vdot(vdot)?;
    let zones = PaceModel::new(&config.planning)
        .calculate_pace_zones(vdot)
        .ok_or_else(|| AppError::invalid_input(format!("No zones for VDOT {vdot}")))?;

    print_json(&json!({
        "vdot": vdot,
        "zones": zones,
        "formatted": {
            "recovery": format_pace(zones.recovery),
            "easy": format_pace(zones.easy),
            "steady": format_pace(zones.steady),
            "marathon": format_pace(zones.marathon),
            "tempo": format_pace(zones.tempo),
            "threshold": format_pace(zones.threshold),
            "interval": format_pace(zones.interval),
        },
    }))
}

/// Race predictions for the standard distances
pub fn predict(
    config: &ServiceConfig,
    vdot: f64,
    confidence: PredictionConfidence,
) -> AppResult<()> {
    let vdot = checked_vdot(vdot)?;
    let predictions: Vec<_> = PaceModel::new(&config.planning)
        .predict_race_times(vdot, confidence)
        .into_iter()
        .map(|prediction| {
            json!({
                "distance_meters": prediction.distance_meters,
                "time": format_duration(prediction.seconds),
                "range": [
                    format_duration(prediction.range.min),
                    format_duration(prediction.range.max),
                ],
                "prediction": prediction,
            })
        })
        .collect();

    print_json(&predictions)
}
