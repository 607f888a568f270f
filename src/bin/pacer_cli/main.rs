// ABOUTME: Pacer CLI - command-line front end for the training-plan engine
// ABOUTME: Computes VDOT, zones and predictions, and generates plans, windows and effort classifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # VDOT and training zones from a 5K in 20:00
//! pacer-cli vdot --distance 5000 --time 20:00
//!
//! # Training zones for a VDOT
//! pacer-cli zones --vdot 50
//!
//! # Race predictions for a VDOT
//! pacer-cli predict --vdot 50 --confidence high
//!
//! # Macro plan from a JSON plan request
//! pacer-cli plan --input plan_request.json
//!
//! # Plan plus the first two rolling windows
//! pacer-cli window --plan plan_request.json --window window_request.json --count 2
//!
//! # Classify logged splits
//! pacer-cli classify --input splits.json
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pacer::config::ServiceConfig;
use pacer_core::models::PredictionConfidence;
use tracing::debug;

use helpers::parse::parse_confidence;

#[derive(Parser)]
#[command(
    name = "pacer-cli",
    about = "Pacer training-plan engine CLI",
    long_about = "Command-line front end for VDOT, pace zones, periodized plans, rolling workout windows and split effort classification. Results are printed as JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (written to stderr)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// VDOT and zones from a race result
    Vdot {
        /// Race distance in meters
        #[arg(long)]
        distance: f64,

        /// Finish time as seconds, m:ss or h:mm:ss
        #[arg(long)]
        time: String,
    },

    /// Training pace zones for a VDOT
    Zones {
        /// VDOT
        #[arg(long)]
        vdot: f64,
    },

    /// Race predictions for the standard distances
    Predict {
        /// VDOT
        #[arg(long)]
        vdot: f64,

        /// Confidence in the VDOT source (high, medium, low)
        #[arg(long, default_value = "medium", value_parser = parse_confidence)]
        confidence: PredictionConfidence,
    },

    /// Generate a macro plan from a JSON plan request
    Plan {
        /// Plan request file
        #[arg(long, short = 'i')]
        input: PathBuf,
    },

    /// Generate a plan and populate rolling workout windows
    Window {
        /// Plan request file
        #[arg(long)]
        plan: PathBuf,

        /// Window request file
        #[arg(long)]
        window: PathBuf,

        /// Number of consecutive windows to populate
        #[arg(long, default_value = "1")]
        count: u32,
    },

    /// Classify split efforts from a JSON file
    Classify {
        /// Classification input file
        #[arg(long, short = 'i')]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ServiceConfig::from_env()?;
    config.logging().for_cli(cli.verbose).init()?;
    debug!(window_blocks = config.window_blocks, "Pacer CLI starting");

    match cli.command {
        Command::Vdot { distance, time } => commands::pace::vdot(&config, distance, &time)?,
        Command::Zones { vdot } => commands::pace::zones(&config, vdot)?,
        Command::Predict { vdot, confidence } => {
            commands::pace::predict(&config, vdot, confidence)?;
        }
        Command::Plan { input } => commands::plan::plan(config, &input).await?,
        Command::Window {
            plan,
            window,
            count,
        } => commands::plan::window(config, &plan, &window, count).await?,
        Command::Classify { input } => commands::classify::classify(&config, &input).await?,
    }

    Ok(())
}
