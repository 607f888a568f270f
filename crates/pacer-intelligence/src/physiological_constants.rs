// ABOUTME: Empirical constants for VDOT modelling, periodization and adaptation
// ABOUTME: Defaults behind PlanningConfig; tuning values, not physiological laws
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants used throughout the planning engine.
//!
//! The Daniels-Gilbert coefficients are published regression values. Everything
//! under [`periodization`], [`taper`] and [`adaptation`] is empirical tuning and
//! can be overridden through [`PlanningConfig`](crate::config::PlanningConfig).

/// Daniels-Gilbert oxygen cost and drop-dead regression
///
/// Reference: Daniels, J. & Gilbert, J. (1979). Oxygen Power: Performance Tables for Distance Runners
pub mod vdot {
    /// Oxygen cost: VO2 = C + B·v + A·v², v in m/min
    pub const COST_A: f64 = 0.000_104;
    /// Linear velocity coefficient of the oxygen cost curve
    pub const COST_B: f64 = 0.182_258;
    /// Constant term of the oxygen cost curve
    pub const COST_C: f64 = -4.60;

    /// %VO2max sustainable for t minutes: P0 + P1·e^(K1·t) + P2·e^(K2·t)
    pub const PERCENT_BASE: f64 = 0.8;
    /// First exponential amplitude
    pub const PERCENT_P1: f64 = 0.189_439_3;
    /// First exponential decay rate (per minute)
    pub const PERCENT_K1: f64 = -0.012_778;
    /// Second exponential amplitude
    pub const PERCENT_P2: f64 = 0.298_955_8;
    /// Second exponential decay rate (per minute)
    pub const PERCENT_K2: f64 = -0.193_260_5;

    /// Lowest plausible VDOT
    pub const MIN_VDOT: f64 = 15.0;
    /// Highest plausible VDOT
    pub const MAX_VDOT: f64 = 85.0;
    /// Shortest distance accepted for VDOT estimation (meters)
    pub const MIN_DISTANCE_METERS: f64 = 1_500.0;

    /// %VO2max used to seed race-time prediction
    pub const PREDICTION_SEED_PERCENT: f64 = 0.80;
    /// Maximum refinement iterations for race-time prediction
    pub const PREDICTION_MAX_ITERATIONS: usize = 10;
    /// Convergence tolerance in VDOT units
    pub const PREDICTION_TOLERANCE: f64 = 0.1;
}

/// Target %VO2max per training zone
///
/// Reference: Daniels, J. (2013). Daniels' Running Formula (3rd ed.), Chapter 4
pub mod zone_percentages {
    /// Recovery running
    pub const RECOVERY: f64 = 0.62;
    /// Easy running (middle of the 59-74% band)
    pub const EASY: f64 = 0.68;
    /// Steady running
    pub const STEADY: f64 = 0.75;
    /// Marathon pace
    pub const MARATHON: f64 = 0.80;
    /// Tempo, between marathon and threshold
    pub const TEMPO: f64 = 0.84;
    /// Lactate threshold
    pub const THRESHOLD: f64 = 0.88;
    /// VO2max intervals
    pub const INTERVAL: f64 = 0.975;
}

/// Prediction confidence bands (fraction of predicted time)
pub mod prediction_bands {
    /// Recent race result
    pub const HIGH: f64 = 0.02;
    /// Older race or training effort
    pub const MEDIUM: f64 = 0.04;
    /// Stale or estimated source
    pub const LOW: f64 = 0.07;
    /// Race results younger than this are high confidence (days)
    pub const RECENT_RACE_DAYS: i64 = 56;
    /// Sources older than this are low confidence (days)
    pub const STALE_SOURCE_DAYS: i64 = 180;
}

/// Phase partition and mileage ramp
pub mod periodization {
    /// Minimum plan length in weeks
    pub const MIN_PLAN_WEEKS: u32 = 4;

    /// Conservative (base, build, peak) shares of the pre-taper weeks
    pub const CONSERVATIVE_RATIOS: [f64; 3] = [0.45, 0.35, 0.20];
    /// Moderate phase shares
    pub const MODERATE_RATIOS: [f64; 3] = [0.40, 0.40, 0.20];
    /// Aggressive phase shares
    pub const AGGRESSIVE_RATIOS: [f64; 3] = [0.30, 0.45, 0.25];

    /// Fraction of the requested peak the conservative plan reaches
    pub const CONSERVATIVE_PEAK_CEILING: f64 = 0.90;
    /// Fraction of the requested peak the moderate plan reaches
    pub const MODERATE_PEAK_CEILING: f64 = 0.95;
    /// Fraction of the requested peak the aggressive plan reaches
    pub const AGGRESSIVE_PEAK_CEILING: f64 = 1.0;

    /// Conservative plans insert a down week every third week
    pub const CONSERVATIVE_DOWN_WEEK_CADENCE: u32 = 3;
    /// Moderate and aggressive plans insert a down week every fourth week
    pub const DEFAULT_DOWN_WEEK_CADENCE: u32 = 4;
    /// Conservative down-week mileage reduction
    pub const CONSERVATIVE_DOWN_WEEK_REDUCTION: f64 = 0.30;
    /// Moderate down-week mileage reduction
    pub const MODERATE_DOWN_WEEK_REDUCTION: f64 = 0.25;
    /// Aggressive down-week mileage reduction
    pub const AGGRESSIVE_DOWN_WEEK_REDUCTION: f64 = 0.20;

    /// Long run as a fraction of weekly mileage
    pub const LONG_RUN_FRACTION: f64 = 0.30;
    /// Long-run cap for races up to 10K (miles)
    pub const LONG_RUN_CAP_SHORT: u32 = 12;
    /// Long-run cap for races up to the half marathon (miles)
    pub const LONG_RUN_CAP_HALF: u32 = 15;
    /// Long-run cap for the marathon and beyond (miles)
    pub const LONG_RUN_CAP_MARATHON: u32 = 22;

    /// Default quality sessions per week when the caller gives none
    pub const DEFAULT_QUALITY_SESSIONS: u8 = 2;
    /// Quality sessions allowed in base weeks
    pub const BASE_QUALITY_CAP: u8 = 1;
    /// Quality sessions allowed in taper weeks
    pub const TAPER_QUALITY_CAP: u8 = 1;
    /// Quality sessions allowed in down weeks
    pub const DOWN_WEEK_QUALITY_CAP: u8 = 1;
    /// Absolute cap on weekly quality sessions
    pub const MAX_QUALITY_SESSIONS: u8 = 3;

    /// Intermediate races at least this long earn a recovery block (meters)
    pub const RECOVERY_BLOCK_MIN_RACE_METERS: f64 = 21_000.0;
}

/// Taper shape
///
/// Reference: Mujika, I. & Padilla, S. (2003). Scientific bases for precompetition tapering strategies
pub mod taper {
    /// Conservative weekly fractions of peak mileage, earliest taper week first
    pub const CONSERVATIVE_FRACTIONS: [f64; 3] = [0.80, 0.60, 0.35];
    /// Moderate weekly fractions
    pub const MODERATE_FRACTIONS: [f64; 3] = [0.75, 0.50, 0.25];
    /// Aggressive weekly fractions
    pub const AGGRESSIVE_FRACTIONS: [f64; 3] = [0.70, 0.45, 0.25];

    /// Taper weeks for races up to 10K
    pub const SHORT_RACE_WEEKS: u32 = 1;
    /// Taper weeks for races up to the half marathon
    pub const HALF_MARATHON_WEEKS: u32 = 2;
    /// Taper weeks for the marathon and beyond
    pub const MARATHON_WEEKS: u32 = 3;
}

/// Fitness assessment windows
pub mod fitness {
    /// Trailing window for mileage aggregation (days)
    pub const ASSESSMENT_WINDOW_DAYS: i64 = 28;
    /// Trailing window for best-effort VDOT search (days)
    pub const BEST_EFFORT_WINDOW_DAYS: i64 = 120;
    /// Suggested peak as a multiple of current weekly mileage
    pub const PEAK_MILEAGE_MULTIPLIER: f64 = 1.3;
    /// Runs in the window needed for high confidence
    pub const HIGH_CONFIDENCE_RUNS: usize = 12;
    /// Runs in the window needed for medium confidence
    pub const MEDIUM_CONFIDENCE_RUNS: usize = 6;
    /// Latest run must be this recent for high confidence (days)
    pub const RECENT_RUN_DAYS: i64 = 7;
    /// Runs per week assumed when the athlete declared none
    pub const DEFAULT_RUNS_PER_WEEK: u8 = 4;
}

/// RPE-feedback adaptation
pub mod adaptation {
    /// Trailing window of completed workouts considered (days)
    pub const WINDOW_DAYS: i64 = 21;
    /// RPE at or above which a quality session counts as too hard
    pub const HIGH_RPE: f64 = 8.0;
    /// RPE at or below which a quality session counts as comfortable
    pub const COMFORTABLE_RPE: f64 = 5.0;
    /// Average easy-run RPE at or above which easy days run too hot
    pub const EASY_RUN_FATIGUE_RPE: f64 = 6.0;
    /// Comfortable quality streak that permits progression
    pub const PROGRESSION_STREAK: usize = 3;
}

/// Effort classification
pub mod classification {
    /// Two nearest zones closer than this (s/mi) resolve to the harder zone
    pub const TIE_TOLERANCE_SECONDS: f64 = 3.0;
}
