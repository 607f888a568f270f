// ABOUTME: Unit conversion factors and standard race distances
// ABOUTME: Shared by the pace model, plan generator and effort classifier
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Distance and time unit conversions
pub mod units {
    /// Meters in one statute mile
    pub const METERS_PER_MILE: f64 = 1_609.344;

    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Days per training week
    pub const DAYS_PER_WEEK: i64 = 7;
}

/// Standard race distances in meters
pub mod race_distances {
    /// 5 kilometers
    pub const FIVE_K: f64 = 5_000.0;
    /// 10 kilometers
    pub const TEN_K: f64 = 10_000.0;
    /// Half marathon
    pub const HALF_MARATHON: f64 = 21_097.5;
    /// Marathon
    pub const MARATHON: f64 = 42_195.0;
}

/// Convert meters to miles
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters / units::METERS_PER_MILE
}

/// Convert miles to meters
#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * units::METERS_PER_MILE
}

/// Round a distance to the nearest half mile
#[must_use]
pub fn round_half_mile(miles: f64) -> f64 {
    (miles * 2.0).round() / 2.0
}
