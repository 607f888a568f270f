// ABOUTME: Argument parsers for pacer-cli
// ABOUTME: Finish times in clock notation and prediction confidence names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pacer_core::models::PredictionConfidence;

/// Parse `ss`, `m:ss` or `h:mm:ss` into seconds
pub fn parse_time(raw: &str) -> Result<f64, String> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.len() > 3 {
        return Err(format!("Invalid time '{raw}': expected ss, m:ss or h:mm:ss"));
    }

    parts.iter().try_fold(0.0, |total, part| {
        part.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .map(|value| total * 60.0 + value)
            .ok_or_else(|| format!("Invalid time '{raw}': '{part}' is not a number"))
    })
}

/// Parse a confidence level name
pub fn parse_confidence(raw: &str) -> Result<PredictionConfidence, String> {
    match raw.to_lowercase().as_str() {
        "high" => Ok(PredictionConfidence::High),
        "medium" => Ok(PredictionConfidence::Medium),
        "low" => Ok(PredictionConfidence::Low),
        other => Err(format!(
            "Unknown confidence: '{other}'. Valid options: high, medium, low"
        )),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_time() {
        assert!((parse_time("95").unwrap() - 95.0).abs() < f64::EPSILON);
        assert!((parse_time("20:00").unwrap() - 1_200.0).abs() < f64::EPSILON);
        assert!((parse_time("1:30:15").unwrap() - 5_415.0).abs() < f64::EPSILON);
        assert!(parse_time("1:2:3:4").is_err());
        assert!(parse_time("20:xx").is_err());
    }

    #[test]
    fn test_parse_confidence() {
        assert_eq!(parse_confidence("HIGH").unwrap(), PredictionConfidence::High);
        assert!(parse_confidence("certain").is_err());
    }
}
