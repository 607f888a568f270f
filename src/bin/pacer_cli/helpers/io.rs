// ABOUTME: JSON input and output helpers for pacer-cli
// ABOUTME: Reads request files asynchronously and pretty-prints results to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use pacer_core::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::debug;

/// Read and deserialize a JSON file
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let raw = fs::read_to_string(path).await.map_err(|e| {
        AppError::invalid_input(format!("Cannot read {}: {e}", path.display()))
    })?;
    debug!(path = %path.display(), bytes = raw.len(), "Read input file");
    serde_json::from_str(&raw).map_err(|e| {
        AppError::invalid_input(format!("Invalid JSON in {}: {e}", path.display()))
    })
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write;

    use pacer_core::errors::ErrorCode;
    use pacer_core::models::Split;
    use tempfile::NamedTempFile;

    use super::*;

    #[tokio::test]
    async fn test_read_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"distance_miles": 1.0, "moving_time_seconds": 480.0}}]"#).unwrap();

        let splits: Vec<Split> = read_json(file.path()).await.unwrap();

        assert_eq!(splits.len(), 1);
        assert!((splits[0].pace_seconds_per_mile().unwrap() - 480.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_read_json_rejects_bad_input() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let invalid = read_json::<Vec<Split>>(file.path()).await.unwrap_err();
        assert_eq!(invalid.code, ErrorCode::InvalidInput);

        let missing = read_json::<Vec<Split>>(Path::new("/nonexistent/pacer/input.json"))
            .await
            .unwrap_err();
        assert!(missing.message.contains("Cannot read"));
    }
}
