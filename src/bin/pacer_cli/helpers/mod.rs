// ABOUTME: Helper modules for pacer-cli
// ABOUTME: JSON file input, JSON output and argument parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod io;
pub mod parse;
