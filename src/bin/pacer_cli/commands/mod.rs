// ABOUTME: Re-exports command modules for pacer-cli
// ABOUTME: Pace model, plan generation and effort classification commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod classify;
pub mod pace;
pub mod plan;
