// ABOUTME: Workout generation pipeline from user prompt to filtered workout
// ABOUTME: Prompt construction, model output parsing, and the generation service with fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Chat request construction for workout prompts
pub mod prompt_builder;
/// Tolerant parsing of model output into workouts
pub mod response_parser;
/// Generation service with fallback handling
pub mod service;

pub use prompt_builder::{preference_context, user_message, WorkoutPromptBuilder};
pub use response_parser::parse_workout_response;
pub use service::{FallbackReason, WorkoutGenerator, WorkoutOutcome, WorkoutSource};
