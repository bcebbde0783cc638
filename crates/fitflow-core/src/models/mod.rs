// ABOUTME: Workout domain models shared by the rule engine and the HTTP service
// ABOUTME: Re-exports MuscleGroup, ExerciseCandidate, Workout, and Preferences
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! All models are request-scoped: built for one prompt-to-workout call and
//! discarded afterwards. Nothing here is persisted.
//!
//! - `MuscleGroup`: the six filtering tags
//! - `RequestedMuscleSet`: ordered, deduplicated tags detected from one prompt
//! - `ExerciseCandidate`: one exercise produced by the model or the fallback table
//! - `Workout`: the workout object returned to callers
//! - `Preferences`: user-supplied exclusions, equipment, and injuries

mod exercise;
mod muscle;
mod preferences;
mod workout;

pub use exercise::ExerciseCandidate;
pub use muscle::{MuscleGroup, RequestedMuscleSet};
pub use preferences::Preferences;
pub use workout::Workout;
