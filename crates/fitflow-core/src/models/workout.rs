// ABOUTME: Workout model returned to callers of the generation pipeline
// ABOUTME: Holds the deterministic muscle list and the filtered exercise list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ExerciseCandidate, MuscleGroup};

/// A generated workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    /// Workout title
    pub name: String,
    /// Targeted muscle groups
    #[serde(default)]
    pub muscles: Vec<MuscleGroup>,
    /// Exercises in execution order
    #[serde(default)]
    pub exercises: Vec<ExerciseCandidate>,
    /// Short summary of the session
    #[serde(default)]
    pub description: String,
}

impl Workout {
    /// Number of exercises
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    /// Whether an exercise with the same name (case-insensitive) is present
    #[must_use]
    pub fn contains_exercise(&self, candidate: &ExerciseCandidate) -> bool {
        self.exercises.iter().any(|e| e.same_name_as(candidate))
    }
}
