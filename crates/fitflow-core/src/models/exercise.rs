// ABOUTME: Exercise candidate model produced by the model or the fallback table
// ABOUTME: Carries prescription fields and optional equipment used by preference filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// One exercise in a workout
///
/// Immutable once filtered: the post-processor only keeps, drops, or appends
/// candidates and never edits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCandidate {
    /// Exercise name, the only field the lexical filters inspect
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetitions, free text such as "8-12" or "30 seconds"
    pub reps: String,
    /// Load, free text such as "Bodyweight" or "Moderate"
    pub weight: String,
    /// Short coaching description
    pub description: String,
    /// Equipment the exercise needs; empty means unknown or none
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment: Vec<String>,
}

impl ExerciseCandidate {
    /// Create an exercise without equipment requirements
    pub fn new(
        name: impl Into<String>,
        sets: u32,
        reps: impl Into<String>,
        weight: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sets,
            reps: reps.into(),
            weight: weight.into(),
            description: description.into(),
            equipment: Vec::new(),
        }
    }

    /// Attach required equipment
    #[must_use]
    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment = equipment.into_iter().map(Into::into).collect();
        self
    }

    /// Lowercased name used by all case-insensitive matching
    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Case-insensitive name comparison
    #[must_use]
    pub fn same_name_as(&self, other: &Self) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.name.trim())
    }
}
