// ABOUTME: Deterministic fallback workouts and top-ups from the static exercise table
// ABOUTME: Used when the model is unavailable or filtering starves its workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitflow_core::constants::post_processing::{
    FALLBACK_EXERCISE_CAP, FOCUSED_WORKOUT_SUFFIX, GENERIC_WORKOUT_NAME, MAX_MUSCLES_IN_NAME,
};
use fitflow_core::models::{
    ExerciseCandidate, MuscleGroup, Preferences, RequestedMuscleSet, Workout,
};
use tracing::{debug, info};

use crate::preferences::PreferenceFilter;
use crate::ruleset::Ruleset;

/// Builds fallback workouts from the ruleset's catalog
#[derive(Debug, Clone, Copy)]
pub struct FallbackExerciseSelector<'a> {
    ruleset: &'a Ruleset,
    exercise_cap: usize,
}

impl<'a> FallbackExerciseSelector<'a> {
    /// Create a selector with the default exercise cap
    #[must_use]
    pub const fn new(ruleset: &'a Ruleset) -> Self {
        Self {
            ruleset,
            exercise_cap: FALLBACK_EXERCISE_CAP,
        }
    }

    /// Override the maximum number of exercises in a fallback workout
    #[must_use]
    pub const fn with_exercise_cap(mut self, exercise_cap: usize) -> Self {
        self.exercise_cap = exercise_cap;
        self
    }

    /// Build a complete workout for a prompt without calling the model
    #[must_use]
    pub fn select_fallback(&self, prompt: &str, preferences: &Preferences) -> Workout {
        let requested = self.ruleset.classifier().classify(prompt);
        self.select_for(&requested, preferences)
    }

    /// Build a complete workout for an already classified request
    ///
    /// Table exercises are interleaved across the requested groups and pass
    /// through the same relevance and preference filters as model output. When
    /// nothing is requested, or the filters leave nothing, the default
    /// full-body set is used with preference filters still applied.
    #[must_use]
    pub fn select_for(&self, requested: &RequestedMuscleSet, preferences: &Preferences) -> Workout {
        let filter = self.ruleset.preference_filter(preferences);

        let mut exercises = Vec::new();
        if !requested.is_empty() {
            self.top_up_with(&mut exercises, requested, &filter, self.exercise_cap);
        }

        let muscles = if exercises.is_empty() {
            self.defaults(&filter, &mut exercises)
        } else {
            requested.as_slice().to_vec()
        };

        info!(
            muscles = ?muscles,
            exercise_count = exercises.len(),
            "Built fallback workout"
        );

        Workout {
            name: workout_name(&muscles),
            description: workout_description(&muscles),
            muscles,
            exercises,
        }
    }

    /// Append table exercises until `target` is reached or candidates run out
    ///
    /// Candidates are taken round-robin across the requested groups, skipping
    /// names already present and anything the relevance or preference filters
    /// reject. Returns how many exercises were added.
    pub fn top_up(
        &self,
        exercises: &mut Vec<ExerciseCandidate>,
        requested: &RequestedMuscleSet,
        preferences: &Preferences,
        target: usize,
    ) -> usize {
        let filter = self.ruleset.preference_filter(preferences);
        self.top_up_with(exercises, requested, &filter, target)
    }

    fn top_up_with(
        &self,
        exercises: &mut Vec<ExerciseCandidate>,
        requested: &RequestedMuscleSet,
        filter: &PreferenceFilter,
        target: usize,
    ) -> usize {
        let validator = self.ruleset.validator();
        let mut added = 0;

        for candidate in self.interleaved(requested) {
            if exercises.len() >= target {
                break;
            }
            if exercises.iter().any(|e| e.same_name_as(candidate))
                || !validator.is_relevant(candidate, requested)
                || !filter.allows(candidate)
            {
                continue;
            }
            debug!(exercise = %candidate.name, "Added fallback exercise");
            exercises.push(candidate.clone());
            added += 1;
        }

        added
    }

    fn defaults(
        &self,
        filter: &PreferenceFilter,
        exercises: &mut Vec<ExerciseCandidate>,
    ) -> Vec<MuscleGroup> {
        let mut muscles = Vec::new();
        for default in self.ruleset.catalog().defaults() {
            if exercises.len() >= self.exercise_cap {
                break;
            }
            if !filter.allows(&default.exercise) {
                continue;
            }
            exercises.push(default.exercise.clone());
            if !muscles.contains(&default.muscle) {
                muscles.push(default.muscle);
            }
        }
        muscles
    }

    // Round-robin over groups: first exercise of each group, then the second, ...
    fn interleaved(&self, requested: &RequestedMuscleSet) -> Vec<&'a ExerciseCandidate> {
        let catalog = self.ruleset.catalog();
        let tables: Vec<&'a [ExerciseCandidate]> =
            requested.iter().map(|m| catalog.exercises_for(m)).collect();
        let depth = tables.iter().map(|table| table.len()).max().unwrap_or(0);

        (0..depth)
            .flat_map(|row| tables.iter().filter_map(move |table| table.get(row)))
            .collect()
    }
}

/// "Chest & Back Focused Workout" from up to two groups, or the generic name
#[must_use]
pub fn workout_name(muscles: &[MuscleGroup]) -> String {
    if muscles.is_empty() {
        return GENERIC_WORKOUT_NAME.to_owned();
    }
    let names: Vec<&str> = muscles
        .iter()
        .take(MAX_MUSCLES_IN_NAME)
        .copied()
        .map(MuscleGroup::display_name)
        .collect();
    format!("{} {FOCUSED_WORKOUT_SUFFIX}", names.join(" & "))
}

fn workout_description(muscles: &[MuscleGroup]) -> String {
    if muscles.is_empty() {
        return "Custom workout built around your specified preferences.".to_owned();
    }
    let names: Vec<&str> = muscles.iter().copied().map(MuscleGroup::as_str).collect();
    format!(
        "Targeted workout focusing on {} with your specified preferences.",
        names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workout_name_uses_first_two_groups() {
        assert_eq!(
            workout_name(&[MuscleGroup::Chest, MuscleGroup::Back, MuscleGroup::Arms]),
            "Chest & Back Focused Workout"
        );
        assert_eq!(workout_name(&[MuscleGroup::Core]), "Core Focused Workout");
        assert_eq!(workout_name(&[]), "Custom Workout");
    }

    #[test]
    fn test_interleaves_groups() {
        let ruleset = Ruleset::builtin().unwrap();
        let selector = FallbackExerciseSelector::new(&ruleset);
        let requested: RequestedMuscleSet =
            [MuscleGroup::Chest, MuscleGroup::Back].into_iter().collect();
        let names: Vec<&str> = selector
            .interleaved(&requested)
            .iter()
            .take(4)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Push-ups", "Pull-ups", "Dumbbell Bench Press", "Bent Over Rows"]
        );
    }
}
