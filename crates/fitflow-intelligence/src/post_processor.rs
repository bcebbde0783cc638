// ABOUTME: Filters a model-generated workout down to the requested muscle groups
// ABOUTME: Applies relevance and preference filters, then tops up starved workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitflow_core::constants::post_processing::{FALLBACK_EXERCISE_CAP, MIN_VIABLE_EXERCISES};
use fitflow_core::models::{Preferences, RequestedMuscleSet, Workout};
use tracing::info;

use crate::fallback::FallbackExerciseSelector;
use crate::ruleset::Ruleset;

/// Tunables for post-processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostProcessorConfig {
    /// Exercise count below which fallback exercises are added
    pub min_viable_exercises: usize,
    /// Maximum exercises in a full fallback workout
    pub fallback_exercise_cap: usize,
}

impl Default for PostProcessorConfig {
    fn default() -> Self {
        Self {
            min_viable_exercises: MIN_VIABLE_EXERCISES,
            fallback_exercise_cap: FALLBACK_EXERCISE_CAP,
        }
    }
}

/// What post-processing changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessReport {
    /// Groups detected from the prompt
    pub requested: RequestedMuscleSet,
    /// Exercises the model proposed
    pub proposed: usize,
    /// Removed by the relevance validator
    pub removed_as_irrelevant: usize,
    /// Removed by preference filters
    pub removed_by_preferences: usize,
    /// Appended from the fallback table
    pub added_from_fallback: usize,
}

/// Deterministic cleanup of model output
#[derive(Debug, Clone, Copy)]
pub struct WorkoutPostProcessor<'a> {
    ruleset: &'a Ruleset,
    config: PostProcessorConfig,
}

impl<'a> WorkoutPostProcessor<'a> {
    /// Create a post-processor over a ruleset
    #[must_use]
    pub const fn new(ruleset: &'a Ruleset, config: PostProcessorConfig) -> Self {
        Self { ruleset, config }
    }

    /// Filter, top up, and relabel a model-generated workout
    #[must_use]
    pub fn process(&self, raw: Workout, prompt: &str, preferences: &Preferences) -> Workout {
        self.process_with_report(raw, prompt, preferences).0
    }

    /// Same as [`Self::process`], also reporting what changed
    ///
    /// Steps:
    /// - classify the prompt
    /// - drop exercises the relevance validator rejects
    /// - drop exercises any active preference filter rejects
    /// - below the minimum viable count, append fallback exercises for the
    ///   requested groups; the result may still be short
    /// - replace the model's muscle tags with the classified groups, unless
    ///   nothing was classified
    #[must_use]
    pub fn process_with_report(
        &self,
        raw: Workout,
        prompt: &str,
        preferences: &Preferences,
    ) -> (Workout, PostProcessReport) {
        let requested = self.ruleset.classifier().classify(prompt);
        let proposed = raw.exercises.len();

        let relevant = self.ruleset.validator().filter(raw.exercises, &requested);
        let removed_as_irrelevant = proposed - relevant.len();

        let before_preferences = relevant.len();
        let mut exercises = self.ruleset.preference_filter(preferences).filter(relevant);
        let removed_by_preferences = before_preferences - exercises.len();

        let mut added_from_fallback = 0;
        if !requested.is_empty() && exercises.len() < self.config.min_viable_exercises {
            added_from_fallback = FallbackExerciseSelector::new(self.ruleset)
                .with_exercise_cap(self.config.fallback_exercise_cap)
                .top_up(
                    &mut exercises,
                    &requested,
                    preferences,
                    self.config.min_viable_exercises,
                );
        }

        let muscles = if requested.is_empty() {
            raw.muscles
        } else {
            requested.as_slice().to_vec()
        };

        let report = PostProcessReport {
            requested,
            proposed,
            removed_as_irrelevant,
            removed_by_preferences,
            added_from_fallback,
        };

        if report.removed_as_irrelevant + report.removed_by_preferences + report.added_from_fallback > 0 {
            info!(
                proposed = report.proposed,
                removed_as_irrelevant = report.removed_as_irrelevant,
                removed_by_preferences = report.removed_by_preferences,
                added_from_fallback = report.added_from_fallback,
                final_count = exercises.len(),
                "Post-processed workout"
            );
        }

        let workout = Workout {
            name: raw.name,
            muscles,
            exercises,
            description: raw.description,
        };
        (workout, report)
    }

    /// Full fallback workout for a prompt, using this processor's cap
    #[must_use]
    pub fn fallback(&self, prompt: &str, preferences: &Preferences) -> Workout {
        FallbackExerciseSelector::new(self.ruleset)
            .with_exercise_cap(self.config.fallback_exercise_cap)
            .select_fallback(prompt, preferences)
    }
}
