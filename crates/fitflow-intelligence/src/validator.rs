// ABOUTME: Blacklist-then-allowlist relevance check of exercises against requested groups
// ABOUTME: Produces a verdict explaining why an exercise was accepted or rejected
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitflow_core::models::{ExerciseCandidate, MuscleGroup, RequestedMuscleSet};
use tracing::debug;

use crate::lexicon::MuscleGroupLexicon;

/// Outcome of validating one exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelevanceVerdict {
    /// No muscle group was requested, so nothing is filtered
    Unfiltered,
    /// Allowlisted for a requested group
    Accepted {
        /// Group whose allowlist matched
        muscle: MuscleGroup,
        /// Matching term
        term: String,
    },
    /// Blacklisted for a requested group; overrides any allowlist match
    Blacklisted {
        /// Group whose blacklist matched
        muscle: MuscleGroup,
        /// Matching term
        term: String,
    },
    /// Matched no allowlist term of any requested group
    NotAllowlisted,
}

impl RelevanceVerdict {
    /// Whether the exercise may stay in the workout
    #[must_use]
    pub const fn is_relevant(&self) -> bool {
        matches!(self, Self::Unfiltered | Self::Accepted { .. })
    }
}

/// Relevance validator backed by the lexicon's allow and deny lists
#[derive(Debug, Clone, Copy)]
pub struct ExerciseRelevanceValidator<'a> {
    lexicon: &'a MuscleGroupLexicon,
}

impl<'a> ExerciseRelevanceValidator<'a> {
    /// Create a validator over a lexicon
    #[must_use]
    pub const fn new(lexicon: &'a MuscleGroupLexicon) -> Self {
        Self { lexicon }
    }

    /// Explain whether an exercise fits the requested groups
    ///
    /// Rules, in order:
    /// - empty request accepts everything
    /// - any blacklist hit for any requested group rejects
    /// - otherwise an allowlist hit for any requested group accepts
    /// - everything else is rejected; the allowlist is closed
    #[must_use]
    pub fn evaluate(
        &self,
        exercise: &ExerciseCandidate,
        requested: &RequestedMuscleSet,
    ) -> RelevanceVerdict {
        if requested.is_empty() {
            return RelevanceVerdict::Unfiltered;
        }

        let name = exercise.normalized_name();

        for muscle in requested {
            if let Some(term) = self.lexicon.blacklist_hit(muscle, &name) {
                return RelevanceVerdict::Blacklisted {
                    muscle,
                    term: term.to_owned(),
                };
            }
        }

        requested
            .iter()
            .find_map(|muscle| {
                self.lexicon
                    .allowlist_hit(muscle, &name)
                    .map(|term| RelevanceVerdict::Accepted {
                        muscle,
                        term: term.to_owned(),
                    })
            })
            .unwrap_or(RelevanceVerdict::NotAllowlisted)
    }

    /// Whether an exercise fits the requested groups
    #[must_use]
    pub fn is_relevant(&self, exercise: &ExerciseCandidate, requested: &RequestedMuscleSet) -> bool {
        self.evaluate(exercise, requested).is_relevant()
    }

    /// Keep only relevant exercises, preserving order
    #[must_use]
    pub fn filter(
        &self,
        exercises: Vec<ExerciseCandidate>,
        requested: &RequestedMuscleSet,
    ) -> Vec<ExerciseCandidate> {
        exercises
            .into_iter()
            .filter(|exercise| {
                let verdict = self.evaluate(exercise, requested);
                match &verdict {
                    RelevanceVerdict::Blacklisted { muscle, term } => {
                        debug!(exercise = %exercise.name, %muscle, %term, "Removed blacklisted exercise");
                    }
                    RelevanceVerdict::NotAllowlisted => {
                        debug!(exercise = %exercise.name, "Removed exercise outside requested groups");
                    }
                    RelevanceVerdict::Unfiltered | RelevanceVerdict::Accepted { .. } => {}
                }
                verdict.is_relevant()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(name: &str) -> ExerciseCandidate {
        ExerciseCandidate::new(name, 3, "10", "Moderate", "")
    }

    #[test]
    fn test_blacklist_reports_first_requested_group() {
        let lexicon = MuscleGroupLexicon::builtin().unwrap();
        let validator = ExerciseRelevanceValidator::new(&lexicon);
        let requested: RequestedMuscleSet =
            [MuscleGroup::Chest, MuscleGroup::Back].into_iter().collect();

        assert_eq!(
            validator.evaluate(&exercise("Leg Press"), &requested),
            RelevanceVerdict::Blacklisted {
                muscle: MuscleGroup::Chest,
                term: "leg press".to_owned(),
            }
        );
    }

    #[test]
    fn test_accepted_reports_matching_term() {
        let lexicon = MuscleGroupLexicon::builtin().unwrap();
        let validator = ExerciseRelevanceValidator::new(&lexicon);
        let requested: RequestedMuscleSet = [MuscleGroup::Back].into_iter().collect();

        assert_eq!(
            validator.evaluate(&exercise("Seated Cable Row"), &requested),
            RelevanceVerdict::Accepted {
                muscle: MuscleGroup::Back,
                term: "row".to_owned(),
            }
        );
    }
}
