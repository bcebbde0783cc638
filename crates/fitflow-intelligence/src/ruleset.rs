// ABOUTME: Immutable bundle of lexicon, fallback catalog, and preference rules
// ABOUTME: Built once at startup and shared read-only across requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use fitflow_core::models::{Preferences, RequestedMuscleSet};
use tracing::info;

use crate::catalog::FallbackCatalog;
use crate::classifier::MuscleGroupClassifier;
use crate::error::RulesetError;
use crate::lexicon::MuscleGroupLexicon;
use crate::preferences::{PreferenceFilter, PreferenceRules};
use crate::validator::ExerciseRelevanceValidator;

/// All rule data used by the filtering pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ruleset {
    lexicon: MuscleGroupLexicon,
    catalog: FallbackCatalog,
    preference_rules: PreferenceRules,
}

impl Ruleset {
    /// Bundle rule data after checking the catalog against the lexicon
    ///
    /// Every fallback exercise must be accepted by the validator for the group
    /// it is listed under, otherwise top-ups could reintroduce exercises the
    /// filter just removed.
    ///
    /// # Errors
    ///
    /// Returns `IrrelevantFallback` for the first catalog entry the lexicon rejects
    pub fn new(
        lexicon: MuscleGroupLexicon,
        catalog: FallbackCatalog,
        preference_rules: PreferenceRules,
    ) -> Result<Self, RulesetError> {
        let validator = ExerciseRelevanceValidator::new(&lexicon);
        for (muscle, exercise) in catalog.iter() {
            let requested: RequestedMuscleSet = [muscle].into_iter().collect();
            if !validator.is_relevant(exercise, &requested) {
                return Err(RulesetError::IrrelevantFallback {
                    muscle,
                    name: exercise.name.clone(),
                });
            }
        }

        Ok(Self {
            lexicon,
            catalog,
            preference_rules,
        })
    }

    /// Ruleset built entirely from compiled-in resources
    ///
    /// # Errors
    ///
    /// Returns an error if a bundled resource is malformed
    pub fn builtin() -> Result<Self, RulesetError> {
        Self::new(
            MuscleGroupLexicon::builtin()?,
            FallbackCatalog::builtin()?,
            PreferenceRules::builtin()?,
        )
    }

    /// Built-in ruleset, with the lexicon replaced from disk when a path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the override cannot be read, fails validation, or
    /// rejects a built-in fallback exercise
    pub fn load(lexicon_override: Option<&Path>) -> Result<Self, RulesetError> {
        let Some(path) = lexicon_override else {
            return Self::builtin();
        };

        let lexicon = MuscleGroupLexicon::from_file(path)?;
        info!(
            path = %path.display(),
            version = lexicon.version(),
            "Loaded muscle lexicon override"
        );
        Self::new(lexicon, FallbackCatalog::builtin()?, PreferenceRules::builtin()?)
    }

    /// Canonical lexicon
    #[must_use]
    pub const fn lexicon(&self) -> &MuscleGroupLexicon {
        &self.lexicon
    }

    /// Fallback exercise table
    #[must_use]
    pub const fn catalog(&self) -> &FallbackCatalog {
        &self.catalog
    }

    /// Preference lookup tables
    #[must_use]
    pub const fn preference_rules(&self) -> &PreferenceRules {
        &self.preference_rules
    }

    /// Classifier over this ruleset's lexicon
    #[must_use]
    pub const fn classifier(&self) -> MuscleGroupClassifier<'_> {
        MuscleGroupClassifier::new(&self.lexicon)
    }

    /// Relevance validator over this ruleset's lexicon
    #[must_use]
    pub const fn validator(&self) -> ExerciseRelevanceValidator<'_> {
        ExerciseRelevanceValidator::new(&self.lexicon)
    }

    /// Preference filter resolved for one request
    #[must_use]
    pub fn preference_filter(&self, preferences: &Preferences) -> PreferenceFilter {
        PreferenceFilter::new(&self.preference_rules, preferences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ruleset_is_consistent() {
        assert!(Ruleset::builtin().is_ok());
    }
}
