// ABOUTME: Maps a free-text prompt to the set of requested muscle groups
// ABOUTME: Keyword-presence classification with composite phrase expansion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Classification is pure keyword presence on the lowercased prompt. There is
//! no negation handling: "no legs today" still requests legs. Short triggers
//! also match inside longer words ("lat" in "lateral", "ab" in "about").

use fitflow_core::models::{MuscleGroup, RequestedMuscleSet};
use tracing::debug;

use crate::lexicon::MuscleGroupLexicon;

/// Prompt classifier backed by the lexicon's trigger terms
#[derive(Debug, Clone, Copy)]
pub struct MuscleGroupClassifier<'a> {
    lexicon: &'a MuscleGroupLexicon,
}

impl<'a> MuscleGroupClassifier<'a> {
    /// Create a classifier over a lexicon
    #[must_use]
    pub const fn new(lexicon: &'a MuscleGroupLexicon) -> Self {
        Self { lexicon }
    }

    /// Detect requested muscle groups
    ///
    /// Never fails; a prompt without any trigger yields an empty set, which
    /// disables relevance filtering downstream.
    #[must_use]
    pub fn classify(&self, prompt: &str) -> RequestedMuscleSet {
        let prompt = prompt.to_lowercase();
        let mut requested = RequestedMuscleSet::new();

        for muscle in MuscleGroup::ALL {
            if self
                .lexicon
                .triggers(muscle)
                .iter()
                .any(|trigger| prompt.contains(trigger.as_str()))
            {
                requested.insert(muscle);
            }
        }

        for composite in self.lexicon.composites() {
            if composite
                .phrases
                .iter()
                .any(|phrase| prompt.contains(phrase.as_str()))
            {
                requested.extend(composite.expands_to.iter().copied());
            }
        }

        debug!(muscles = ?requested.as_slice(), "Classified prompt");
        requested
    }
}
