// ABOUTME: Hand-curated fallback exercises per muscle group and the default set
// ABOUTME: Parsed from a versioned JSON resource compiled into the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use fitflow_core::models::{ExerciseCandidate, MuscleGroup};
use serde::Deserialize;

use crate::error::RulesetError;

/// Compiled-in fallback exercise resource
pub const BUILTIN_CATALOG_JSON: &str = include_str!("../resources/fallback_exercises.json");

const RESOURCE_NAME: &str = "fallback exercises";
const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    version: u32,
    groups: BTreeMap<String, Vec<ExerciseCandidate>>,
    #[serde(default)]
    defaults: Vec<DefaultDocument>,
}

#[derive(Debug, Deserialize)]
struct DefaultDocument {
    group: String,
    name: String,
}

/// Default exercise used when no muscle group was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExercise {
    /// Group the exercise represents
    pub muscle: MuscleGroup,
    /// The exercise itself
    pub exercise: ExerciseCandidate,
}

/// Static fallback table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackCatalog {
    version: u32,
    groups: BTreeMap<MuscleGroup, Vec<ExerciseCandidate>>,
    defaults: Vec<DefaultExercise>,
}

impl FallbackCatalog {
    /// Parse the compiled-in catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled resource is malformed
    pub fn builtin() -> Result<Self, RulesetError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Parse a catalog document and resolve its defaults
    ///
    /// # Errors
    ///
    /// Returns an error on schema mismatch, unsupported version, unknown tags,
    /// or defaults that name an exercise missing from their group
    pub fn from_json(json: &str) -> Result<Self, RulesetError> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|source| RulesetError::Parse {
                resource: RESOURCE_NAME,
                source,
            })?;

        if document.version != SUPPORTED_VERSION {
            return Err(RulesetError::UnsupportedVersion {
                resource: RESOURCE_NAME,
                version: document.version,
            });
        }

        let mut groups = BTreeMap::new();
        for (tag, exercises) in document.groups {
            let muscle = MuscleGroup::parse(&tag).ok_or(RulesetError::UnknownMuscleGroup(tag))?;
            groups.insert(muscle, exercises);
        }

        let defaults = document
            .defaults
            .into_iter()
            .map(|default| {
                let muscle = MuscleGroup::parse(&default.group)
                    .ok_or_else(|| RulesetError::UnknownMuscleGroup(default.group.clone()))?;
                groups
                    .get(&muscle)
                    .and_then(|exercises| {
                        exercises
                            .iter()
                            .find(|e| e.name.eq_ignore_ascii_case(&default.name))
                    })
                    .map(|exercise| DefaultExercise {
                        muscle,
                        exercise: exercise.clone(),
                    })
                    .ok_or(RulesetError::MissingDefault {
                        muscle,
                        name: default.name,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: document.version,
            groups,
            defaults,
        })
    }

    /// Resource version
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Fallback exercises for a group, in table order
    #[must_use]
    pub fn exercises_for(&self, muscle: MuscleGroup) -> &[ExerciseCandidate] {
        self.groups
            .get(&muscle)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Exercises used when classification finds no muscle group
    #[must_use]
    pub fn defaults(&self) -> &[DefaultExercise] {
        &self.defaults
    }

    /// Every `(group, exercise)` pair in the table
    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, &ExerciseCandidate)> + '_ {
        self.groups
            .iter()
            .flat_map(|(muscle, exercises)| exercises.iter().map(move |e| (*muscle, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_at_least_three_per_group() {
        let catalog = FallbackCatalog::builtin().unwrap();
        for muscle in MuscleGroup::ALL {
            assert!(catalog.exercises_for(muscle).len() >= 3, "{muscle}");
        }
    }

    #[test]
    fn test_builtin_defaults_span_four_groups() {
        let catalog = FallbackCatalog::builtin().unwrap();
        let muscles: Vec<_> = catalog.defaults().iter().map(|d| d.muscle).collect();
        assert_eq!(
            muscles,
            vec![
                MuscleGroup::Chest,
                MuscleGroup::Back,
                MuscleGroup::Legs,
                MuscleGroup::Shoulders
            ]
        );
    }

    #[test]
    fn test_missing_default_is_rejected() {
        let json = r#"{
            "version": 1,
            "groups": { "chest": [] },
            "defaults": [ { "group": "chest", "name": "Push-ups" } ]
        }"#;
        assert!(matches!(
            FallbackCatalog::from_json(json),
            Err(RulesetError::MissingDefault { muscle: MuscleGroup::Chest, .. })
        ));
    }
}
