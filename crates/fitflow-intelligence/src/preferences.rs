// ABOUTME: Orthogonal preference filters for exclusions, available equipment, and injuries
// ABOUTME: Rule tables come from a versioned JSON resource; matching is case-insensitive
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use fitflow_core::models::{ExerciseCandidate, Preferences};
use serde::Deserialize;
use tracing::debug;

use crate::error::RulesetError;

/// Compiled-in preference rules resource
pub const BUILTIN_PREFERENCE_RULES_JSON: &str =
    include_str!("../resources/preference_rules.json");

const RESOURCE_NAME: &str = "preference rules";
const SUPPORTED_VERSION: u32 = 1;

/// Lookup tables backing the preference filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferenceRules {
    /// Resource version
    pub version: u32,
    /// Excluded term to the family of name patterns it also excludes
    #[serde(default)]
    pub exclusion_patterns: BTreeMap<String, Vec<String>>,
    /// Injury region to exercise-name terms that stress it
    #[serde(default)]
    pub injury_exclusions: BTreeMap<String, Vec<String>>,
    /// Equipment category name to the equipment it provides
    #[serde(default)]
    pub equipment_categories: BTreeMap<String, Vec<String>>,
}

impl PreferenceRules {
    /// Parse the compiled-in rules
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled resource is malformed
    pub fn builtin() -> Result<Self, RulesetError> {
        Self::from_json(BUILTIN_PREFERENCE_RULES_JSON)
    }

    /// Parse a rules document, lowercasing every key and term
    ///
    /// # Errors
    ///
    /// Returns an error on schema mismatch or unsupported version
    pub fn from_json(json: &str) -> Result<Self, RulesetError> {
        let rules: Self = serde_json::from_str(json).map_err(|source| RulesetError::Parse {
            resource: RESOURCE_NAME,
            source,
        })?;

        if rules.version != SUPPORTED_VERSION {
            return Err(RulesetError::UnsupportedVersion {
                resource: RESOURCE_NAME,
                version: rules.version,
            });
        }

        Ok(Self {
            version: rules.version,
            exclusion_patterns: normalize_table(rules.exclusion_patterns),
            injury_exclusions: normalize_table(rules.injury_exclusions),
            equipment_categories: normalize_table(rules.equipment_categories),
        })
    }
}

// Blank keys and terms are dropped; an empty string would match every name.
fn normalize_table(table: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    table
        .into_iter()
        .filter_map(|(key, terms)| {
            let key = key.trim().to_lowercase();
            let terms: Vec<String> = terms
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            (!key.is_empty() && !terms.is_empty()).then_some((key, terms))
        })
        .collect()
}

/// Why a preference filter kept or removed an exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceVerdict {
    /// Passed every active filter
    Allowed,
    /// Name matched an excluded term or its pattern family
    Excluded {
        /// Matching term
        term: String,
    },
    /// None of the exercise's equipment is available
    MissingEquipment,
    /// Name matched a term that stresses an injured region
    Injury {
        /// Injured region from the rules table
        region: String,
        /// Matching term
        term: String,
    },
}

impl PreferenceVerdict {
    /// Whether the exercise may stay in the workout
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Preference filters resolved for one request
///
/// Exclusion families, equipment categories, and injury regions are expanded
/// once at construction so each exercise check is a set of substring scans.
#[derive(Debug, Clone, Default)]
pub struct PreferenceFilter {
    excluded_terms: Vec<String>,
    available_equipment: Vec<String>,
    injury_terms: Vec<(String, String)>,
}

impl PreferenceFilter {
    /// Resolve a user's preferences against the rule tables
    #[must_use]
    pub fn new(rules: &PreferenceRules, preferences: &Preferences) -> Self {
        let mut excluded_terms = Vec::new();
        for excluded in normalized(&preferences.excluded_exercises) {
            if let Some(family) = rules.exclusion_patterns.get(&excluded) {
                push_unique_all(&mut excluded_terms, family);
            }
            push_unique(&mut excluded_terms, excluded);
        }

        let mut available_equipment = Vec::new();
        for available in normalized(&preferences.available_equipment) {
            if let Some(category) = rules.equipment_categories.get(&available) {
                push_unique_all(&mut available_equipment, category);
            }
            push_unique(&mut available_equipment, available);
        }

        let mut injury_terms = Vec::new();
        for injury in normalized(&preferences.injuries) {
            for (region, terms) in &rules.injury_exclusions {
                if injury.contains(region.as_str()) {
                    for term in terms {
                        let pair = (region.clone(), term.clone());
                        if !injury_terms.contains(&pair) {
                            injury_terms.push(pair);
                        }
                    }
                }
            }
        }

        Self {
            excluded_terms,
            available_equipment,
            injury_terms,
        }
    }

    /// Whether any preference filter is active
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.excluded_terms.is_empty()
            || !self.available_equipment.is_empty()
            || !self.injury_terms.is_empty()
    }

    /// Run exclusion, equipment, and injury checks in that order
    #[must_use]
    pub fn evaluate(&self, exercise: &ExerciseCandidate) -> PreferenceVerdict {
        let name = exercise.normalized_name();

        if let Some(term) = self
            .excluded_terms
            .iter()
            .find(|term| name.contains(term.as_str()))
        {
            return PreferenceVerdict::Excluded { term: term.clone() };
        }

        if !self.has_equipment_for(exercise) {
            return PreferenceVerdict::MissingEquipment;
        }

        if let Some((region, term)) = self
            .injury_terms
            .iter()
            .find(|(_, term)| name.contains(term.as_str()))
        {
            return PreferenceVerdict::Injury {
                region: region.clone(),
                term: term.clone(),
            };
        }

        PreferenceVerdict::Allowed
    }

    /// Whether the exercise passes every active filter
    #[must_use]
    pub fn allows(&self, exercise: &ExerciseCandidate) -> bool {
        self.evaluate(exercise).is_allowed()
    }

    /// Keep only exercises that pass every active filter, preserving order
    #[must_use]
    pub fn filter(&self, exercises: Vec<ExerciseCandidate>) -> Vec<ExerciseCandidate> {
        if !self.is_active() {
            return exercises;
        }
        exercises
            .into_iter()
            .filter(|exercise| {
                let verdict = self.evaluate(exercise);
                if !verdict.is_allowed() {
                    debug!(exercise = %exercise.name, ?verdict, "Removed exercise by preference");
                }
                verdict.is_allowed()
            })
            .collect()
    }

    // Exercises without an equipment list always pass.
    fn has_equipment_for(&self, exercise: &ExerciseCandidate) -> bool {
        if self.available_equipment.is_empty() || exercise.equipment.is_empty() {
            return true;
        }
        exercise.equipment.iter().any(|needed| {
            let needed = needed.to_lowercase();
            self.available_equipment.iter().any(|available| {
                available.contains(needed.as_str()) || needed.contains(available.as_str())
            })
        })
    }
}

fn normalized(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
}

fn push_unique(terms: &mut Vec<String>, term: String) {
    if !terms.contains(&term) {
        terms.push(term);
    }
}

fn push_unique_all(terms: &mut Vec<String>, family: &[String]) {
    for term in family {
        push_unique(terms, term.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_for(preferences: &Preferences) -> PreferenceFilter {
        PreferenceFilter::new(&PreferenceRules::builtin().unwrap(), preferences)
    }

    #[test]
    fn test_inactive_when_preferences_empty() {
        assert!(!filter_for(&Preferences::default()).is_active());
    }

    #[test]
    fn test_exclusion_expands_pattern_family() {
        let filter = filter_for(&Preferences {
            excluded_exercises: vec!["Deadlifts".to_owned()],
            ..Preferences::default()
        });
        let rdl = ExerciseCandidate::new("Romanian Deadlift", 3, "8", "Moderate", "");
        assert_eq!(
            filter.evaluate(&rdl),
            PreferenceVerdict::Excluded {
                term: "deadlift".to_owned()
            }
        );
    }

    #[test]
    fn test_equipment_category_expands() {
        let filter = filter_for(&Preferences {
            available_equipment: vec!["Home Gym".to_owned()],
            ..Preferences::default()
        });
        let rows = ExerciseCandidate::new("Dumbbell Row", 3, "10", "Moderate", "")
            .with_equipment(["dumbbells"]);
        let pulldown = ExerciseCandidate::new("Lat Pulldown", 3, "10", "Moderate", "")
            .with_equipment(["cable machine"]);
        assert!(filter.allows(&rows));
        assert_eq!(filter.evaluate(&pulldown), PreferenceVerdict::MissingEquipment);
    }

    #[test]
    fn test_equipment_matches_substring_either_way() {
        let filter = filter_for(&Preferences {
            available_equipment: vec!["dumbbell".to_owned()],
            ..Preferences::default()
        });
        let press = ExerciseCandidate::new("Arnold Press", 3, "10", "Moderate", "")
            .with_equipment(["adjustable dumbbells"]);
        assert!(filter.allows(&press));
    }

    #[test]
    fn test_blank_rule_terms_are_dropped() {
        let rules = PreferenceRules::from_json(
            r#"{
                "version": 1,
                "exclusion_patterns": {"squat": ["", "  ", "squat"]},
                "injury_exclusions": {"": ["press"], "knee": [""], "wrist": [" ", "push-up"]}
            }"#,
        )
        .unwrap();
        assert_eq!(rules.exclusion_patterns["squat"], vec!["squat".to_owned()]);
        assert!(!rules.injury_exclusions.contains_key(""));
        assert!(!rules.injury_exclusions.contains_key("knee"));
        assert_eq!(rules.injury_exclusions["wrist"], vec!["push-up".to_owned()]);

        let filter = PreferenceFilter::new(
            &rules,
            &Preferences {
                excluded_exercises: vec!["squat".to_owned()],
                injuries: vec!["knee and wrist pain".to_owned()],
                ..Preferences::default()
            },
        );
        let row = ExerciseCandidate::new("Barbell Row", 3, "8", "Moderate", "");
        let press = ExerciseCandidate::new("Overhead Press", 3, "8", "Moderate", "");
        assert!(filter.allows(&row));
        assert!(filter.allows(&press));
        assert_eq!(
            filter.evaluate(&ExerciseCandidate::new("Push-ups", 3, "12", "Bodyweight", "")),
            PreferenceVerdict::Injury {
                region: "wrist".to_owned(),
                term: "push-up".to_owned(),
            }
        );
    }

    #[test]
    fn test_injury_region_matches_free_text() {
        let filter = filter_for(&Preferences {
            injuries: vec!["Sore knees after running".to_owned()],
            ..Preferences::default()
        });
        let lunge = ExerciseCandidate::new("Walking Lunges", 3, "10", "Bodyweight", "");
        assert_eq!(
            filter.evaluate(&lunge),
            PreferenceVerdict::Injury {
                region: "knee".to_owned(),
                term: "lunge".to_owned(),
            }
        );
    }
}
