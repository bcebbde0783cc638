// ABOUTME: Canonical muscle group lexicon with trigger, allowlist, and blacklist terms
// ABOUTME: Parsed from a versioned JSON resource compiled into the binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! The lexicon is pure data. All terms are lowercased at load time so every
//! lookup is a plain substring test against a lowercased name or prompt.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use fitflow_core::models::MuscleGroup;
use serde::Deserialize;

use crate::error::RulesetError;

/// Compiled-in lexicon resource
pub const BUILTIN_LEXICON_JSON: &str = include_str!("../resources/muscle_lexicon.json");

const RESOURCE_NAME: &str = "muscle lexicon";
const SUPPORTED_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
struct LexiconDocument {
    version: u32,
    groups: BTreeMap<String, GroupDocument>,
    #[serde(default)]
    composites: Vec<CompositeDocument>,
}

#[derive(Debug, Deserialize)]
struct GroupDocument {
    triggers: Vec<String>,
    #[serde(default)]
    allow: Vec<String>,
    #[serde(default)]
    deny: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CompositeDocument {
    phrases: Vec<String>,
    expands_to: Vec<String>,
}

/// Terms for one muscle group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexiconEntry {
    /// Prompt substrings that request this group
    pub triggers: Vec<String>,
    /// Exercise-name substrings that place an exercise in this group
    pub allowlist: Vec<String>,
    /// Exercise-name substrings forbidden in a workout targeting this group
    pub blacklist: Vec<String>,
}

/// Phrase that requests several groups at once, e.g. "upper body"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositePhrase {
    /// Equivalent prompt phrases
    pub phrases: Vec<String>,
    /// Groups the phrase expands to
    pub expands_to: Vec<MuscleGroup>,
}

/// Canonical lexicon for all six muscle groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuscleGroupLexicon {
    version: u32,
    entries: BTreeMap<MuscleGroup, LexiconEntry>,
    composites: Vec<CompositePhrase>,
}

impl MuscleGroupLexicon {
    /// Parse the compiled-in lexicon
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled resource is malformed
    pub fn builtin() -> Result<Self, RulesetError> {
        Self::from_json(BUILTIN_LEXICON_JSON)
    }

    /// Load a lexicon from a JSON file on disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation
    pub fn from_file(path: &Path) -> Result<Self, RulesetError> {
        let json = fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a lexicon document
    ///
    /// # Errors
    ///
    /// Returns an error on schema mismatch, unsupported version, unknown tags,
    /// missing groups, or groups without triggers
    pub fn from_json(json: &str) -> Result<Self, RulesetError> {
        let document: LexiconDocument =
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

        let mut entries = BTreeMap::new();
        for (tag, group) in document.groups {
            let muscle = parse_tag(&tag)?;
            entries.insert(
                muscle,
                LexiconEntry {
                    triggers: normalize_terms(group.triggers),
                    allowlist: normalize_terms(group.allow),
                    blacklist: normalize_terms(group.deny),
                },
            );
        }

        for muscle in MuscleGroup::ALL {
            match entries.get(&muscle) {
                None => return Err(RulesetError::MissingGroup(muscle)),
                Some(entry) if entry.triggers.is_empty() => {
                    return Err(RulesetError::EmptyTriggers(muscle))
                }
                Some(_) => {}
            }
        }

        let composites = document
            .composites
            .into_iter()
            .map(|composite| {
                let expands_to = composite
                    .expands_to
                    .iter()
                    .map(String::as_str)
                    .map(parse_tag)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompositePhrase {
                    phrases: normalize_terms(composite.phrases),
                    expands_to,
                })
            })
            .collect::<Result<Vec<_>, RulesetError>>()?;

        Ok(Self {
            version: document.version,
            entries,
            composites,
        })
    }

    /// Resource version
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Terms for a muscle group
    #[must_use]
    pub fn entry(&self, muscle: MuscleGroup) -> Option<&LexiconEntry> {
        self.entries.get(&muscle)
    }

    /// Prompt trigger terms for a muscle group
    #[must_use]
    pub fn triggers(&self, muscle: MuscleGroup) -> &[String] {
        self.entry(muscle)
            .map(|e| e.triggers.as_slice())
            .unwrap_or_default()
    }

    /// Allowlist terms for a muscle group
    #[must_use]
    pub fn allowlist(&self, muscle: MuscleGroup) -> &[String] {
        self.entry(muscle)
            .map(|e| e.allowlist.as_slice())
            .unwrap_or_default()
    }

    /// Blacklist terms for a muscle group
    #[must_use]
    pub fn blacklist(&self, muscle: MuscleGroup) -> &[String] {
        self.entry(muscle)
            .map(|e| e.blacklist.as_slice())
            .unwrap_or_default()
    }

    /// Composite phrases such as "upper body"
    #[must_use]
    pub fn composites(&self) -> &[CompositePhrase] {
        &self.composites
    }

    /// First blacklist term of `muscle` contained in an already-lowercased name
    #[must_use]
    pub fn blacklist_hit<'a>(&'a self, muscle: MuscleGroup, name_lower: &str) -> Option<&'a str> {
        first_contained(self.blacklist(muscle), name_lower)
    }

    /// First allowlist term of `muscle` contained in an already-lowercased name
    #[must_use]
    pub fn allowlist_hit<'a>(&'a self, muscle: MuscleGroup, name_lower: &str) -> Option<&'a str> {
        first_contained(self.allowlist(muscle), name_lower)
    }
}

fn parse_tag(tag: &str) -> Result<MuscleGroup, RulesetError> {
    MuscleGroup::parse(tag).ok_or_else(|| RulesetError::UnknownMuscleGroup(tag.to_owned()))
}

fn normalize_terms(terms: Vec<String>) -> Vec<String> {
    terms
        .into_iter()
        .map(|term| term.trim().to_lowercase())
        .filter(|term| !term.is_empty())
        .collect()
}

fn first_contained<'a>(terms: &'a [String], haystack: &str) -> Option<&'a str> {
    terms
        .iter()
        .find(|term| haystack.contains(term.as_str()))
        .map(String::as_str)
}
