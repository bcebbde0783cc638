// ABOUTME: Muscle group tags and the ordered set of tags requested by a prompt
// ABOUTME: Provides parsing, display, and title-cased names for workout naming
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::iter::Copied;
use std::slice;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Muscle group tag, the unit of filtering granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    /// Pectorals
    Chest,
    /// Lats, traps, and spinal erectors
    Back,
    /// Quads, hamstrings, glutes, and calves
    Legs,
    /// Deltoids and rotator cuff
    Shoulders,
    /// Biceps, triceps, and forearms
    Arms,
    /// Abdominals and obliques
    Core,
}

impl MuscleGroup {
    /// All muscle groups in canonical order
    pub const ALL: [Self; 6] = [
        Self::Chest,
        Self::Back,
        Self::Legs,
        Self::Shoulders,
        Self::Arms,
        Self::Core,
    ];

    /// Lowercase tag used in JSON and in the lexicon resource
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Legs => "legs",
            Self::Shoulders => "shoulders",
            Self::Arms => "arms",
            Self::Core => "core",
        }
    }

    /// Title-cased name for workout titles
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Legs => "Legs",
            Self::Shoulders => "Shoulders",
            Self::Arms => "Arms",
            Self::Core => "Core",
        }
    }

    /// Parse a tag case-insensitively, returning `None` for unknown tags
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "chest" => Some(Self::Chest),
            "back" => Some(Self::Back),
            "legs" => Some(Self::Legs),
            "shoulders" => Some(Self::Shoulders),
            "arms" => Some(Self::Arms),
            "core" => Some(Self::Core),
            _ => None,
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MuscleGroup {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AppError::invalid_input(format!("Unknown muscle group: {s}")))
    }
}

/// Deduplicated, insertion-ordered set of muscle groups detected from one prompt
///
/// An empty set means no filtering was requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestedMuscleSet(Vec<MuscleGroup>);

impl RequestedMuscleSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Add a muscle group, ignoring duplicates. Returns true when it was new.
    pub fn insert(&mut self, muscle: MuscleGroup) -> bool {
        if self.0.contains(&muscle) {
            return false;
        }
        self.0.push(muscle);
        true
    }

    /// Whether the group was requested
    #[must_use]
    pub fn contains(&self, muscle: MuscleGroup) -> bool {
        self.0.contains(&muscle)
    }

    /// Whether no group was requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of requested groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in order of first detection
    pub fn iter(&self) -> Copied<slice::Iter<'_, MuscleGroup>> {
        self.0.iter().copied()
    }

    /// Borrow the groups as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[MuscleGroup] {
        &self.0
    }

    /// Consume into the underlying vector
    #[must_use]
    pub fn into_vec(self) -> Vec<MuscleGroup> {
        self.0
    }
}

impl<'a> IntoIterator for &'a RequestedMuscleSet {
    type Item = MuscleGroup;
    type IntoIter = Copied<slice::Iter<'a, MuscleGroup>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<MuscleGroup> for RequestedMuscleSet {
    fn from_iter<I: IntoIterator<Item = MuscleGroup>>(iter: I) -> Self {
        let mut set = Self::new();
        for muscle in iter {
            set.insert(muscle);
        }
        set
    }
}

impl Extend<MuscleGroup> for RequestedMuscleSet {
    fn extend<I: IntoIterator<Item = MuscleGroup>>(&mut self, iter: I) {
        for muscle in iter {
            self.insert(muscle);
        }
    }
}
