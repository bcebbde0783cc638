// ABOUTME: User workout preferences applied as orthogonal exercise filters
// ABOUTME: Exclusions, available equipment, and injuries, all optional
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Preferences sent alongside a prompt
///
/// Every list defaults to empty, and an empty list disables its filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    /// Free-text injuries such as "knee pain" or "lower back"
    pub injuries: Vec<String>,
    /// Exercises or exercise families the user never wants
    pub excluded_exercises: Vec<String>,
    /// Equipment the user has access to, or equipment category names
    pub available_equipment: Vec<String>,
}

impl Preferences {
    /// Whether no preference filter is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.injuries.is_empty()
            && self.excluded_exercises.is_empty()
            && self.available_equipment.is_empty()
    }
}
