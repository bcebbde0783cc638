// ABOUTME: Error types for loading and validating the filtering ruleset
// ABOUTME: Covers parse failures, unknown tags, and inconsistent fallback tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;
use std::path::PathBuf;

use fitflow_core::errors::AppError;
use fitflow_core::models::MuscleGroup;
use thiserror::Error;

/// Ruleset loading errors
#[derive(Debug, Error)]
pub enum RulesetError {
    /// Resource JSON did not match the expected schema
    #[error("Failed to parse {resource}: {source}")]
    Parse {
        /// Resource name
        resource: &'static str,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Override file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Resource declares a version this build does not understand
    #[error("Unsupported {resource} version {version}")]
    UnsupportedVersion {
        /// Resource name
        resource: &'static str,
        /// Declared version
        version: u32,
    },

    /// A tag in the resource is not one of the six muscle groups
    #[error("Unknown muscle group '{0}'")]
    UnknownMuscleGroup(String),

    /// The lexicon has no entry for a muscle group
    #[error("Muscle group '{0}' is missing from the lexicon")]
    MissingGroup(MuscleGroup),

    /// A lexicon entry has no trigger terms, so it can never be requested
    #[error("Muscle group '{0}' has no trigger terms")]
    EmptyTriggers(MuscleGroup),

    /// A fallback exercise would be rejected for its own muscle group
    #[error("Fallback exercise '{name}' is not relevant to {muscle}")]
    IrrelevantFallback {
        /// Group the exercise is listed under
        muscle: MuscleGroup,
        /// Exercise name
        name: String,
    },

    /// A default exercise does not exist in its group's table
    #[error("Default exercise '{name}' is not listed under {muscle}")]
    MissingDefault {
        /// Group the default refers to
        muscle: MuscleGroup,
        /// Exercise name
        name: String,
    },
}

impl From<RulesetError> for AppError {
    fn from(error: RulesetError) -> Self {
        Self::config_invalid(error.to_string()).with_source(error)
    }
}
