// ABOUTME: Rule engine that filters LLM-generated workouts by requested muscle group
// ABOUTME: Classifier, relevance validator, preference filters, and fallback selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitFlow Intelligence
//!
//! Deterministic post-processing for model-generated workouts. Everything in
//! this crate is synchronous and free of shared mutable state: a [`Ruleset`] is
//! built once, wrapped in an `Arc`, and borrowed by every request.
//!
//! ## Pipeline
//!
//! 1. [`MuscleGroupClassifier`] maps a prompt to a [`RequestedMuscleSet`]
//! 2. [`ExerciseRelevanceValidator`] applies the blacklist-then-allowlist scan
//! 3. [`PreferenceFilter`] removes excluded, unavailable, or injury-risk exercises
//! 4. [`FallbackExerciseSelector`] tops up starved workouts or builds a full fallback
//! 5. [`WorkoutPostProcessor`] orchestrates the steps above
//!
//! [`RequestedMuscleSet`]: fitflow_core::models::RequestedMuscleSet

/// Fallback exercise table loaded from a versioned JSON resource
pub mod catalog;
/// Prompt-to-muscle-group classification
pub mod classifier;
/// Ruleset loading errors
pub mod error;
/// Fallback workout generation and top-up
pub mod fallback;
/// Workout style and exercise count detection
pub mod intent;
/// Canonical muscle group lexicon
pub mod lexicon;
/// Post-processing of model-generated workouts
pub mod post_processor;
/// Exclusion, equipment, and injury filters
pub mod preferences;
/// Immutable bundle of lexicon, catalog, and preference rules
pub mod ruleset;
/// Blacklist-then-allowlist relevance validation
pub mod validator;

pub use catalog::FallbackCatalog;
pub use classifier::MuscleGroupClassifier;
pub use error::RulesetError;
pub use fallback::FallbackExerciseSelector;
pub use intent::{RequestIntent, WorkoutStyle};
pub use lexicon::MuscleGroupLexicon;
pub use post_processor::{PostProcessReport, PostProcessorConfig, WorkoutPostProcessor};
pub use preferences::{PreferenceFilter, PreferenceRules, PreferenceVerdict};
pub use ruleset::Ruleset;
pub use validator::{ExerciseRelevanceValidator, RelevanceVerdict};
