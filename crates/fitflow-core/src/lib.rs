// ABOUTME: Core types and constants for the FitFlow workout generation service
// ABOUTME: Foundation crate with error handling, workout domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitFlow Core
//!
//! Foundation crate providing shared types and constants for the `FitFlow`
//! workout generation service. Both the rule engine and the HTTP service depend
//! on it, so it is kept free of I/O and async code.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **models**: Muscle groups, exercises, workouts, and user preferences
//! - **constants**: Environment variable names and service defaults

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Workout domain models (`MuscleGroup`, `ExerciseCandidate`, `Workout`, `Preferences`)
pub mod models;

/// Application constants organized by domain
pub mod constants;
