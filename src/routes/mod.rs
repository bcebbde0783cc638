// ABOUTME: Route module organization for the workout service HTTP endpoints
// ABOUTME: Health and workout generation routes, each with thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the workout service
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the generation service.

/// Health check and system status routes
pub mod health;
/// Workout generation routes
pub mod workout;

/// Health check route handlers
pub use health::HealthRoutes;
/// Workout request payload
pub use workout::WorkoutRequest;
/// Workout route handlers
pub use workout::WorkoutRoutes;
