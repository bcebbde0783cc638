// ABOUTME: Workout generation route handler
// ABOUTME: Accepts a prompt with optional preferences and returns a filtered workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use fitflow_core::constants::endpoints;
use fitflow_core::errors::AppError;
use fitflow_core::models::Preferences;
use serde::Deserialize;

use crate::logging::AppLogger;
use crate::server::ServerResources;

/// Body of `POST /api/workout`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutRequest {
    /// Free-text workout request
    #[serde(default)]
    pub prompt: Option<String>,
    /// Optional user preferences
    #[serde(default)]
    pub preferences: Option<Preferences>,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::WORKOUT, post(Self::generate_workout))
            .with_state(resources)
    }

    /// Generate a workout; upstream failures still answer 200 with a fallback workout
    async fn generate_workout(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<WorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let started = Instant::now();
        let Json(request) =
            body.map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))?;

        let prompt = request
            .prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::missing_field("Prompt"))?;
        let preferences = request.preferences.unwrap_or_default();

        let outcome = resources.generator.generate(prompt, &preferences).await;

        AppLogger::log_api_request(
            "POST",
            endpoints::WORKOUT,
            200,
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok((
            [(endpoints::WORKOUT_SOURCE_HEADER, outcome.source.as_str())],
            Json(outcome.workout),
        )
            .into_response())
    }
}
