// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness, readiness, and upstream LLM reachability endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! `/health` and `/ready` never touch the LLM. `/health/llm` runs the
//! provider's health check and answers 503 when it fails.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use fitflow_core::constants::endpoints;
use tracing::warn;

use crate::server::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route(endpoints::HEALTH_CHECK, get(health_handler))
            .route(endpoints::READY_CHECK, get(ready_handler))
            .route(endpoints::LLM_HEALTH_CHECK, get(Self::llm_health))
            .with_state(resources)
    }

    async fn llm_health(State(resources): State<Arc<ServerResources>>) -> Response {
        let provider = resources.generator.provider();
        let (status, label, error) = match provider.health_check().await {
            Ok(true) => (StatusCode::OK, "healthy", None),
            Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", None),
            Err(e) => {
                warn!("LLM health check failed: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable", Some(e.message))
            }
        };

        let mut body = serde_json::json!({
            "status": label,
            "provider": provider.name(),
            "model": provider.default_model(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        if let Some(message) = error {
            body["error"] = serde_json::Value::String(message);
        }

        (status, Json(body)).into_response()
    }
}
