// ABOUTME: HTTP server assembly for the workout service
// ABOUTME: Builds shared resources, the axum router with middleware, and runs the listener
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! ```text
//! ServerConfig ──► Ruleset::load ──► ChatProvider::from_config ──► WorkoutGenerator
//!                                                                     │
//!                        HealthRoutes + WorkoutRoutes ◄── ServerResources
//! ```

use std::sync::Arc;

use axum::Router;
use fitflow_core::errors::{AppError, AppResult};
use fitflow_intelligence::Ruleset;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::generator::WorkoutGenerator;
use crate::llm::{ChatProvider, LlmProvider};
use crate::middleware::{request_trace_layer, setup_cors};
use crate::routes::{HealthRoutes, WorkoutRoutes};

/// Shared state handed to every route
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// Workout generation service
    pub generator: WorkoutGenerator,
}

impl ServerResources {
    /// Bundle configuration and a ready generator
    #[must_use]
    pub const fn new(config: ServerConfig, generator: WorkoutGenerator) -> Self {
        Self { config, generator }
    }

    /// Load the ruleset and upstream provider named by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the ruleset or its lexicon override is invalid,
    /// or the provider cannot be constructed
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let ruleset = Ruleset::load(config.lexicon_path.as_deref())?;
        let provider: Arc<dyn LlmProvider> = Arc::new(ChatProvider::from_config(&config.llm)?);
        Ok(Self::with_provider(config, Arc::new(ruleset), provider))
    }

    /// Build resources around an explicit provider and ruleset
    #[must_use]
    pub fn with_provider(
        config: ServerConfig,
        ruleset: Arc<Ruleset>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        let generator = WorkoutGenerator::new(
            provider,
            ruleset,
            config.generation,
            config.post_processing,
        );
        Self::new(config, generator)
    }
}

/// Build the application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors_allowed_origins);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(resources))
        .layer(cors)
        .layer(request_trace_layer())
}

/// Bind and serve until Ctrl+C
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails
pub async fn run_server(resources: Arc<ServerResources>) -> AppResult<()> {
    let address = resources.config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {address}: {e}")).with_source(e))?;

    info!(
        "Workout service listening on {} (provider: {})",
        address,
        resources.generator.provider().display_name()
    );

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")).with_source(e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
