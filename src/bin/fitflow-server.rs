// ABOUTME: Server binary for the FitFlow workout generation service
// ABOUTME: Loads environment configuration, applies CLI overrides, and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # FitFlow Server Binary
//!
//! Starts the workout API. Configuration comes from the environment; the
//! command line can override the port and the LLM provider.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use fitflow::config::{LlmProviderType, ServerConfig};
use fitflow::constants::endpoints;
use fitflow::logging;
use fitflow::server::{run_server, ServerResources};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "fitflow-server")]
#[command(about = "FitFlow workout API - LLM workout generation with muscle-group filtering")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override LLM provider (ollama, local, workout-api, bedrock)
    #[arg(long)]
    provider: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(provider) = args.provider.as_deref() {
        config.llm.provider = LlmProviderType::from_str_or_default(provider);
        config.validate()?;
    }

    logging::init_from_env()?;

    info!("Starting FitFlow workout API");
    info!(
        "Provider: {}, minimum exercises: {}, fallback cap: {}",
        config.llm.provider,
        config.post_processing.min_viable_exercises,
        config.post_processing.fallback_exercise_cap
    );
    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::from_config(config)?);

    if let Err(e) = run_server(resources).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;
    info!("=== Available API Endpoints ===");
    info!("   Generate Workout:  POST http://{host}:{port}{}", endpoints::WORKOUT);
    info!("   Health Check:      GET  http://{host}:{port}{}", endpoints::HEALTH_CHECK);
    info!("   Readiness:         GET  http://{host}:{port}{}", endpoints::READY_CHECK);
    info!("   LLM Health:        GET  http://{host}:{port}{}", endpoints::LLM_HEALTH_CHECK);
    info!("=== End of Endpoint List ===");
}
