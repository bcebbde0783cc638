// ABOUTME: Main library entry point for the FitFlow workout generation service
// ABOUTME: Wires LLM providers, muscle-group filtering, fallback generation, and the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitFlow Server
//!
//! Turns a free-text workout request into a structured workout. A language
//! model proposes exercises; a rule-based filter removes anything that does
//! not train the requested muscle groups or violates the user's preferences;
//! a static exercise table tops up short lists and replaces the model
//! entirely when it is unreachable or returns garbage.
//!
//! ## Architecture
//!
//! - **`fitflow_core`**: Error types, domain models, constants
//! - **`fitflow_intelligence`**: Classifier, relevance validator, preference
//!   filters, fallback selector, post-processor, data-driven ruleset
//! - **`llm`**: Ollama, `OpenAI`-compatible, and remote workout API providers
//! - **`generator`**: Prompt construction, output parsing, generation service
//! - **`routes`** / **`server`**: axum HTTP surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitflow::config::ServerConfig;
//! use fitflow::server::{run_server, ServerResources};
//! use fitflow_core::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     run_server(resources).await
//! }
//! ```

/// Environment configuration
pub mod config;

/// Workout generation pipeline
pub mod generator;

/// LLM provider abstraction and implementations
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP route handlers
pub mod routes;

/// Router assembly and listener
pub mod server;

pub use fitflow_core::{constants, errors, models};
pub use fitflow_intelligence as intelligence;
