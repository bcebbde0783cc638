// ABOUTME: Configuration management module for centralized service settings
// ABOUTME: Environment-only configuration for network, LLM provider, and pipeline tunables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the `FitFlow` workout service
//!
//! - **Environment**: `ServerConfig` parsed from environment variables
//! - **Types**: provider selection enums

/// Environment and server configuration
pub mod environment;
/// Configuration type definitions
pub mod types;

pub use environment::{GenerationConfig, LlmConfig, ServerConfig};
pub use types::LlmProviderType;
