// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Environment variable names and service defaults for FitFlow
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Defaults here are only read by the
//! configuration layer, which passes explicit values down to the pipeline.

/// Environment variable names
pub mod env_config;

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READY_CHECK: &str = "/ready";
    /// Upstream LLM health endpoint
    pub const LLM_HEALTH_CHECK: &str = "/health/llm";
    /// Workout generation endpoint
    pub const WORKOUT: &str = "/api/workout";
    /// Response header naming where the workout came from
    pub const WORKOUT_SOURCE_HEADER: &str = "x-workout-source";
}

/// Network defaults
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default Ollama server
    pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
    /// Default OpenAI-compatible endpoint (Ollama's /v1 surface)
    pub const DEFAULT_OPENAI_COMPATIBLE_BASE_URL: &str = "http://localhost:11434/v1";
    /// AWS region used for Bedrock when `REGION` is unset
    pub const DEFAULT_BEDROCK_REGION: &str = "us-east-1";
    /// Connect timeout for upstream LLM calls
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Workout generation defaults
pub mod generation {
    /// Default Ollama model
    pub const DEFAULT_MODEL: &str = "llama3.1:latest";
    /// Exercises requested when the prompt names no count
    pub const DEFAULT_EXERCISE_COUNT: u32 = 5;
    /// Floor for the completion token budget
    pub const MIN_TOKEN_LIMIT: u32 = 800;
    /// Budgeted tokens per requested exercise
    pub const TOKENS_PER_EXERCISE: u32 = 150;
    /// Fixed token overhead for the workout envelope
    pub const TOKEN_OVERHEAD: u32 = 300;
    /// Sampling temperature, kept low for rule-following output
    pub const DEFAULT_TEMPERATURE: f32 = 0.2;
    /// Nucleus sampling parameter
    pub const DEFAULT_TOP_P: f32 = 0.9;
    /// Repetition penalty
    pub const DEFAULT_REPEAT_PENALTY: f32 = 1.2;
    /// Anthropic messages API version accepted by Bedrock
    pub const BEDROCK_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
}

/// Post-processing defaults
pub mod post_processing {
    /// Exercise count below which the workout is topped up
    pub const MIN_VIABLE_EXERCISES: usize = 3;
    /// Maximum exercises in a fallback workout
    pub const FALLBACK_EXERCISE_CAP: usize = 8;
    /// Name used when no muscle group was requested
    pub const GENERIC_WORKOUT_NAME: &str = "Custom Workout";
    /// Suffix appended to targeted workout names
    pub const FOCUSED_WORKOUT_SUFFIX: &str = "Focused Workout";
    /// Muscle names joined into a workout title
    pub const MAX_MUSCLES_IN_NAME: usize = 2;
}
