// ABOUTME: Configuration type definitions for upstream LLM provider selection
// ABOUTME: Contains the LlmProviderType enum parsed from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

use fitflow_core::constants::env_config;
use serde::{Deserialize, Serialize};

/// Upstream backend that produces raw workouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LlmProviderType {
    /// Native Ollama generate API (default)
    #[default]
    Ollama,
    /// `OpenAI`-compatible chat completions endpoint (vLLM, `LocalAI`, Ollama /v1)
    Local,
    /// Remote workout endpoint that already returns workout JSON
    WorkoutApi,
    /// Amazon Bedrock `InvokeModel` with an Anthropic messages body
    Bedrock,
}

impl LlmProviderType {
    /// Environment variable name for provider selection
    pub const ENV_VAR: &'static str = env_config::LLM_PROVIDER;

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "local" | "openai" | "openai-compatible" | "vllm" | "localai" => Self::Local,
            "workout-api" | "workout_api" | "remote" => Self::WorkoutApi,
            "bedrock" | "aws-bedrock" => Self::Bedrock,
            _ => Self::Ollama, // Default fallback (including "ollama")
        }
    }

    /// Load from environment variable
    #[must_use]
    pub fn from_env() -> Self {
        env::var(Self::ENV_VAR)
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }
}

impl Display for LlmProviderType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::Local => write!(f, "local"),
            Self::WorkoutApi => write!(f, "workout-api"),
            Self::Bedrock => write!(f, "bedrock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parsing() {
        assert_eq!(LlmProviderType::from_str_or_default("OLLAMA"), LlmProviderType::Ollama);
        assert_eq!(LlmProviderType::from_str_or_default("vllm"), LlmProviderType::Local);
        assert_eq!(
            LlmProviderType::from_str_or_default("workout-api"),
            LlmProviderType::WorkoutApi
        );
        assert_eq!(LlmProviderType::from_str_or_default("Bedrock"), LlmProviderType::Bedrock);
        assert_eq!(LlmProviderType::from_str_or_default("gemini"), LlmProviderType::Ollama);
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        for provider in [
            LlmProviderType::Ollama,
            LlmProviderType::Local,
            LlmProviderType::WorkoutApi,
            LlmProviderType::Bedrock,
        ] {
            assert_eq!(LlmProviderType::from_str_or_default(&provider.to_string()), provider);
        }
    }
}
