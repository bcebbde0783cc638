// ABOUTME: Unified LLM provider selector for runtime provider switching
// ABOUTME: Wraps the Ollama, OpenAI-compatible, Bedrock, and remote workout API providers behind one type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # LLM Provider Selector
//!
//! ## Configuration
//!
//! Set the `FITFLOW_LLM_PROVIDER` environment variable:
//! - `ollama` (default): Native Ollama generate API
//! - `local` / `openai`: Any `OpenAI`-compatible chat completions server
//! - `workout-api`: Remote workout endpoint (requires `WORKOUT_API_URL`)
//! - `bedrock`: Amazon Bedrock (requires `BEDROCK_MODEL_ID`, optional `REGION`)

use async_trait::async_trait;
use fitflow_core::errors::AppError;
use tracing::info;

use super::{
    BedrockConfig, BedrockProvider, ChatRequest, ChatResponse, LlmCapabilities, LlmProvider,
    OllamaConfig, OllamaProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider,
    WorkoutApiProvider,
};
use crate::config::{LlmConfig, LlmProviderType};

/// Unified chat provider that wraps every supported backend
pub enum ChatProvider {
    /// Native Ollama daemon
    Ollama(OllamaProvider),
    /// `OpenAI`-compatible server (vLLM, `LocalAI`, Ollama `/v1`)
    Local(OpenAiCompatibleProvider),
    /// Remote workout generation endpoint
    WorkoutApi(WorkoutApiProvider),
    /// Amazon Bedrock
    Bedrock(BedrockProvider),
}

impl ChatProvider {
    /// Create the provider selected by configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created, the workout
    /// API provider is selected without an endpoint, or Bedrock is selected
    /// without a model identifier
    pub fn from_config(config: &LlmConfig) -> Result<Self, AppError> {
        info!(
            "Initializing LLM provider: {} (set {} to change)",
            config.provider,
            LlmProviderType::ENV_VAR
        );

        let provider = match config.provider {
            LlmProviderType::Ollama => Self::Ollama(OllamaProvider::new(OllamaConfig {
                base_url: config.ollama_base_url.clone(),
                default_model: config.ollama_model.clone(),
                request_timeout: config.request_timeout,
                ..OllamaConfig::default()
            })?),
            LlmProviderType::Local => {
                Self::Local(OpenAiCompatibleProvider::new(OpenAiCompatibleConfig {
                    base_url: config.local_base_url.clone(),
                    api_key: config.local_api_key.clone(),
                    default_model: config.local_model.clone(),
                    request_timeout: config.request_timeout,
                    ..OpenAiCompatibleConfig::default()
                })?)
            }
            LlmProviderType::WorkoutApi => {
                let endpoint = config.workout_api_url.as_deref().ok_or_else(|| {
                    AppError::config("WORKOUT_API_URL is required for the workout-api provider")
                })?;
                Self::WorkoutApi(WorkoutApiProvider::new(endpoint, config.request_timeout)?)
            }
            LlmProviderType::Bedrock => {
                let model_id = config.bedrock_model_id.clone().ok_or_else(|| {
                    AppError::config("BEDROCK_MODEL_ID is required for the bedrock provider")
                })?;
                Self::Bedrock(BedrockProvider::new(BedrockConfig {
                    model_id,
                    region: config.bedrock_region.clone(),
                    request_timeout: config.request_timeout,
                }))
            }
        };

        info!(
            "Provider {} initialized with model: {}",
            provider.display_name(),
            provider.default_model()
        );
        Ok(provider)
    }

    fn inner(&self) -> &dyn LlmProvider {
        match self {
            Self::Ollama(provider) => provider,
            Self::Local(provider) => provider,
            Self::WorkoutApi(provider) => provider,
            Self::Bedrock(provider) => provider,
        }
    }
}

#[async_trait]
impl LlmProvider for ChatProvider {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn display_name(&self) -> &'static str {
        self.inner().display_name()
    }

    fn capabilities(&self) -> LlmCapabilities {
        self.inner().capabilities()
    }

    fn default_model(&self) -> &str {
        self.inner().default_model()
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.inner().complete(request).await
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        self.inner().health_check().await
    }
}
