// ABOUTME: Native Ollama provider using the /api/generate completion endpoint
// ABOUTME: Sends a system prompt plus user prompt with sampling options and reads the response field
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ollama Provider
//!
//! Talks to a local or remote Ollama daemon through its native generate API
//! rather than the `OpenAI` compatibility layer, so sampling options like
//! `repeat_penalty` and `num_predict` can be set directly.
//!
//! ## Configuration
//!
//! - `OLLAMA_BASE_URL`: Daemon URL (default: `http://localhost:11434`)
//! - `OLLAMA_MODEL`: Model tag (default: `llama3.1:latest`)

use std::time::Duration;

use async_trait::async_trait;
use fitflow_core::constants::generation::{
    DEFAULT_MODEL, DEFAULT_REPEAT_PENALTY, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};
use fitflow_core::constants::network::DEFAULT_OLLAMA_BASE_URL;
use fitflow_core::errors::AppError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::http::{api_url, build_client, read_error, send_error, status_error};
use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage};

const SERVICE_NAME: &str = "Ollama";
const GENERATE_ENDPOINT: &str = "api/generate";
const TAGS_ENDPOINT: &str = "api/tags";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
    repeat_penalty: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    model: Option<String>,
    response: String,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

impl GenerateResponse {
    fn usage(&self) -> Option<TokenUsage> {
        match (self.prompt_eval_count, self.eval_count) {
            (Some(prompt_tokens), Some(completion_tokens)) => Some(TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
            _ => None,
        }
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Connection settings for an Ollama daemon
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL without the `/api` suffix
    pub base_url: String,
    /// Model tag used when the request names none
    pub default_model: String,
    /// Nucleus sampling cutoff
    pub top_p: f32,
    /// Penalty applied to repeated tokens
    pub repeat_penalty: f32,
    /// Optional whole-request timeout
    pub request_timeout: Option<Duration>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_BASE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
            top_p: DEFAULT_TOP_P,
            repeat_penalty: DEFAULT_REPEAT_PENALTY,
            request_timeout: None,
        }
    }
}

/// Native Ollama generate API provider
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a provider from explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(config: OllamaConfig) -> Result<Self, AppError> {
        let client = build_client(config.request_timeout)?;
        Ok(Self { client, config })
    }

    /// Base URL of the daemon this provider talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    fn display_name(&self) -> &'static str {
        "Ollama"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::JSON_MODE
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    #[instrument(skip(self, request), fields(model = request.model.as_deref().unwrap_or(&self.config.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let system = request.content_for(MessageRole::System);
        let prompt = request.content_for(MessageRole::User);

        let body = GenerateRequest {
            model,
            system: &system,
            prompt: &prompt,
            stream: false,
            format: request.json_mode.then_some("json"),
            options: GenerateOptions {
                temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
                top_p: self.config.top_p,
                repeat_penalty: self.config.repeat_penalty,
                num_predict: request.max_tokens,
            },
        };

        debug!(
            "Sending generate request to Ollama: {} prompt chars",
            prompt.len()
        );

        let response = self
            .client
            .post(api_url(&self.config.base_url, GENERATE_ENDPOINT))
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(SERVICE_NAME, &self.config.base_url, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| read_error(SERVICE_NAME, &e))?;

        if !status.is_success() {
            return Err(status_error(SERVICE_NAME, status, &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::external_service(
                SERVICE_NAME,
                format!("Failed to parse generate response: {e}"),
            )
        })?;

        debug!(
            "Received Ollama response: {} chars, done_reason={:?}",
            parsed.response.len(),
            parsed.done_reason
        );

        let usage = parsed.usage();
        Ok(ChatResponse {
            content: parsed.response,
            model: parsed.model.unwrap_or_else(|| model.to_owned()),
            usage,
            finish_reason: parsed.done_reason,
        })
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .get(api_url(&self.config.base_url, TAGS_ENDPOINT))
            .send()
            .await
            .map_err(|e| send_error(SERVICE_NAME, &self.config.base_url, &e))?;

        let healthy = response.status().is_success();
        debug!("Ollama health check: {}", if healthy { "OK" } else { "FAILED" });
        Ok(healthy)
    }
}
