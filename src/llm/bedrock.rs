// ABOUTME: Amazon Bedrock provider invoking Anthropic models through InvokeModel
// ABOUTME: Builds the Anthropic messages body and maps SDK failures onto upstream error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Bedrock Provider
//!
//! ## Configuration
//!
//! - `BEDROCK_MODEL_ID`: Model identifier (required)
//! - `REGION`: AWS region (default: `us-east-1`)
//!
//! Credentials come from the standard AWS chain (environment, profile, or
//! instance role). The SDK client is built on first use.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use fitflow_core::constants::generation::BEDROCK_ANTHROPIC_VERSION;
use fitflow_core::constants::network::CONNECT_TIMEOUT_SECS;
use fitflow_core::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error, instrument};

use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole, TokenUsage};

const SERVICE_NAME: &str = "Bedrock";

/// Completion budget when the request sets none
const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Bedrock connection settings
#[derive(Debug, Clone)]
pub struct BedrockConfig {
    /// Model identifier such as `anthropic.claude-3-5-sonnet-20240620-v1:0`
    pub model_id: String,
    /// AWS region
    pub region: String,
    /// Operation timeout; `None` keeps the SDK default
    pub request_timeout: Option<Duration>,
}

/// Amazon Bedrock provider for Anthropic models
pub struct BedrockProvider {
    config: BedrockConfig,
    client: OnceCell<Client>,
}

impl BedrockProvider {
    /// Create a provider; the AWS client is resolved lazily
    #[must_use]
    pub fn new(config: BedrockConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| async {
                let mut timeouts =
                    TimeoutConfig::builder().connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
                if let Some(timeout) = self.config.request_timeout {
                    timeouts = timeouts.operation_timeout(timeout);
                }
                let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                    .region(Region::new(self.config.region.clone()))
                    .timeout_config(timeouts.build())
                    .load()
                    .await;
                debug!(region = %self.config.region, "Initialized Bedrock runtime client");
                Client::new(&sdk_config)
            })
            .await
    }
}

#[async_trait]
impl LlmProvider for BedrockProvider {
    fn name(&self) -> &'static str {
        "bedrock"
    }

    fn display_name(&self) -> &'static str {
        "Amazon Bedrock"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        &self.config.model_id
    }

    #[instrument(skip(self, request), fields(model = %self.config.model_id))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.config.model_id);
        let body = serde_json::to_vec(&AnthropicRequest::from_chat(request)).map_err(|e| {
            AppError::internal(format!("Failed to encode Bedrock request: {e}"))
        })?;

        let output = self
            .client()
            .await
            .invoke_model()
            .model_id(model)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| invoke_error(&e))?;

        parse_response(output.body().as_ref(), model)
    }

    /// Bedrock runtime has no probe endpoint; a client with a resolved region counts as ready
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(self.client().await.config().region().is_some())
    }
}

// ============================================================================
// Anthropic Messages Body
// ============================================================================

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    anthropic_version: &'static str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> AnthropicRequest<'a> {
    fn from_chat(request: &'a ChatRequest) -> Self {
        let system = request.content_for(MessageRole::System);
        Self {
            anthropic_version: BEDROCK_ANTHROPIC_VERSION,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature,
            system: (!system.is_empty()).then_some(system),
            messages: request
                .messages
                .iter()
                .filter(|m| m.role != MessageRole::System)
                .map(|m| AnthropicMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

fn parse_response(body: &[u8], model: &str) -> Result<ChatResponse, AppError> {
    let response: AnthropicResponse = serde_json::from_slice(body).map_err(|e| {
        AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
    })?;

    let content = response
        .content
        .iter()
        .filter(|block| block.kind == "text")
        .map(|block| block.text.as_str())
        .collect::<String>();
    if content.is_empty() {
        return Err(AppError::external_service(
            SERVICE_NAME,
            "Response contained no text content",
        ));
    }

    Ok(ChatResponse {
        content,
        model: response.model.unwrap_or_else(|| model.to_owned()),
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.input_tokens,
            completion_tokens: u.output_tokens,
            total_tokens: u.input_tokens + u.output_tokens,
        }),
        finish_reason: response.stop_reason,
    })
}

// ============================================================================
// Error Mapping
// ============================================================================

fn invoke_error(err: &SdkError<InvokeModelError>) -> AppError {
    let detail = DisplayErrorContext(err).to_string();
    error!("Bedrock InvokeModel failed: {detail}");
    match err {
        SdkError::TimeoutError(_) => AppError::external_unavailable(SERVICE_NAME, "Request timed out"),
        SdkError::DispatchFailure(_) => {
            AppError::external_unavailable(SERVICE_NAME, format!("Cannot reach Bedrock: {detail}"))
        }
        SdkError::ServiceError(context) => {
            let service_error = context.err();
            AppError::new(
                service_error_code(service_error.code()),
                format!(
                    "{SERVICE_NAME}: {}",
                    service_error.message().unwrap_or("service error")
                ),
            )
        }
        _ => AppError::external_service(SERVICE_NAME, detail),
    }
}

/// Error code for a Bedrock service exception name
fn service_error_code(code: Option<&str>) -> ErrorCode {
    match code {
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "ExpiredTokenException"
            | "InvalidSignatureException",
        ) => ErrorCode::ExternalAuthFailed,
        Some("ThrottlingException" | "ServiceQuotaExceededException") => {
            ErrorCode::ExternalRateLimited
        }
        Some("ServiceUnavailableException" | "ModelNotReadyException" | "ModelTimeoutException") => {
            ErrorCode::ExternalServiceUnavailable
        }
        _ => ErrorCode::ExternalServiceError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn test_request_body_uses_anthropic_messages_shape() {
        let request = ChatRequest::new(vec![
            ChatMessage::system("You are a trainer."),
            ChatMessage::user("USER REQUEST: chest day"),
        ])
        .with_temperature(0.2)
        .with_max_tokens(1050);

        let body = serde_json::to_value(AnthropicRequest::from_chat(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 1050,
                "temperature": 0.2_f32,
                "system": "You are a trainer.",
                "messages": [{"role": "user", "content": "USER REQUEST: chest day"}]
            })
        );
    }

    #[test]
    fn test_request_body_defaults_token_budget() {
        let request = ChatRequest::new(vec![ChatMessage::user("legs")]);
        let body = serde_json::to_value(AnthropicRequest::from_chat(&request)).unwrap();
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
        assert!(body.get("system").is_none());
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_parse_response_joins_text_blocks() {
        let body = br#"{
            "content": [{"type": "text", "text": "{\"name\":"}, {"type": "text", "text": "\"Leg Day\"}"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 40, "output_tokens": 12}
        }"#;
        let response = parse_response(body, "anthropic.claude-test").unwrap();
        assert_eq!(response.content, r#"{"name":"Leg Day"}"#);
        assert_eq!(response.model, "anthropic.claude-test");
        assert_eq!(response.finish_reason.as_deref(), Some("end_turn"));
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(52));
    }

    #[test]
    fn test_parse_response_without_text_is_error() {
        let err = parse_response(br#"{"content": []}"#, "m").unwrap_err();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert!(parse_response(b"not json", "m").is_err());
    }

    #[test]
    fn test_service_error_codes() {
        assert_eq!(
            service_error_code(Some("AccessDeniedException")),
            ErrorCode::ExternalAuthFailed
        );
        assert_eq!(
            service_error_code(Some("ThrottlingException")),
            ErrorCode::ExternalRateLimited
        );
        assert_eq!(
            service_error_code(Some("ModelNotReadyException")),
            ErrorCode::ExternalServiceUnavailable
        );
        assert_eq!(
            service_error_code(Some("ValidationException")),
            ErrorCode::ExternalServiceError
        );
        assert_eq!(service_error_code(None), ErrorCode::ExternalServiceError);
    }

    #[test]
    fn test_timeout_maps_to_unavailable() {
        let err = SdkError::<InvokeModelError>::timeout_error("deadline exceeded");
        assert_eq!(invoke_error(&err).code, ErrorCode::ExternalServiceUnavailable);
    }
}
