// ABOUTME: Provider that forwards workout requests to a remote workout generation endpoint
// ABOUTME: The remote service owns prompting and returns the workout JSON body directly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use async_trait::async_trait;
use fitflow_core::errors::AppError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::http::{build_client, read_error, send_error, status_error};
use super::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider, MessageRole};

const SERVICE_NAME: &str = "WorkoutAPI";

#[derive(Debug, Serialize)]
struct WorkoutApiRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferences: Option<&'a Value>,
}

/// Remote workout endpoint provider
///
/// Sends `{prompt, preferences}` and hands the response body back unchanged
/// as completion content, so the regular parser and post-processor apply.
pub struct WorkoutApiProvider {
    client: Client,
    endpoint: String,
}

impl WorkoutApiProvider {
    /// Create a provider posting to `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new(endpoint: impl Into<String>, request_timeout: Option<Duration>) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(request_timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint receiving workout requests
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LlmProvider for WorkoutApiProvider {
    fn name(&self) -> &'static str {
        "workout-api"
    }

    fn display_name(&self) -> &'static str {
        "Remote Workout API"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::WORKOUT_JSON
    }

    fn default_model(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let prompt = request.content_for(MessageRole::User);
        let body = WorkoutApiRequest {
            prompt: &prompt,
            preferences: request.metadata.as_ref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error(SERVICE_NAME, &self.endpoint, &e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| read_error(SERVICE_NAME, &e))?;

        if !status.is_success() {
            return Err(status_error(SERVICE_NAME, status, &text));
        }

        debug!("Received {} bytes from workout API", text.len());

        Ok(ChatResponse {
            content: text,
            model: self.default_model().to_owned(),
            usage: None,
            finish_reason: None,
        })
    }

    /// The remote service exposes no dedicated probe, so any HTTP answer counts as reachable
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .head(&self.endpoint)
            .send()
            .await
            .map_err(|e| send_error(SERVICE_NAME, &self.endpoint, &e))?;

        Ok(!response.status().is_server_error())
    }
}
