// ABOUTME: Shared HTTP plumbing for upstream LLM providers
// ABOUTME: Client construction and mapping of transport and status failures to AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use fitflow_core::constants::network::CONNECT_TIMEOUT_SECS;
use fitflow_core::errors::{AppError, ErrorCode};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::error;

/// Longest body excerpt copied into error messages
const ERROR_BODY_PREVIEW_CHARS: usize = 200;

/// Build an HTTP client; without a timeout the request may wait indefinitely
pub(super) fn build_client(request_timeout: Option<Duration>) -> Result<Client, AppError> {
    let mut builder = Client::builder().connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS));
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {e}")))
}

/// Map a failed send to an upstream error
pub(super) fn send_error(service: &str, base_url: &str, err: &reqwest::Error) -> AppError {
    error!("Failed to send request to {service}: {err}");
    if err.is_connect() {
        AppError::external_unavailable(
            service,
            format!("Cannot connect to {service}. Is the server running at {base_url}?"),
        )
    } else if err.is_timeout() {
        AppError::external_unavailable(service, "Request timed out")
    } else {
        AppError::external_service(service, format!("Request failed: {err}"))
    }
}

/// Map a failed body read to an upstream error
pub(super) fn read_error(service: &str, err: &reqwest::Error) -> AppError {
    error!("Failed to read response from {service}: {err}");
    AppError::external_service(service, format!("Failed to read response: {err}"))
}

/// Error body shapes used by Ollama (`{"error": "..."}`) and `OpenAI`-style servers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UpstreamErrorBody {
    Detailed { error: UpstreamErrorDetail },
    Plain { error: String },
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

/// Map a non-success status to an upstream error
pub(super) fn status_error(service: &str, status: StatusCode, body: &str) -> AppError {
    let message = match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(UpstreamErrorBody::Detailed { error }) => error.message,
        Ok(UpstreamErrorBody::Plain { error }) => error,
        Err(_) => body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect(),
    };

    AppError::new(
        status_error_code(status.as_u16()),
        format!("{service}: API error ({status}): {message}"),
    )
}

/// Error code for a non-success upstream HTTP status
pub(super) const fn status_error_code(status: u16) -> ErrorCode {
    match status {
        401 | 403 => ErrorCode::ExternalAuthFailed,
        429 => ErrorCode::ExternalRateLimited,
        502..=504 => ErrorCode::ExternalServiceUnavailable,
        _ => ErrorCode::ExternalServiceError,
    }
}

/// Join a base URL and an endpoint path
pub(super) fn api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
