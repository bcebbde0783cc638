// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Creates one span per HTTP request carrying a request ID, method, and path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;
use uuid::Uuid;

/// Header carrying a caller-supplied request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span constructor type used by [`request_trace_layer`]
pub type MakeRequestSpan = fn(&Request<Body>) -> Span;

/// Response hook type used by [`request_trace_layer`]
pub type OnRequestResponse = fn(&Response<Body>, Duration, &Span);

/// Trace layer producing an `http_request` span per request
#[must_use]
pub fn request_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeRequestSpan,
    tower_http::trace::DefaultOnRequest,
    OnRequestResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(create_request_span as MakeRequestSpan)
        .on_response(record_response as OnRequestResponse)
}

/// Create a tracing span for an HTTP request
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| format!("req_{}", Uuid::new_v4().simple()), str::to_owned);

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

fn record_response(response: &Response<Body>, latency: Duration, span: &Span) {
    span.record("status_code", response.status().as_u16());
    span.record(
        "duration_ms",
        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
    );
    tracing::debug!("finished processing request");
}
