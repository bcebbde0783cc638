// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID spans and CORS configuration for the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration
pub mod cors;
/// Request tracing spans
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_request_span, request_trace_layer, REQUEST_ID_HEADER};
