// ABOUTME: Request tracing spans for correlation and structured logging
// ABOUTME: Creates one span per HTTP request and one per upstream backend call
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use axum::body::Body;
use backoffice_core::constants::headers;
use http::Request;
use tracing::Span;

/// Create a tracing span for an HTTP request
///
/// Used as the `make_span_with` hook of the server's `TraceLayer`. The
/// request ID is read from the `x-request-id` header set by the request-id
/// layer that runs before it.
pub fn create_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(headers::X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        caller_id = tracing::field::Empty,
        target_user_id = tracing::field::Empty,
    )
}

/// Create a tracing span for a call to the identity backend
pub fn create_upstream_span(operation: &str, resource: &str) -> Span {
    tracing::debug_span!(
        "upstream_call",
        operation = %operation,
        resource = %resource,
    )
}
