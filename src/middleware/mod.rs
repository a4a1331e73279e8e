// ABOUTME: HTTP middleware for CORS negotiation and request tracing
// ABOUTME: Provides preflight handling, allow-list origin echoing, and request spans
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

/// Allow-list CORS headers and preflight responses
pub mod cors;
/// Request and upstream-call tracing spans
pub mod tracing;

pub use cors::{cors_middleware, CorsPolicy};
pub use tracing::{create_request_span, create_upstream_span};
