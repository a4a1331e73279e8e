// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging setup, seeded in-memory stores, router construction, and request helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `travel_backoffice`

use std::sync::{Arc, Once};

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use travel_backoffice::{
    config::{CorsConfig, ServerConfig},
    identity::InMemoryIdentityStore,
    models::PasswordPolicy,
    server::{build_router, AppState},
    services::PasswordResetService,
};

static INIT_LOGGER: Once = Once::new();

/// Bearer token of the seeded administrator
pub const ADMIN_TOKEN: &str = "admin-token";
/// Bearer token of the seeded super administrator
pub const SUPER_ADMIN_TOKEN: &str = "super-admin-token";
/// Bearer token of the seeded travel agent
pub const AGENT_TOKEN: &str = "agent-token";
/// Bearer token of a user with no profile row
pub const NO_PROFILE_TOKEN: &str = "no-profile-token";
/// Target account whose password gets reset
pub const TARGET_USER: &str = "target-user";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Store with one account of each kind
pub fn seeded_store() -> Arc<InMemoryIdentityStore> {
    Arc::new(
        InMemoryIdentityStore::new()
            .with_user("admin-1", Some("admin@agency.test"), Some("admin"))
            .with_token(ADMIN_TOKEN, "admin-1")
            .with_user("root-1", Some("root@agency.test"), Some("super_admin"))
            .with_token(SUPER_ADMIN_TOKEN, "root-1")
            .with_user("agent-1", Some("agent@agency.test"), Some("agent"))
            .with_token(AGENT_TOKEN, "agent-1")
            .with_user_without_profile("ghost-1", Some("ghost@agency.test"))
            .with_token(NO_PROFILE_TOKEN, "ghost-1")
            .with_user(TARGET_USER, Some("desk@agency.test"), Some("viewer")),
    )
}

/// Router over a store with the given allowed origins
pub fn router_with_origins(store: &Arc<InMemoryIdentityStore>, origins: &str) -> Router {
    init_test_logging();
    let config = ServerConfig {
        cors: CorsConfig::from_list(origins),
        ..ServerConfig::default()
    };
    let service = PasswordResetService::from_backend(store.clone(), PasswordPolicy::default());
    build_router(AppState::new(&config, service))
}

/// Router over a store allowing any origin
pub fn router(store: &Arc<InMemoryIdentityStore>) -> Router {
    router_with_origins(store, "")
}

/// `POST` request to the reset endpoint
pub fn reset_request(token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/admin/reset-password")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

/// JSON body for a reset of [`TARGET_USER`]
pub fn reset_body(password: &str) -> String {
    serde_json::json!({ "user_id": TARGET_USER, "new_password": password }).to_string()
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
