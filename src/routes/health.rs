// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints for load balancers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Health check routes for service monitoring

use axum::{routing::get, Json, Router};
use backoffice_core::constants::service_names;
use serde::{Deserialize, Serialize};

/// Body of `/health` and `/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `healthy` or `ready`
    pub status: String,
    /// Service name
    pub service: String,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl HealthStatus {
    fn now(status: &str) -> Self {
        Self {
            status: status.to_owned(),
            service: service_names::BACKOFFICE_SERVER.to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes<S>() -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
    }

    async fn handle_health() -> Json<HealthStatus> {
        Json(HealthStatus::now("healthy"))
    }

    async fn handle_ready() -> Json<HealthStatus> {
        Json(HealthStatus::now("ready"))
    }
}
