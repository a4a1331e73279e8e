// ABOUTME: Route handler for the admin password reset endpoint
// ABOUTME: Hands the raw Authorization header and body to the reset service
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Admin password reset routes
//!
//! The body is taken as raw bytes rather than `Json<T>` so that a malformed
//! body from an unauthenticated caller is still answered with `401`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::errors::AppError;
use crate::services::PasswordResetService;

/// Primary path of the reset endpoint
pub const RESET_PASSWORD_PATH: &str = "/admin/reset-password";

/// Path used by the serverless deployment
pub const FUNCTIONS_RESET_PASSWORD_PATH: &str = "/functions/v1/admin-reset-password";

/// Password reset routes handler
pub struct PasswordResetRoutes;

impl PasswordResetRoutes {
    /// Create the reset routes
    pub fn routes(service: Arc<PasswordResetService>) -> Router {
        Router::new()
            .route(RESET_PASSWORD_PATH, post(Self::handle_reset))
            .route(FUNCTIONS_RESET_PASSWORD_PATH, post(Self::handle_reset))
            .with_state(service)
    }

    /// Handle POST /admin/reset-password
    async fn handle_reset(
        State(service): State<Arc<PasswordResetService>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        // A header that is not visible ASCII is treated as malformed, not absent
        let auth_header = headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default());

        let response = service.reset_password(auth_header, &body).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
