// ABOUTME: Unified error type and error codes for the back-office admin service
// ABOUTME: Maps the reset procedure's failure taxonomy onto HTTP status codes and JSON bodies
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! # Unified Error Handling
//!
//! Every fallible operation in the service returns [`AppResult`]. An
//! [`AppError`] carries a machine-readable [`ErrorCode`] (which decides the
//! HTTP status) and a human-readable message (which becomes the `error`
//! field of the JSON response body).
//!
//! | Failure class    | Codes                                     | Status |
//! |------------------|-------------------------------------------|--------|
//! | Unauthenticated  | `AuthRequired`, `AuthInvalid`             | 401    |
//! | Forbidden        | `PermissionDenied`                        | 403    |
//! | Bad request      | `InvalidInput`, `MissingRequiredField`    | 400    |
//! | Upstream failure | `ExternalServiceError`                    | 400    |
//! | Server side      | `Config*`, `InternalError`                | 500    |

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No credential was presented
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// A credential was presented but could not be resolved to a user
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid,
    /// The caller is authenticated but lacks the required role
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied,

    // Validation
    /// Input failed validation (e.g. password policy)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A required request field is absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField,

    // External Services
    /// The identity provider or profile store rejected or failed a call
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,

    // Configuration
    /// A required configuration value is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// A configuration value could not be parsed
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    // Internal
    /// Unexpected server-side failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error
    ///
    /// Upstream failures map to `400`; the admin UI only distinguishes
    /// `401`, `403`, and everything else.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::AuthRequired | Self::AuthInvalid => 401,
            Self::PermissionDenied => 403,
            Self::InvalidInput | Self::MissingRequiredField | Self::ExternalServiceError => 400,
            Self::ConfigMissing | Self::ConfigInvalid | Self::InternalError => 500,
        }
    }

    /// Short description of this error class
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required",
            Self::AuthInvalid => "The provided credentials are invalid",
            Self::PermissionDenied => "Insufficient privileges",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ExternalServiceError => "An upstream service call failed",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
        }
    }

    /// Whether this code belongs to the unauthenticated class
    #[must_use]
    pub const fn is_unauthenticated(self) -> bool {
        matches!(self, Self::AuthRequired | Self::AuthInvalid)
    }
}

/// Unified error type for the service
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message, returned to the caller verbatim
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new error with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Attach a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Authentication required (no credential presented)
    pub fn auth_required(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthRequired, message)
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authenticated but not permitted
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing required request field(s)
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MissingRequiredField, message)
    }

    /// Identity provider or profile store failure
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExternalServiceError, message)
    }

    /// Missing configuration value
    pub fn config_missing(key: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("Required environment variable {key} is not set"),
        )
    }

    /// Invalid configuration value
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// JSON error body: `{"error": "<message>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: error.message.clone(),
        }
    }
}

#[cfg(feature = "upstream-errors")]
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "Upstream request timed out".to_owned()
        } else if error.is_connect() {
            "Failed to connect to upstream service".to_owned()
        } else {
            format!("Upstream request failed: {error}")
        };
        Self::upstream(message).with_source(error)
    }
}

#[cfg(feature = "http-response")]
mod http_response {
    use axum::response::{IntoResponse, Response};
    use axum::Json;
    use http::StatusCode;

    use super::{AppError, ErrorResponse};

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = StatusCode::from_u16(self.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            if status.is_server_error() {
                tracing::error!(code = ?self.code, error = %self, "Request failed");
            }
            (status, Json(ErrorResponse::from(&self))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(ErrorCode::AuthRequired.http_status(), 401);
        assert_eq!(ErrorCode::AuthInvalid.http_status(), 401);
        assert_eq!(ErrorCode::PermissionDenied.http_status(), 403);
        assert_eq!(ErrorCode::InvalidInput.http_status(), 400);
        assert_eq!(ErrorCode::MissingRequiredField.http_status(), 400);
        assert_eq!(ErrorCode::ExternalServiceError.http_status(), 400);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_error_response_uses_message_only() {
        let error = AppError::forbidden("Forbidden - Admin access required");
        let body = serde_json::to_value(ErrorResponse::from(&error)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Forbidden - Admin access required" })
        );
    }

    #[test]
    fn test_display_includes_description() {
        let error = AppError::upstream("User not found");
        assert_eq!(
            error.to_string(),
            "An upstream service call failed: User not found"
        );
    }

    #[test]
    fn test_config_missing_names_variable() {
        let error = AppError::config_missing("SUPABASE_URL");
        assert_eq!(error.code, ErrorCode::ConfigMissing);
        assert!(error.message.contains("SUPABASE_URL"));
    }
}
