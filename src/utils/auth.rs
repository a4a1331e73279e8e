// ABOUTME: Bearer token extraction from Authorization header values
// ABOUTME: Maps every malformed or missing header to an unauthenticated error
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use backoffice_core::constants::messages;

use crate::errors::{AppError, AppResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract bearer token from an Authorization header string
///
/// # Errors
///
/// Returns `AuthInvalid` if:
/// - the header doesn't start with `Bearer `
/// - the token is empty after trimming
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    let token = auth_header
        .strip_prefix(BEARER_PREFIX)
        .ok_or_else(|| AppError::auth_invalid(messages::INVALID_AUTH_HEADER))?
        .trim();

    if token.is_empty() {
        return Err(AppError::auth_invalid(messages::INVALID_AUTH_HEADER));
    }

    Ok(token)
}

/// Extract bearer token from an optional Authorization header
///
/// # Errors
///
/// Returns `AuthRequired` if the header is absent, otherwise the errors of
/// [`extract_bearer_token`].
pub fn extract_bearer_token_from_option(auth_header: Option<&str>) -> AppResult<&str> {
    let header = auth_header.ok_or_else(|| AppError::auth_required(messages::MISSING_AUTH_HEADER))?;
    extract_bearer_token(header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer test_token").unwrap(), "test_token");
        assert_eq!(
            extract_bearer_token("Bearer   spaced_token   ").unwrap(),
            "spaced_token"
        );
        assert!(extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(extract_bearer_token("bearer lowercase").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("").is_err());
    }

    #[test]
    fn test_missing_header_is_auth_required() {
        let err = extract_bearer_token_from_option(None).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.http_status(), 401);

        let err = extract_bearer_token_from_option(Some("Token abc")).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthInvalid);
    }
}
