// ABOUTME: Data models for caller identities, staff profiles, and reset requests
// ABOUTME: Shared by the identity backends, the reset service, and the HTTP layer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use serde::{Deserialize, Serialize};

use crate::permissions::UserRole;

/// Identity resolved from a bearer token by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Opaque user identifier
    pub id: String,
    /// Email on the identity record, if any
    #[serde(default)]
    pub email: Option<String>,
}

/// Staff profile row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same identifier as the identity-provider user
    pub id: String,
    /// Raw stored role; may be null or hold a value outside [`UserRole`]
    #[serde(default)]
    pub role: Option<String>,
    /// Set when an administrator has replaced the user's password
    #[serde(default)]
    pub requires_password_reset: bool,
}

impl Profile {
    /// Stored role, if it is one of the known roles
    #[must_use]
    pub fn parsed_role(&self) -> Option<UserRole> {
        self.role.as_deref().and_then(|r| r.parse().ok())
    }

    /// Stored role, if it belongs to the privileged subset
    #[must_use]
    pub fn admin_role(&self) -> Option<UserRole> {
        self.parsed_role().filter(|role| role.is_admin_or_higher())
    }
}

/// Body of an admin password reset call
///
/// Both fields are optional at the type level so that absence is reported
/// with the procedure's own message rather than a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetPasswordRequest {
    /// Target user identifier
    #[serde(default)]
    pub user_id: Option<String>,
    /// Replacement password
    #[serde(default)]
    pub new_password: Option<String>,
}

impl ResetPasswordRequest {
    /// Both fields, if present and non-empty
    #[must_use]
    pub fn fields(&self) -> Option<(&str, &str)> {
        let user_id = self.user_id.as_deref().filter(|s| !s.is_empty())?;
        let new_password = self.new_password.as_deref().filter(|s| !s.is_empty())?;
        Some((user_id, new_password))
    }
}

/// Successful reset acknowledgment: `{"success": true}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    /// Always `true`
    pub success: bool,
}

impl ResetPasswordResponse {
    /// Acknowledgment value
    pub const OK: Self = Self { success: true };
}
