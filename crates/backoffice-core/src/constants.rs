// ABOUTME: Application-wide constants for the back-office admin service
// ABOUTME: Error messages, password policy defaults, header names, and service identifiers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

/// Caller-facing error messages of the reset procedure
pub mod messages {
    /// No `Authorization` header
    pub const MISSING_AUTH_HEADER: &str = "Missing authorization header";
    /// `Authorization` header is not `Bearer <token>`
    pub const INVALID_AUTH_HEADER: &str = "Invalid authorization header format";
    /// Token could not be resolved to a user
    pub const UNAUTHORIZED: &str = "Unauthorized";
    /// Caller is not an administrator
    pub const ADMIN_REQUIRED: &str = "Forbidden - Admin access required";
    /// Body lacks `user_id` or `new_password`
    pub const MISSING_FIELDS: &str = "Missing user_id or new_password";
    /// Body is not valid JSON
    pub const INVALID_JSON: &str = "Invalid JSON body";
    /// Fallback when the identity provider gives no reason
    pub const PASSWORD_UPDATE_FAILED: &str = "Failed to update password";
    /// Fallback when a profile read fails without a reason
    pub const PROFILE_LOOKUP_FAILED: &str = "Failed to load profile";
    /// Fallback when the profile store gives no reason
    pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile";
}

/// Password policy defaults
pub mod password {
    /// Minimum password length in characters
    pub const DEFAULT_MIN_LENGTH: usize = 8;
    /// Require at least one digit
    pub const DEFAULT_REQUIRE_DIGIT: bool = true;
}

/// HTTP header names used outside the standard set
pub mod headers {
    /// Hosted backend API key header
    pub const APIKEY: &str = "apikey";
    /// Client info header sent by the hosted backend's JS client
    pub const X_CLIENT_INFO: &str = "x-client-info";
    /// PostgREST response preference header
    pub const PREFER: &str = "prefer";
    /// Request correlation header
    pub const X_REQUEST_ID: &str = "x-request-id";
    /// Request headers the admin UI's client sends on cross-origin calls
    pub const CORS_ALLOW_HEADERS: [&str; 4] =
        ["authorization", X_CLIENT_INFO, APIKEY, "content-type"];
}

/// Service identifiers for logging
pub mod service_names {
    /// Default service name
    pub const BACKOFFICE_SERVER: &str = "travel-backoffice";
}
