// ABOUTME: Domain service layer for business logic kept out of route handlers
// ABOUTME: Hosts the admin password reset procedure
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Domain service layer
//!
//! Services depend only on the identity traits, so they run the same against
//! the hosted backend and the in-memory store.

/// Admin password reset: authenticate, authorize, validate, mutate
pub mod password_reset;

pub use password_reset::{AuthorizedAdmin, PasswordResetService, ResetCommand};
