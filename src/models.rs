// ABOUTME: Identity, profile, and reset request models re-exported from backoffice-core
// ABOUTME: Shared vocabulary for identity backends, services, and route handlers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

pub use backoffice_core::models::*;
pub use backoffice_core::password::PasswordPolicy;
