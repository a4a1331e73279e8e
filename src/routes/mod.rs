// ABOUTME: Route module organization for the travel back-office HTTP endpoints
// ABOUTME: Groups the admin password reset endpoint and health checks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Route module for the back-office server
//!
//! Each module holds route definitions and thin handlers that delegate to
//! the service layer.

/// Health check and readiness routes
pub mod health;
/// Admin password reset route
pub mod password_reset;

/// Health check route handlers
pub use health::HealthRoutes;
/// Password reset route handlers
pub use password_reset::PasswordResetRoutes;
