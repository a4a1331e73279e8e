// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains bearer-token parsing and outbound HTTP client construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

/// Authorization header parsing
pub mod auth;
/// HTTP client configuration and helpers
pub mod http_client;
