// ABOUTME: Outbound HTTP client construction with configured timeouts
// ABOUTME: Used by the hosted identity backend client for all upstream calls
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::warn;

use crate::config::HttpClientConfig;

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build configured HTTP client, using defaults");
            Client::new()
        })
}

/// Create the upstream client from configuration
#[must_use]
pub fn upstream_client(config: &HttpClientConfig) -> Client {
    create_client_with_timeout(config.timeout_secs, config.connect_timeout_secs)
}
