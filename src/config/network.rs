// ABOUTME: Network configuration types for CORS and outbound HTTP clients
// ABOUTME: Parses the allowed-origins list and upstream timeout settings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use serde::{Deserialize, Serialize};

use super::environment::{parse_or, EnvLookup};
use crate::errors::AppResult;

/// CORS (Cross-Origin Resource Sharing) configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins; empty means every origin is echoed back
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Build from a comma-separated list such as `ALLOWED_ORIGINS`
    #[must_use]
    pub fn from_list(origins: &str) -> Self {
        Self {
            allowed_origins: parse_origins(origins),
        }
    }

    pub(crate) fn from_lookup(lookup: &EnvLookup<'_>) -> Self {
        Self::from_list(&lookup("ALLOWED_ORIGINS").unwrap_or_default())
    }
}

/// Outbound HTTP client timeout configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl HttpClientConfig {
    pub(crate) fn from_lookup(lookup: &EnvLookup<'_>) -> AppResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            timeout_secs: parse_or(lookup, "HTTP_CLIENT_TIMEOUT_SECS", defaults.timeout_secs)?,
            connect_timeout_secs: parse_or(
                lookup,
                "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
        })
    }
}

/// Parse comma-separated CORS origins, dropping blanks
#[must_use]
pub fn parse_origins(origins_str: &str) -> Vec<String> {
    origins_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        assert_eq!(
            parse_origins(" https://a.example.com, ,https://b.example.com ,"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert!(parse_origins("").is_empty());
        assert!(parse_origins(" , ").is_empty());
    }
}
