// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Loads the identity backend URL, service key, CORS list, and server options once at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Environment-based configuration
//!
//! | Variable                           | Field                          | Default   |
//! |------------------------------------|--------------------------------|-----------|
//! | `HOST`                             | `host`                         | `0.0.0.0` |
//! | `HTTP_PORT`                        | `http_port`                    | `8081`    |
//! | `ENVIRONMENT`                      | `environment`                  | dev       |
//! | `SUPABASE_URL`                     | `identity.base_url`            | required  |
//! | `SUPABASE_SERVICE_ROLE_KEY`        | `identity.service_role_key`    | required  |
//! | `ALLOWED_ORIGINS`                  | `cors.allowed_origins`         | empty     |
//! | `HTTP_CLIENT_TIMEOUT_SECS`         | `http_client.timeout_secs`     | `30`      |
//! | `HTTP_CLIENT_CONNECT_TIMEOUT_SECS` | `http_client.connect_timeout_secs` | `10`  |
//! | `PASSWORD_MIN_LENGTH`              | `password_policy.min_length`   | `8` (floor) |

use std::env;
use std::fmt;
use std::str::FromStr;

use backoffice_core::constants::password::DEFAULT_MIN_LENGTH;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use super::network::{CorsConfig, HttpClientConfig};
use crate::errors::{AppError, AppResult};
use crate::models::PasswordPolicy;

/// Variable lookup used by the loaders; `env::var` in production
pub(crate) type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Privileged service credential for the hosted backend
///
/// Never printed: `Debug` and `Display` both redact it.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceKey(String);

impl ServiceKey {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key, for request headers only
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceKey([REDACTED])")
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Hosted identity/profile backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Backend base URL (e.g. `https://<project>.supabase.co`)
    pub base_url: Url,
    /// Privileged service credential
    pub service_role_key: ServiceKey,
}

impl IdentityConfig {
    /// Build from a raw URL string and key
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the URL does not parse or the key is blank.
    pub fn new(base_url: &str, service_role_key: impl Into<String>) -> AppResult<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            AppError::config_invalid(format!("Invalid SUPABASE_URL '{base_url}': {e}"))
        })?;
        let key = service_role_key.into();
        if key.trim().is_empty() {
            return Err(AppError::config_invalid(
                "SUPABASE_SERVICE_ROLE_KEY must not be empty",
            ));
        }
        Ok(Self {
            base_url,
            service_role_key: ServiceKey::new(key.trim()),
        })
    }

    fn from_lookup(lookup: &EnvLookup<'_>) -> AppResult<Option<Self>> {
        match (lookup("SUPABASE_URL"), lookup("SUPABASE_SERVICE_ROLE_KEY")) {
            (None, None) => Ok(None),
            (Some(url), Some(key)) => Self::new(&url, key).map(Some),
            (None, Some(_)) => Err(AppError::config_missing("SUPABASE_URL")),
            (Some(_), None) => Err(AppError::config_missing("SUPABASE_SERVICE_ROLE_KEY")),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Hosted backend settings; `None` when neither variable is set
    pub identity: Option<IdentityConfig>,
    /// CORS allow-list
    pub cors: CorsConfig,
    /// Outbound HTTP client timeouts
    pub http_client: HttpClientConfig,
    /// Replacement password policy
    pub password_policy: PasswordPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            http_port: 8081,
            environment: Environment::Development,
            identity: None,
            cors: CorsConfig::default(),
            http_client: HttpClientConfig::default(),
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a value fails to parse or only one
    /// of the two identity backend variables is set.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Same conditions as [`ServerConfig::from_env`].
    pub fn from_vars<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(&lookup)
    }

    fn from_lookup(lookup: &EnvLookup<'_>) -> AppResult<Self> {
        let defaults = Self::default();
        let min_length = parse_or(
            lookup,
            "PASSWORD_MIN_LENGTH",
            defaults.password_policy.min_length,
        )?;
        if min_length < DEFAULT_MIN_LENGTH {
            return Err(AppError::config_invalid(format!(
                "PASSWORD_MIN_LENGTH must be at least {DEFAULT_MIN_LENGTH}, got {min_length}"
            )));
        }
        let password_policy = PasswordPolicy {
            min_length,
            ..defaults.password_policy
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            http_port: parse_or(lookup, "HTTP_PORT", defaults.http_port)?,
            environment: lookup("ENVIRONMENT")
                .map_or(defaults.environment, |s| Environment::from_str_or_default(&s)),
            identity: IdentityConfig::from_lookup(lookup)?,
            cors: CorsConfig::from_lookup(lookup),
            http_client: HttpClientConfig::from_lookup(lookup)?,
            password_policy,
        })
    }

    /// Identity backend settings, required when serving against the hosted backend
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` naming `SUPABASE_URL` when unset.
    pub fn require_identity(&self) -> AppResult<&IdentityConfig> {
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::config_missing("SUPABASE_URL"))
    }

    /// Human-readable summary with secrets redacted
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Travel Backoffice Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Identity Backend: {}\n\
             - Service Key: {}\n\
             - Allowed Origins: {}\n\
             - Upstream Timeout: {}s (connect {}s)\n\
             - Password Min Length: {}",
            self.host,
            self.http_port,
            self.environment,
            self.identity
                .as_ref()
                .map_or_else(|| "not configured".to_owned(), |i| i.base_url.to_string()),
            self.identity
                .as_ref()
                .map_or("not configured", |_| "[REDACTED]"),
            if self.cors.allowed_origins.is_empty() {
                "any (echo request origin)".to_owned()
            } else {
                self.cors.allowed_origins.join(", ")
            },
            self.http_client.timeout_secs,
            self.http_client.connect_timeout_secs,
            self.password_policy.min_length,
        )
    }
}

/// Parse an optional variable, falling back to `default` when unset
pub(crate) fn parse_or<T>(lookup: &EnvLookup<'_>, key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
    })
}
