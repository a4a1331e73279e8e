// ABOUTME: Hosted backend client for token verification, admin password updates, and profile rows
// ABOUTME: Talks to the auth admin API and the PostgREST profiles table with the service key
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Hosted Identity Backend Client
//!
//! Endpoints used (relative to the configured base URL):
//!
//! | Operation                     | Request                                      |
//! |-------------------------------|----------------------------------------------|
//! | resolve caller token          | `GET auth/v1/user` (caller token as bearer)  |
//! | replace a user's password     | `PUT auth/v1/admin/users/{id}`               |
//! | read a profile                | `GET rest/v1/profiles?id=eq.{id}`            |
//! | set `requires_password_reset` | `PATCH rest/v1/profiles?id=eq.{id}`          |
//!
//! Every request carries the service key in the `apikey` header. Admin and
//! table calls also use it as the bearer credential.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use travel_backoffice::config::{HttpClientConfig, IdentityConfig};
//! use travel_backoffice::identity::{IdentityProvider, SupabaseClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdentityConfig::new("https://project.supabase.co", "service-key")?;
//! let client = SupabaseClient::new(&config, &HttpClientConfig::default());
//! let caller = client.resolve_token("eyJ...").await?;
//! println!("caller: {}", caller.id);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use backoffice_core::constants::{headers, messages};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn, Instrument};
use url::Url;

use super::{IdentityProvider, ProfileStore};
use crate::config::{HttpClientConfig, IdentityConfig, ServiceKey};
use crate::errors::{AppError, AppResult};
use crate::middleware::tracing::create_upstream_span;
use crate::models::{AuthenticatedUser, Profile};
use crate::utils::http_client::upstream_client;

/// Profiles table name
const PROFILES_TABLE: &str = "profiles";

/// Columns selected when reading a profile
const PROFILE_COLUMNS: &str = "id,role,requires_password_reset";

/// Error body fields that carry a human-readable reason, in priority order
const REASON_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

/// User object returned by `GET auth/v1/user`
#[derive(Debug, Deserialize)]
struct UserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

/// Client for the hosted identity backend
#[derive(Clone)]
pub struct SupabaseClient {
    base_url: Url,
    service_key: ServiceKey,
    http_client: Client,
}

impl SupabaseClient {
    /// Create a client from configuration
    #[must_use]
    pub fn new(config: &IdentityConfig, http_config: &HttpClientConfig) -> Self {
        Self::with_client(config, upstream_client(http_config))
    }

    /// Create a client with a caller-supplied `reqwest::Client`
    #[must_use]
    pub fn with_client(config: &IdentityConfig, http_client: Client) -> Self {
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            service_key: config.service_role_key.clone(),
            http_client,
        }
    }

    /// Base URL with a guaranteed trailing slash
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::internal(format!("Invalid upstream path '{path}': {e}")))
    }

    fn admin_user_url(&self, user_id: &str) -> AppResult<Url> {
        let mut url = self.endpoint("auth/v1/admin/users")?;
        url.path_segments_mut()
            .map_err(|()| AppError::internal("Identity backend URL cannot be a base"))?
            .push(user_id);
        Ok(url)
    }

    fn profile_url(&self, user_id: &str, select: Option<&str>) -> AppResult<Url> {
        let mut url = self.endpoint(&format!("rest/v1/{PROFILES_TABLE}"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("id", &format!("eq.{user_id}"));
            if let Some(columns) = select {
                query.append_pair("select", columns);
            }
        }
        Ok(url)
    }

    /// Attach the service key as both `apikey` and bearer credential
    fn service_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(headers::APIKEY, self.service_key.expose())
            .bearer_auth(self.service_key.expose())
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn resolve_token(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let url = self.endpoint("auth/v1/user")?;
        let span = create_upstream_span("resolve_token", "auth/v1/user");

        async {
            let response = self
                .http_client
                .get(url)
                .header(headers::APIKEY, self.service_key.expose())
                .bearer_auth(token)
                .send()
                .await
                .map_err(|e| {
                    warn!(error = %e, "Identity provider unreachable during token verification");
                    AppError::auth_invalid(messages::UNAUTHORIZED)
                })?;

            let status = response.status();
            if !status.is_success() {
                debug!(status = %status, "Identity provider rejected bearer token");
                return Err(AppError::auth_invalid(messages::UNAUTHORIZED));
            }

            let user: UserResponse = response.json().await.map_err(|e| {
                warn!(error = %e, "Failed to parse identity provider user response");
                AppError::auth_invalid(messages::UNAUTHORIZED)
            })?;

            Ok(AuthenticatedUser {
                id: user.id,
                email: user.email,
            })
        }
        .instrument(span)
        .await
    }

    async fn update_password(&self, user_id: &str, new_password: &str) -> AppResult<()> {
        let url = self.admin_user_url(user_id)?;
        let span = create_upstream_span("update_password", "auth/v1/admin/users");

        async {
            let response = self
                .service_request(self.http_client.put(url))
                .json(&json!({ "password": new_password }))
                .send()
                .await?;

            ensure_success(response, messages::PASSWORD_UPDATE_FAILED).await
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        let url = self.profile_url(user_id, Some(PROFILE_COLUMNS))?;
        let span = create_upstream_span("get_profile", PROFILES_TABLE);

        async {
            let response = self
                .service_request(self.http_client.get(url))
                .send()
                .await?;
            let response =
                ensure_success_response(response, messages::PROFILE_LOOKUP_FAILED).await?;

            let rows: Vec<Profile> = response.json().await.map_err(|e| {
                warn!(error = %e, "Failed to parse profile rows");
                AppError::upstream(format!("Invalid profile response: {e}"))
            })?;

            Ok(rows.into_iter().next())
        }
        .instrument(span)
        .await
    }

    async fn set_requires_password_reset(&self, user_id: &str, value: bool) -> AppResult<()> {
        let url = self.profile_url(user_id, None)?;
        let span = create_upstream_span("set_requires_password_reset", PROFILES_TABLE);

        async {
            let response = self
                .service_request(self.http_client.patch(url))
                .header(headers::PREFER, "return=minimal")
                .json(&json!({ "requires_password_reset": value }))
                .send()
                .await?;

            ensure_success(response, messages::PROFILE_UPDATE_FAILED).await
        }
        .instrument(span)
        .await
    }
}

/// Map a non-2xx response to an upstream error, discarding a successful body
async fn ensure_success(response: Response, fallback: &str) -> AppResult<()> {
    ensure_success_response(response, fallback).await.map(drop)
}

/// Pass a 2xx response through; otherwise build an upstream error from its body
async fn ensure_success_response(response: Response, fallback: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = upstream_reason(&body).unwrap_or_else(|| fallback.to_owned());
    warn!(status = %status, reason = %reason, "Upstream call failed");
    Err(AppError::upstream(reason))
}

/// Extract the provider's human-readable reason from an error body
#[must_use]
pub fn upstream_reason(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    REASON_FIELDS.iter().find_map(|field| {
        value
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> SupabaseClient {
        let config = IdentityConfig::new(base, "service-key").unwrap();
        SupabaseClient::with_client(&config, Client::new())
    }

    #[test]
    fn test_base_url_gains_trailing_slash() {
        assert_eq!(
            client("https://project.supabase.co").base_url().as_str(),
            "https://project.supabase.co/"
        );
        assert_eq!(
            client("http://localhost:54321/gateway").base_url().as_str(),
            "http://localhost:54321/gateway/"
        );
    }

    #[test]
    fn test_admin_user_url_encodes_identifier() {
        let url = client("https://project.supabase.co")
            .admin_user_url("a b/c")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.supabase.co/auth/v1/admin/users/a%20b%2Fc"
        );
    }

    #[test]
    fn test_profile_url_filters_by_id() {
        let url = client("https://project.supabase.co")
            .profile_url("u1", Some(PROFILE_COLUMNS))
            .unwrap();
        assert_eq!(url.path(), "/rest/v1/profiles");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("id".to_owned(), "eq.u1".to_owned()),
                ("select".to_owned(), PROFILE_COLUMNS.to_owned()),
            ]
        );
    }

    #[test]
    fn test_upstream_reason_field_priority() {
        assert_eq!(
            upstream_reason(r#"{"msg":"User not found","message":"other"}"#).as_deref(),
            Some("User not found")
        );
        assert_eq!(
            upstream_reason(r#"{"code":"23505","message":"duplicate key"}"#).as_deref(),
            Some("duplicate key")
        );
        assert_eq!(
            upstream_reason(r#"{"error":"invalid_grant","error_description":"expired"}"#)
                .as_deref(),
            Some("expired")
        );
        assert_eq!(upstream_reason("not json"), None);
        assert_eq!(upstream_reason(r#"{"msg":""}"#), None);
    }
}
