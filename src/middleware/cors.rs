// ABOUTME: CORS middleware computing headers from a configured origin allow-list
// ABOUTME: Answers OPTIONS preflights without authentication and decorates every other response
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        ORIGIN, VARY,
    },
    HeaderMap, HeaderValue, Method, StatusCode,
};
use backoffice_core::constants::headers::CORS_ALLOW_HEADERS;
use tracing::{debug, warn};

use crate::config::CorsConfig;

/// Origin allow-list resolved into header values
///
/// - Empty list: the request's `Origin` is echoed back (`*` without one).
/// - Listed origin: echoed back.
/// - Anything else: the first configured origin, which the browser will
///   then refuse to match.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
    allow_headers: HeaderValue,
}

impl CorsPolicy {
    /// Build from configuration, dropping origins that are not valid header values
    #[must_use]
    pub fn from_config(config: &CorsConfig) -> Self {
        let allowed_origins = config
            .allowed_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin"))
                    .ok()
            })
            .collect();
        Self {
            allowed_origins,
            allow_headers: allow_headers_value(),
        }
    }

    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`
    #[must_use]
    pub fn allow_origin_for(&self, request_origin: Option<&HeaderValue>) -> HeaderValue {
        let Some(first) = self.allowed_origins.first() else {
            return request_origin
                .cloned()
                .unwrap_or_else(|| HeaderValue::from_static("*"));
        };

        match request_origin {
            Some(origin) if self.allowed_origins.contains(origin) => origin.clone(),
            _ => first.clone(),
        }
    }

    /// Full set of CORS response headers for a request
    #[must_use]
    pub fn response_headers(&self, request_origin: Option<&HeaderValue>) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(4);
        map.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin_for(request_origin),
        );
        map.insert(ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.clone());
        map.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        );
        map.insert(VARY, HeaderValue::from_static("Origin"));
        map
    }
}

/// `Access-Control-Allow-Headers` value listing [`CORS_ALLOW_HEADERS`]
fn allow_headers_value() -> HeaderValue {
    let joined = CORS_ALLOW_HEADERS.join(", ");
    HeaderValue::from_str(&joined).unwrap_or_else(|e| {
        warn!(headers = %joined, error = %e, "Invalid CORS allow-headers list");
        HeaderValue::from_static("authorization, content-type")
    })
}

/// Axum middleware applying a [`CorsPolicy`]
///
/// `OPTIONS` requests never reach the wrapped handler: they receive `200`
/// with an empty body and the computed headers.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();
    let cors_headers = policy.response_headers(origin.as_ref());

    if request.method() == Method::OPTIONS {
        debug!(origin = ?origin, "Answering CORS preflight");
        return (StatusCode::OK, cors_headers, Body::empty()).into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().extend(cors_headers);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(origins: &str) -> CorsPolicy {
        CorsPolicy::from_config(&CorsConfig::from_list(origins))
    }

    #[test]
    fn test_empty_list_echoes_request_origin() {
        let policy = policy("");
        let origin = HeaderValue::from_static("https://anywhere.example");
        assert_eq!(policy.allow_origin_for(Some(&origin)), origin);
        assert_eq!(policy.allow_origin_for(None), "*");
    }

    #[test]
    fn test_listed_origin_is_echoed() {
        let policy = policy("https://admin.agency.test, https://ops.agency.test");
        let origin = HeaderValue::from_static("https://ops.agency.test");
        assert_eq!(policy.allow_origin_for(Some(&origin)), origin);
    }

    #[test]
    fn test_unlisted_origin_falls_back_to_first() {
        let policy = policy("https://admin.agency.test,https://ops.agency.test");
        let origin = HeaderValue::from_static("https://evil.example");
        assert_eq!(
            policy.allow_origin_for(Some(&origin)),
            "https://admin.agency.test"
        );
        assert_eq!(policy.allow_origin_for(None), "https://admin.agency.test");
    }

    #[test]
    fn test_response_headers_complete() {
        let headers = policy("").response_headers(None);
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "authorization, x-client-info, apikey, content-type"
        );
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
        assert_eq!(headers[VARY], "Origin");
    }
}
