// ABOUTME: Integration tests for the liveness and readiness endpoints
// ABOUTME: Verifies status payloads and that health checks need no authentication
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{json_body, router, seeded_store};
use tower::ServiceExt;

async fn get(path: &str) -> (StatusCode, serde_json::Value) {
    let store = seeded_store();
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = router(&store).oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response).await)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "travel-backoffice");
    assert!(chrono::DateTime::parse_from_rfc3339(body["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_ready_endpoint() {
    let (status, body) = get("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}
