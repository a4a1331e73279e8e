// ABOUTME: Tests for environment-derived server configuration
// ABOUTME: Validates defaults, overrides, identity backend requirements, and secret redaction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::HashMap;
use std::env;

use serial_test::serial;
use travel_backoffice::config::environment::{Environment, ServerConfig};
use travel_backoffice::errors::ErrorCode;

const CONFIG_VARS: [&str; 9] = [
    "HOST",
    "HTTP_PORT",
    "ENVIRONMENT",
    "SUPABASE_URL",
    "SUPABASE_SERVICE_ROLE_KEY",
    "ALLOWED_ORIGINS",
    "HTTP_CLIENT_TIMEOUT_SECS",
    "HTTP_CLIENT_CONNECT_TIMEOUT_SECS",
    "PASSWORD_MIN_LENGTH",
];

fn clear_config_vars() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, travel_backoffice::errors::AppError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    ServerConfig::from_vars(|key| vars.get(key).cloned())
}

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("production"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
}

#[test]
fn test_defaults_without_variables() {
    let config = from_pairs(&[]).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.http_port, 8081);
    assert!(config.identity.is_none());
    assert!(config.cors.allowed_origins.is_empty());
    assert_eq!(config.http_client.timeout_secs, 30);
    assert_eq!(config.http_client.connect_timeout_secs, 10);
    assert_eq!(config.password_policy.min_length, 8);
    assert!(config.password_policy.require_digit);
}

#[test]
fn test_identity_backend_requires_both_variables() {
    let err = from_pairs(&[("SUPABASE_URL", "https://project.supabase.co")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("SUPABASE_SERVICE_ROLE_KEY"));

    let err = from_pairs(&[("SUPABASE_SERVICE_ROLE_KEY", "key")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("SUPABASE_URL"));

    let err = ServerConfig::default().require_identity().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = from_pairs(&[("HTTP_PORT", "eighty")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    let err = from_pairs(&[("PASSWORD_MIN_LENGTH", "4")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("PASSWORD_MIN_LENGTH"));

    let err = from_pairs(&[("PASSWORD_MIN_LENGTH", "0")]).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    let err = from_pairs(&[
        ("SUPABASE_URL", "not a url"),
        ("SUPABASE_SERVICE_ROLE_KEY", "key"),
    ])
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);

    let err = from_pairs(&[
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "   "),
    ])
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
}

#[test]
fn test_password_minimum_can_only_be_raised() {
    let config = from_pairs(&[("PASSWORD_MIN_LENGTH", "8")]).unwrap();
    assert_eq!(config.password_policy.min_length, 8);

    let config = from_pairs(&[("PASSWORD_MIN_LENGTH", "14")]).unwrap();
    assert_eq!(config.password_policy.min_length, 14);
    assert!(config.password_policy.validate("abcdefghijk12").is_err());
    assert!(config.password_policy.validate("abcdefghijkl12").is_ok());
}

#[test]
fn test_summary_and_debug_redact_service_key() {
    let config = from_pairs(&[
        ("SUPABASE_URL", "https://project.supabase.co"),
        ("SUPABASE_SERVICE_ROLE_KEY", "super-secret-service-key"),
    ])
    .unwrap();

    let identity = config.require_identity().unwrap();
    assert_eq!(identity.service_role_key.expose(), "super-secret-service-key");
    assert!(!config.summary().contains("super-secret-service-key"));
    assert!(!format!("{config:?}").contains("super-secret-service-key"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    clear_config_vars();
    env::set_var("HTTP_PORT", "9090");
    env::set_var("SUPABASE_URL", "https://project.supabase.co");
    env::set_var("SUPABASE_SERVICE_ROLE_KEY", "service-key");
    env::set_var("ALLOWED_ORIGINS", "https://admin.agency.test, https://ops.agency.test");
    env::set_var("PASSWORD_MIN_LENGTH", "12");

    let config = ServerConfig::from_env().unwrap();
    clear_config_vars();

    assert_eq!(config.http_port, 9090);
    assert_eq!(
        config.require_identity().unwrap().base_url.as_str(),
        "https://project.supabase.co/"
    );
    assert_eq!(
        config.cors.allowed_origins,
        vec!["https://admin.agency.test", "https://ops.agency.test"]
    );
    assert_eq!(config.password_policy.min_length, 12);
}

#[test]
#[serial]
fn test_from_env_without_identity_backend() {
    clear_config_vars();

    let config = ServerConfig::from_env().unwrap();
    assert!(config.identity.is_none());
    assert_eq!(config.environment, Environment::Development);
}
