// ABOUTME: Configuration management module for server settings loaded at startup
// ABOUTME: Groups environment, identity backend, CORS, and HTTP client configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Configuration module for the back-office server
//!
//! All values are read from the process environment once, in
//! [`ServerConfig::from_env`], and the resulting struct is passed explicitly
//! to the components that need it. Nothing reads the environment while
//! serving requests.

/// Server and identity backend configuration
pub mod environment;
/// CORS and outbound HTTP client configuration
pub mod network;

pub use environment::{Environment, IdentityConfig, ServerConfig, ServiceKey};
pub use network::{CorsConfig, HttpClientConfig};
