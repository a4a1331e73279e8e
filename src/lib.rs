// ABOUTME: Main library entry point for the travel back-office admin service
// ABOUTME: Exposes the admin password reset procedure behind an axum HTTP server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

#![deny(unsafe_code)]

//! # Travel Backoffice
//!
//! Server side of the travel agency back office. The screens for tour
//! operators, hotels, contacts, and quotations talk to the hosted database
//! directly; this crate hosts the one operation that needs the privileged
//! service credential: an administrator replacing another user's password.
//!
//! ## Architecture
//!
//! - **identity**: `IdentityProvider` / `ProfileStore` traits with a hosted
//!   backend client and an in-memory implementation
//! - **services**: the password reset procedure, independent of HTTP
//! - **routes**: axum handlers for the reset endpoint and health checks
//! - **middleware**: allow-list CORS with preflight handling, request spans
//! - **config**: environment-derived `ServerConfig`, loaded once at startup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use travel_backoffice::config::environment::ServerConfig;
//! use travel_backoffice::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment-derived server configuration
pub mod config;

/// Unified error handling re-exported from `backoffice-core`
pub mod errors;

/// Identity provider and profile store abstractions and implementations
pub mod identity;

/// Structured logging setup
pub mod logging;

/// HTTP middleware for CORS and request tracing
pub mod middleware;

/// Identity, profile, and request/response models
pub mod models;

/// Staff roles re-exported from `backoffice-core`
pub mod permissions;

/// `HTTP` route handlers
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Domain services independent of the HTTP layer
pub mod services;

/// Utility functions and helpers
pub mod utils;
