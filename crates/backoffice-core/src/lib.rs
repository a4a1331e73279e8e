// ABOUTME: Core types for the travel back-office admin service
// ABOUTME: Foundation crate with error handling, roles, models, password policy, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

#![deny(unsafe_code)]

//! # Backoffice Core
//!
//! Foundation crate providing shared types for the travel back-office
//! service. It has no network or runtime dependencies of its own so that
//! the server crate and its tests can share one vocabulary.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the `{"error": ...}` response body
//! - **permissions**: the closed `UserRole` set and the admin predicate
//! - **models**: caller identity, staff profile, reset request/response
//! - **password**: replacement password policy
//! - **constants**: messages, header names, defaults

/// Unified error handling with standard error codes and HTTP status mapping
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Identity, profile, and request/response models
pub mod models;

/// Staff roles and the privileged-subset predicate
pub mod permissions;

/// Replacement password policy
pub mod password;
