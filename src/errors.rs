// ABOUTME: Unified error handling re-exported from backoffice-core
// ABOUTME: Keeps crate::errors paths stable for handlers, services, and tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

pub use backoffice_core::errors::*;
