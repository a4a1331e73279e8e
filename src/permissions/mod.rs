// ABOUTME: Staff role system re-exported from backoffice-core
// ABOUTME: Provides the closed UserRole set and the admin-or-higher predicate
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

pub use backoffice_core::permissions::*;
