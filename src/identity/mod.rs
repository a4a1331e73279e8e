// ABOUTME: Abstractions over the identity provider and the staff profile store
// ABOUTME: The reset procedure depends only on these traits, never on a concrete backend
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Identity backend abstractions
//!
//! Two collaborators are consumed as black boxes:
//!
//! - [`IdentityProvider`]: resolves bearer tokens and performs the
//!   administrative credential update.
//! - [`ProfileStore`]: reads a profile's role and sets its
//!   `requires_password_reset` flag.
//!
//! [`supabase::SupabaseClient`] implements both against the hosted backend;
//! [`memory::InMemoryIdentityStore`] implements both in-process.

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{AuthenticatedUser, Profile};

/// In-process implementation used by tests and the demo mode
pub mod memory;
/// Hosted backend client (auth admin API + PostgREST profiles table)
pub mod supabase;

pub use memory::InMemoryIdentityStore;
pub use supabase::SupabaseClient;

/// Token verification and administrative credential updates
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the user it was issued to
    ///
    /// # Errors
    ///
    /// Returns an unauthenticated error if the token is unknown, expired,
    /// or the provider cannot be reached.
    async fn resolve_token(&self, token: &str) -> AppResult<AuthenticatedUser>;

    /// Replace a user's password using the privileged service credential
    ///
    /// # Errors
    ///
    /// Returns an upstream error carrying the provider's reason on failure.
    async fn update_password(&self, user_id: &str, new_password: &str) -> AppResult<()>;
}

/// Staff profile lookups and flag updates
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile for a user, if one exists
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the store cannot be queried.
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>>;

    /// Set the `requires_password_reset` flag on a profile
    ///
    /// # Errors
    ///
    /// Returns an upstream error if the update is rejected or fails.
    async fn set_requires_password_reset(&self, user_id: &str, value: bool) -> AppResult<()>;
}
