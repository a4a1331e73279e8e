// ABOUTME: In-process identity provider and profile store backed by hash maps
// ABOUTME: Used by integration tests and the server's demo mode; supports failure injection
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use backoffice_core::constants::messages;

use super::{IdentityProvider, ProfileStore};
use crate::errors::{AppError, AppResult};
use crate::models::{AuthenticatedUser, Profile};
use crate::permissions::UserRole;

/// Demo-mode bearer token for a seeded administrator
pub const DEMO_ADMIN_TOKEN: &str = "demo-admin-token";
/// Demo-mode bearer token for a seeded travel agent
pub const DEMO_AGENT_TOKEN: &str = "demo-agent-token";

#[derive(Debug, Clone)]
struct StoredUser {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default)]
struct State {
    tokens: HashMap<String, String>,
    users: HashMap<String, StoredUser>,
    profiles: HashMap<String, Profile>,
    password_updates: usize,
    fail_password_updates: bool,
    fail_flag_updates: bool,
}

/// Identity provider and profile store held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    state: RwLock<State>,
}

impl InMemoryIdentityStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an admin, an agent, and one ordinary account
    ///
    /// | user            | role    | token                |
    /// |-----------------|---------|----------------------|
    /// | `demo-admin`    | admin   | [`DEMO_ADMIN_TOKEN`] |
    /// | `demo-agent`    | agent   | [`DEMO_AGENT_TOKEN`] |
    /// | `demo-customer` | viewer  | none                 |
    #[must_use]
    pub fn demo() -> Self {
        Self::new()
            .with_user("demo-admin", Some("admin@agency.test"), Some(UserRole::Admin.as_str()))
            .with_token(DEMO_ADMIN_TOKEN, "demo-admin")
            .with_user("demo-agent", Some("agent@agency.test"), Some(UserRole::Agent.as_str()))
            .with_token(DEMO_AGENT_TOKEN, "demo-agent")
            .with_user(
                "demo-customer",
                Some("desk@agency.test"),
                Some(UserRole::Viewer.as_str()),
            )
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an identity with a profile carrying the given raw role
    #[must_use]
    pub fn with_user(self, user_id: &str, email: Option<&str>, role: Option<&str>) -> Self {
        self.insert_user(user_id, email);
        self.write().profiles.insert(
            user_id.to_owned(),
            Profile {
                id: user_id.to_owned(),
                role: role.map(str::to_owned),
                requires_password_reset: false,
            },
        );
        self
    }

    /// Add an identity that has no profile row
    #[must_use]
    pub fn with_user_without_profile(self, user_id: &str, email: Option<&str>) -> Self {
        self.insert_user(user_id, email);
        self
    }

    /// Issue a bearer token for an existing identity
    #[must_use]
    pub fn with_token(self, token: &str, user_id: &str) -> Self {
        self.write()
            .tokens
            .insert(token.to_owned(), user_id.to_owned());
        self
    }

    fn insert_user(&self, user_id: &str, email: Option<&str>) {
        self.write().users.insert(
            user_id.to_owned(),
            StoredUser {
                email: email.map(str::to_owned),
                password: None,
            },
        );
    }

    /// Make every subsequent credential update fail
    pub fn fail_password_updates(&self, fail: bool) {
        self.write().fail_password_updates = fail;
    }

    /// Make every subsequent flag update fail
    pub fn fail_flag_updates(&self, fail: bool) {
        self.write().fail_flag_updates = fail;
    }

    /// Current password of a user, if one has been set
    #[must_use]
    pub fn password_of(&self, user_id: &str) -> Option<String> {
        self.read()
            .users
            .get(user_id)
            .and_then(|u| u.password.clone())
    }

    /// Current profile of a user
    #[must_use]
    pub fn profile_of(&self, user_id: &str) -> Option<Profile> {
        self.read().profiles.get(user_id).cloned()
    }

    /// Number of successful credential updates
    #[must_use]
    pub fn password_update_count(&self) -> usize {
        self.read().password_updates
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityStore {
    async fn resolve_token(&self, token: &str) -> AppResult<AuthenticatedUser> {
        let state = self.read();
        let user_id = state
            .tokens
            .get(token)
            .ok_or_else(|| AppError::auth_invalid(messages::UNAUTHORIZED))?;
        let user = state
            .users
            .get(user_id)
            .ok_or_else(|| AppError::auth_invalid(messages::UNAUTHORIZED))?;

        Ok(AuthenticatedUser {
            id: user_id.clone(),
            email: user.email.clone(),
        })
    }

    async fn update_password(&self, user_id: &str, new_password: &str) -> AppResult<()> {
        let mut state = self.write();
        if state.fail_password_updates {
            return Err(AppError::upstream(messages::PASSWORD_UPDATE_FAILED));
        }
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::upstream("User not found"))?;
        user.password = Some(new_password.to_owned());
        state.password_updates += 1;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryIdentityStore {
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<Profile>> {
        Ok(self.read().profiles.get(user_id).cloned())
    }

    async fn set_requires_password_reset(&self, user_id: &str, value: bool) -> AppResult<()> {
        let mut state = self.write();
        if state.fail_flag_updates {
            return Err(AppError::upstream(messages::PROFILE_UPDATE_FAILED));
        }
        // A filter matching no rows is not an error for the table API either
        if let Some(profile) = state.profiles.get_mut(user_id) {
            profile.requires_password_reset = value;
        }
        Ok(())
    }
}
