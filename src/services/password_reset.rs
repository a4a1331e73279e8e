// ABOUTME: Admin password reset procedure: authenticate, authorize, validate, mutate
// ABOUTME: Runs as one sequential chain of backend calls and stops at the first failure
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

//! Admin Password Reset
//!
//! Steps, in order; the first failing step decides the response:
//!
//! 1. Resolve the caller from the bearer token (401)
//! 2. Load the caller's profile and require an admin role (403)
//! 3. Parse `user_id` and `new_password` from the body (400)
//! 4. Apply the password policy (400)
//! 5. Replace the target's credential (400 on upstream failure)
//! 6. Set the target's `requires_password_reset` flag (400 on upstream failure)
//!
//! Step 6 runs after step 5 has already changed the credential. If it fails,
//! the new password stays in place with the flag unset; there is no way to
//! restore the previous password, so the failure is logged at error level
//! with the target id and reported to the caller.

use std::sync::Arc;

use backoffice_core::constants::messages;
use tracing::{error, info, warn, Span};

use crate::errors::{AppError, AppResult};
use crate::identity::{IdentityProvider, ProfileStore};
use crate::logging::AppLogger;
use crate::models::{
    AuthenticatedUser, PasswordPolicy, Profile, ResetPasswordRequest, ResetPasswordResponse,
};
use crate::permissions::UserRole;
use crate::utils::auth::extract_bearer_token_from_option;

/// Audit action name
const RESET_ACTION: &str = "reset_user_password";

/// Validated reset input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCommand {
    /// Target user identifier
    pub user_id: String,
    /// Replacement password
    pub new_password: String,
}

/// Caller that passed authentication and authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedAdmin {
    /// Resolved identity
    pub user: AuthenticatedUser,
    /// Privileged role held by the caller
    pub role: UserRole,
}

/// Admin password reset service
#[derive(Clone)]
pub struct PasswordResetService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileStore>,
    policy: PasswordPolicy,
}

impl PasswordResetService {
    /// Create a service from separate collaborators
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileStore>,
        policy: PasswordPolicy,
    ) -> Self {
        Self {
            identity,
            profiles,
            policy,
        }
    }

    /// Create a service from one backend implementing both collaborators
    #[must_use]
    pub fn from_backend<B>(backend: Arc<B>, policy: PasswordPolicy) -> Self
    where
        B: IdentityProvider + ProfileStore + 'static,
    {
        Self::new(backend.clone(), backend, policy)
    }

    /// Step 1: resolve the caller from the raw `Authorization` header
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` / `AuthInvalid` when the header is missing,
    /// malformed, or the token does not resolve.
    pub async fn authenticate(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser> {
        let token = extract_bearer_token_from_option(auth_header)?;
        self.identity.resolve_token(token).await.map_err(|e| {
            if e.code.is_unauthenticated() {
                e
            } else {
                AppError::auth_invalid(messages::UNAUTHORIZED).with_source(e)
            }
        })
    }

    /// Step 2: require an admin or super admin profile
    ///
    /// A missing profile, an unknown role string, or a failed lookup are all
    /// treated as insufficient privileges.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` with the admin-required message.
    pub async fn authorize_admin(&self, caller: AuthenticatedUser) -> AppResult<AuthorizedAdmin> {
        let profile = match self.profiles.get_profile(&caller.id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(caller_id = %caller.id, error = %e, "Caller profile lookup failed");
                None
            }
        };

        let Some(role) = profile.as_ref().and_then(Profile::admin_role) else {
            AppLogger::log_security_event(
                "admin_required",
                "password reset attempted without admin role",
                Some(&caller.id),
            );
            return Err(AppError::forbidden(messages::ADMIN_REQUIRED));
        };

        Ok(AuthorizedAdmin { user: caller, role })
    }

    /// Steps 3 and 4: parse the body and apply the password policy
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for malformed JSON or a policy violation and
    /// `MissingRequiredField` when either field is absent or empty.
    pub fn parse_command(&self, body: &[u8]) -> AppResult<ResetCommand> {
        let request: ResetPasswordRequest = serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_input(messages::INVALID_JSON).with_source(e))?;

        let (user_id, new_password) = request
            .fields()
            .ok_or_else(|| AppError::missing_field(messages::MISSING_FIELDS))?;

        self.policy.validate(new_password)?;

        Ok(ResetCommand {
            user_id: user_id.to_owned(),
            new_password: new_password.to_owned(),
        })
    }

    /// Steps 5 and 6: replace the credential, then flag the profile
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` if either backend call fails.
    pub async fn apply(&self, admin: &AuthorizedAdmin, command: &ResetCommand) -> AppResult<()> {
        self.identity
            .update_password(&command.user_id, &command.new_password)
            .await
            .inspect_err(|e| {
                warn!(
                    admin_id = %admin.user.id,
                    target_user_id = %command.user_id,
                    error = %e,
                    "Credential update rejected by identity provider"
                );
            })?;

        self.profiles
            .set_requires_password_reset(&command.user_id, true)
            .await
            .inspect_err(|e| {
                error!(
                    admin_id = %admin.user.id,
                    target_user_id = %command.user_id,
                    error = %e,
                    "Password was replaced but requires_password_reset could not be set"
                );
            })
    }

    /// Run the whole procedure for one request
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step.
    pub async fn reset_password(
        &self,
        auth_header: Option<&str>,
        body: &[u8],
    ) -> AppResult<ResetPasswordResponse> {
        let caller = self.authenticate(auth_header).await?;
        Span::current().record("caller_id", caller.id.as_str());

        let admin = self.authorize_admin(caller).await?;
        let command = self.parse_command(body)?;
        Span::current().record("target_user_id", command.user_id.as_str());

        self.apply(&admin, &command).await?;

        AppLogger::log_admin_action(&admin.user.id, RESET_ACTION, &command.user_id);
        info!(
            admin_role = %admin.role,
            target_user_id = %command.user_id,
            "Password reset completed"
        );

        Ok(ResetPasswordResponse::OK)
    }
}
