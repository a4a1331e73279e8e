// ABOUTME: Password policy applied to administrator-chosen replacement passwords
// ABOUTME: Enforces a minimum length and at least one digit
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use serde::{Deserialize, Serialize};

use crate::constants::password::{DEFAULT_MIN_LENGTH, DEFAULT_REQUIRE_DIGIT};
use crate::errors::{AppError, AppResult};

/// Policy for replacement passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum number of characters (Unicode scalar values)
    pub min_length: usize,
    /// Require at least one ASCII digit
    pub require_digit: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            require_digit: DEFAULT_REQUIRE_DIGIT,
        }
    }
}

impl PasswordPolicy {
    /// Message returned for any policy violation
    #[must_use]
    pub fn violation_message(&self) -> String {
        if self.require_digit {
            format!(
                "Password must be at least {} characters and contain at least one number",
                self.min_length
            )
        } else {
            format!("Password must be at least {} characters", self.min_length)
        }
    }

    /// Check a candidate password against the policy
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when the password is too short or,
    /// if required, contains no digit.
    pub fn validate(&self, password: &str) -> AppResult<()> {
        let long_enough = password.chars().count() >= self.min_length;
        let has_digit = !self.require_digit || password.chars().any(|c| c.is_ascii_digit());

        if long_enough && has_digit {
            Ok(())
        } else {
            Err(AppError::invalid_input(self.violation_message()))
        }
    }
}
