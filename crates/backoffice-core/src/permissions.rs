// ABOUTME: Closed set of back-office staff roles with a privileged-subset predicate
// ABOUTME: Replaces ad-hoc role string comparisons with a typed hierarchy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Travel Backoffice Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role stored on a staff profile
///
/// Ordered from most to least privileged: `SuperAdmin > Admin > Agent > Viewer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full control, including other administrators
    SuperAdmin,
    /// Back-office administrator
    Admin,
    /// Travel agent working quotations and bookings
    Agent,
    /// Read-only staff access
    Viewer,
}

impl UserRole {
    /// All roles, most privileged first
    pub const ALL: [Self; 4] = [Self::SuperAdmin, Self::Admin, Self::Agent, Self::Viewer];

    /// Stored string form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Agent => "agent",
            Self::Viewer => "viewer",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::SuperAdmin => 3,
            Self::Admin => 2,
            Self::Agent => 1,
            Self::Viewer => 0,
        }
    }

    /// Whether this role is at least as privileged as `required`
    #[must_use]
    pub const fn has_privilege(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }

    /// The privileged subset allowed to perform administrative actions
    #[must_use]
    pub const fn is_admin_or_higher(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "agent" => Ok(Self::Agent),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_subset() {
        assert!(UserRole::SuperAdmin.is_admin_or_higher());
        assert!(UserRole::Admin.is_admin_or_higher());
        assert!(!UserRole::Agent.is_admin_or_higher());
        assert!(!UserRole::Viewer.is_admin_or_higher());
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(UserRole::SuperAdmin.has_privilege(UserRole::Admin));
        assert!(UserRole::Admin.has_privilege(UserRole::Agent));
        assert!(UserRole::Agent.has_privilege(UserRole::Agent));
        assert!(!UserRole::Agent.has_privilege(UserRole::Admin));
        assert!(!UserRole::Admin.has_privilege(UserRole::SuperAdmin));
    }

    #[test]
    fn test_role_string_forms_agree() {
        for role in UserRole::ALL {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
            assert_eq!(
                serde_json::to_value(role).unwrap(),
                serde_json::Value::String(role.to_string())
            );
        }
        assert!("Admin".parse::<UserRole>().is_err());
        assert!("".parse::<UserRole>().is_err());
    }
}
