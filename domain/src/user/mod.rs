//! User roster entities
//!
//! Users are supplied by an external roster provider; the voting engine only
//! reads roles from them (the admin roster forms the voting electorate).
//! Credentials are handled outside this system entirely.

use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a roster member
///
/// Admins and the super admin together form the electorate for proposal
/// voting. Only the super admin can move a proposal into voting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    #[default]
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            UserRole::SuperAdmin => "Super Admin",
            UserRole::Admin => "Admin",
            UserRole::User => "Student",
        }
    }

    /// Whether this role belongs to the voting electorate
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::SuperAdmin | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "super_admin" | "super-admin" => Ok(UserRole::SuperAdmin),
            "admin" => Ok(UserRole::Admin),
            "user" | "student" => Ok(UserRole::User),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// School-issued student id, unique across the roster
    pub student_id: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: crate::core::new_id(),
            student_id: student_id.into(),
            name: name.into(),
            role,
            created_at: now,
        }
    }

    /// Whether this user may cast proposal votes
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
