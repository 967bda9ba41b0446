//! In-memory user roster
//!
//! Implements the [`RosterProvider`] port over an interior-mutability store.
//! A fixed super-admin account is always present; it cannot be demoted or
//! deleted. Credentials are out of scope; identity is asserted by the
//! surrounding surface.

use chrono::{DateTime, Utc};
use council_application::ports::roster::RosterProvider;
use council_domain::{DomainError, User, UserRole};
use std::sync::RwLock;

/// Fixed id of the seeded super-admin account.
pub const SUPER_ADMIN_ID: &str = "super-admin-001";
/// Fixed student id the super admin signs in with.
pub const SUPER_ADMIN_STUDENT_ID: &str = "admin";

fn seeded_super_admin() -> User {
    User {
        id: SUPER_ADMIN_ID.to_string(),
        student_id: SUPER_ADMIN_STUDENT_ID.to_string(),
        name: "Super Admin".to_string(),
        role: UserRole::SuperAdmin,
        created_at: DateTime::<Utc>::UNIX_EPOCH,
    }
}

/// Thread-safe roster with registration and role management.
pub struct InMemoryRoster {
    users: RwLock<Vec<User>>,
}

impl InMemoryRoster {
    /// Create a roster containing only the seeded super admin.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(vec![seeded_super_admin()]),
        }
    }

    /// Restore a roster from persisted users. The seeded super admin is
    /// re-inserted if the snapshot predates it.
    pub fn from_users(users: Vec<User>) -> Self {
        let mut users = users;
        if !users.iter().any(|u| u.id == SUPER_ADMIN_ID) {
            users.insert(0, seeded_super_admin());
        }
        Self {
            users: RwLock::new(users),
        }
    }

    /// Register a new student. Student ids are unique across the roster.
    pub fn register(
        &self,
        student_id: impl Into<String>,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<User, DomainError> {
        let student_id = student_id.into();
        let mut users = self.users.write().expect("roster poisoned");
        if users.iter().any(|u| u.student_id == student_id) {
            return Err(DomainError::DuplicateStudentId(student_id));
        }

        let user = User::new(student_id, name, UserRole::User, now);
        users.push(user.clone());
        Ok(user)
    }

    /// Change a user's role. Only the super admin may do this, and the
    /// seeded super-admin account itself is immutable.
    pub fn set_role(
        &self,
        acting_user_id: &str,
        student_id: &str,
        role: UserRole,
    ) -> Result<User, DomainError> {
        let mut users = self.users.write().expect("roster poisoned");

        let authorized = users
            .iter()
            .any(|u| u.id == acting_user_id && u.role == UserRole::SuperAdmin);
        if !authorized {
            return Err(DomainError::RoleRequired("super_admin".to_string()));
        }

        let user = users
            .iter_mut()
            .find(|u| u.student_id == student_id)
            .ok_or_else(|| DomainError::UserNotFound(student_id.to_string()))?;
        if user.id == SUPER_ADMIN_ID {
            return Err(DomainError::ProtectedAccount(SUPER_ADMIN_STUDENT_ID.to_string()));
        }

        user.role = role;
        Ok(user.clone())
    }

    /// Remove a user. The seeded super admin cannot be removed.
    pub fn delete(&self, acting_user_id: &str, student_id: &str) -> Result<(), DomainError> {
        let mut users = self.users.write().expect("roster poisoned");

        let authorized = users
            .iter()
            .any(|u| u.id == acting_user_id && u.role == UserRole::SuperAdmin);
        if !authorized {
            return Err(DomainError::RoleRequired("super_admin".to_string()));
        }

        let index = users
            .iter()
            .position(|u| u.student_id == student_id)
            .ok_or_else(|| DomainError::UserNotFound(student_id.to_string()))?;
        if users[index].id == SUPER_ADMIN_ID {
            return Err(DomainError::ProtectedAccount(SUPER_ADMIN_STUDENT_ID.to_string()));
        }
        users.remove(index);
        Ok(())
    }

    pub fn find_by_student_id(&self, student_id: &str) -> Option<User> {
        self.users
            .read()
            .expect("roster poisoned")
            .iter()
            .find(|u| u.student_id == student_id)
            .cloned()
    }

    /// All users, for listings and snapshots.
    pub fn users(&self) -> Vec<User> {
        self.users.read().expect("roster poisoned").clone()
    }
}

impl Default for InMemoryRoster {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterProvider for InMemoryRoster {
    fn find_user(&self, user_id: &str) -> Option<User> {
        self.users
            .read()
            .expect("roster poisoned")
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }

    fn admin_count(&self) -> usize {
        self.users
            .read()
            .expect("roster poisoned")
            .iter()
            .filter(|u| u.is_admin())
            .count()
    }

    fn super_admins(&self) -> Vec<User> {
        self.users
            .read()
            .expect("roster poisoned")
            .iter()
            .filter(|u| u.role == UserRole::SuperAdmin)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_roster_has_the_super_admin() {
        let roster = InMemoryRoster::new();
        assert_eq!(roster.admin_count(), 1);
        assert_eq!(
            roster.find_by_student_id(SUPER_ADMIN_STUDENT_ID).map(|u| u.role),
            Some(UserRole::SuperAdmin)
        );
    }

    #[test]
    fn test_register_rejects_duplicate_student_id() {
        let roster = InMemoryRoster::new();
        roster.register("2023-017", "Mei", Utc::now()).unwrap();

        let err = roster.register("2023-017", "Impostor", Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::DuplicateStudentId("2023-017".to_string()));
    }

    #[test]
    fn test_set_role_requires_super_admin() {
        let roster = InMemoryRoster::new();
        let student = roster.register("2023-017", "Mei", Utc::now()).unwrap();

        assert!(roster.set_role(&student.id, "2023-017", UserRole::Admin).is_err());

        let promoted = roster
            .set_role(SUPER_ADMIN_ID, "2023-017", UserRole::Admin)
            .unwrap();
        assert_eq!(promoted.role, UserRole::Admin);
        assert_eq!(roster.admin_count(), 2);
    }

    #[test]
    fn test_seeded_super_admin_is_immutable() {
        let roster = InMemoryRoster::new();
        assert!(roster
            .set_role(SUPER_ADMIN_ID, SUPER_ADMIN_STUDENT_ID, UserRole::User)
            .is_err());
        assert!(roster.delete(SUPER_ADMIN_ID, SUPER_ADMIN_STUDENT_ID).is_err());
        assert_eq!(roster.admin_count(), 1);
    }

    #[test]
    fn test_from_users_reseeds_missing_super_admin() {
        let roster = InMemoryRoster::from_users(vec![User::new(
            "2023-017",
            "Mei",
            UserRole::User,
            Utc::now(),
        )]);
        assert!(roster.find_by_student_id(SUPER_ADMIN_STUDENT_ID).is_some());
        assert_eq!(roster.users().len(), 2);
    }
}
