//! Port for the user roster.
//!
//! The roster is supplied by an external provider. The engine only ever
//! reads it: user lookups for identity snapshots, the admin count for quorum
//! sizing, and the super-admin set for feedback fan-out. User records are
//! never mutated through this port.

use council_domain::{User, UserRole};

/// Read-only access to the current set of users and their roles.
pub trait RosterProvider: Send + Sync {
    /// Look up a user by id.
    fn find_user(&self, user_id: &str) -> Option<User>;

    /// Size of the voting electorate: members with the admin or super-admin
    /// role.
    fn admin_count(&self) -> usize;

    /// All super admins (feedback recipients).
    fn super_admins(&self) -> Vec<User>;
}

/// Fixed in-memory roster for tests and static wiring.
pub struct FixedRoster {
    users: Vec<User>,
}

impl FixedRoster {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl RosterProvider for FixedRoster {
    fn find_user(&self, user_id: &str) -> Option<User> {
        self.users.iter().find(|u| u.id == user_id).cloned()
    }

    fn admin_count(&self) -> usize {
        self.users.iter().filter(|u| u.is_admin()).count()
    }

    fn super_admins(&self) -> Vec<User> {
        self.users
            .iter()
            .filter(|u| u.role == UserRole::SuperAdmin)
            .cloned()
            .collect()
    }
}
