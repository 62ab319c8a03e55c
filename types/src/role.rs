//! User roles and the authenticated principal.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A member's role within the community.
///
/// Admin satisfies every moderator check; moderators cannot perform
/// admin-only actions (presentation sign-off).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular community member.
    Member,
    /// Can manage events and recordings.
    Moderator,
    /// Can additionally sign off on presentations and manage users.
    Admin,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this role carries moderator privileges (admins do).
    pub fn is_moderator(&self) -> bool {
        matches!(self, Self::Moderator | Self::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }
}

/// The authenticated caller of a core operation.
///
/// Identity management is external; every operation receives the resolved
/// principal as an explicit argument rather than reading ambient auth state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub role: Role,
}

impl Principal {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn is_moderator(&self) -> bool {
        self.role.is_moderator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_implies_moderator() {
        assert!(Role::Admin.is_moderator());
        assert!(Role::Moderator.is_moderator());
        assert!(!Role::Member.is_moderator());
    }

    #[test]
    fn only_admin_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Moderator.is_admin());
        assert!(!Role::Member.is_admin());
    }
}
