use crate::domain::{RoleRequirement, User, UserRole};

/// Read-only view of the session at one point in time.
///
/// Authentication is derived from the presence of a user, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl SessionSnapshot {
    /// State of a freshly created store: nothing known yet.
    pub fn initial() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Permission query against this snapshot; unauthenticated never passes.
    pub fn has_permission(&self, requirement: &RoleRequirement) -> bool {
        self.role()
            .is_some_and(|role| requirement.is_satisfied_by(role))
    }
}
