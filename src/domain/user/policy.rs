//! Role permission policy
//!
//! The model is flat: `admin` implies every role, every other role implies
//! only itself. There is no hierarchy between the non-admin roles.

use super::UserRole;

/// Roles a holder of `role` is treated as having.
pub fn implied_roles(role: UserRole) -> &'static [UserRole] {
    match role {
        UserRole::Admin => &UserRole::ALL,
        UserRole::Controller => &[UserRole::Controller],
        UserRole::Dispatcher => &[UserRole::Dispatcher],
        UserRole::Operator => &[UserRole::Operator],
        UserRole::Pilot => &[UserRole::Pilot],
        UserRole::Observer => &[UserRole::Observer],
        UserRole::Support => &[UserRole::Support],
    }
}

fn implies_all(implied: &[UserRole]) -> bool {
    UserRole::ALL.iter().all(|r| implied.contains(r))
}

/// A required role, or a set of roles any one of which is enough.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    Role(UserRole),
    AnyOf(Vec<UserRole>),
}

impl RoleRequirement {
    /// Whether a holder of `role` meets this requirement.
    ///
    /// An empty `AnyOf` set is met only by the super-role.
    pub fn is_satisfied_by(&self, role: UserRole) -> bool {
        let implied = implied_roles(role);
        match self {
            RoleRequirement::Role(required) => implied.contains(required),
            RoleRequirement::AnyOf(required) if required.is_empty() => implies_all(implied),
            RoleRequirement::AnyOf(required) => required.iter().any(|r| implied.contains(r)),
        }
    }
}

impl From<UserRole> for RoleRequirement {
    fn from(role: UserRole) -> Self {
        RoleRequirement::Role(role)
    }
}

impl From<Vec<UserRole>> for RoleRequirement {
    fn from(roles: Vec<UserRole>) -> Self {
        RoleRequirement::AnyOf(roles)
    }
}

impl From<&[UserRole]> for RoleRequirement {
    fn from(roles: &[UserRole]) -> Self {
        RoleRequirement::AnyOf(roles.to_vec())
    }
}

impl<const N: usize> From<[UserRole; N]> for RoleRequirement {
    fn from(roles: [UserRole; N]) -> Self {
        RoleRequirement::AnyOf(roles.to_vec())
    }
}
