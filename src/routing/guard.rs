//! Route guard
//!
//! Pure decision over the session state: render, keep showing a loading
//! indicator, or redirect. A failed role check is a soft fallback to the
//! landing page, not an error page.

use serde::Serialize;

use super::Route;
use crate::domain::{RoleRequirement, UserRole};
use crate::session::SessionSnapshot;

/// Where an unauthenticated visitor is sent
pub const LOGIN_ROUTE: Route = Route::Login;

/// Where an authenticated user lacking the required role is sent
pub const DEFAULT_LANDING: Route = Route::Dashboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "to", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session not determined yet; no redirect decision is made.
    Loading,
    Render,
    Redirect(Route),
}

/// Decide access to a protected destination.
pub fn decide(
    is_authenticated: bool,
    is_loading: bool,
    role: Option<UserRole>,
    required: Option<&RoleRequirement>,
) -> GuardDecision {
    if is_loading {
        return GuardDecision::Loading;
    }
    let Some(role) = role.filter(|_| is_authenticated) else {
        return GuardDecision::Redirect(LOGIN_ROUTE);
    };
    match required {
        Some(requirement) if !requirement.is_satisfied_by(role) => {
            GuardDecision::Redirect(DEFAULT_LANDING)
        }
        _ => GuardDecision::Render,
    }
}

/// [`decide`] against a session snapshot.
pub fn guard(session: &SessionSnapshot, required: Option<&RoleRequirement>) -> GuardDecision {
    decide(
        session.is_authenticated(),
        session.is_loading,
        session.role(),
        required,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_wins_regardless_of_authentication() {
        for authenticated in [false, true] {
            assert_eq!(
                decide(authenticated, true, Some(UserRole::Pilot), Some(&UserRole::Admin.into())),
                GuardDecision::Loading
            );
            assert_eq!(decide(authenticated, true, None, None), GuardDecision::Loading);
        }
    }

    #[test]
    fn test_unauthenticated_goes_to_login() {
        assert_eq!(decide(false, false, None, None), GuardDecision::Redirect(Route::Login));
        // An authenticated flag without an identity is not trusted.
        assert_eq!(decide(true, false, None, None), GuardDecision::Redirect(Route::Login));
    }

    #[test]
    fn test_missing_role_goes_to_landing_not_login() {
        let required = RoleRequirement::from(UserRole::Admin);
        assert_eq!(
            decide(true, false, Some(UserRole::Pilot), Some(&required)),
            GuardDecision::Redirect(Route::Dashboard)
        );
    }

    #[test]
    fn test_render_when_allowed() {
        assert_eq!(decide(true, false, Some(UserRole::Observer), None), GuardDecision::Render);
        let required = RoleRequirement::from([UserRole::Controller, UserRole::Dispatcher]);
        assert_eq!(
            decide(true, false, Some(UserRole::Dispatcher), Some(&required)),
            GuardDecision::Render
        );
        assert_eq!(
            decide(true, false, Some(UserRole::Admin), Some(&required)),
            GuardDecision::Render
        );
    }
}
