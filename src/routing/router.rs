//! Path resolution plus guarding for every destination

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::guard::{guard, GuardDecision, DEFAULT_LANDING};
use super::Route;
use crate::domain::RoleRequirement;
use crate::session::SessionSnapshot;

/// Outcome of navigating to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Destination the path resolved to
    pub route: Route,
    pub decision: GuardDecision,
}

impl Navigation {
    /// The route that ends up on screen, if one does
    pub fn landing(&self) -> Option<Route> {
        match self.decision {
            GuardDecision::Render => Some(self.route),
            GuardDecision::Redirect(to) => Some(to),
            GuardDecision::Loading => None,
        }
    }
}

/// Per-route role requirements. Routes without an entry only need a session.
#[derive(Debug, Clone, Default)]
pub struct Router {
    requirements: HashMap<Route, RoleRequirement>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, route: Route, requirement: impl Into<RoleRequirement>) -> Self {
        self.requirements.insert(route, requirement.into());
        self
    }

    pub fn requirement(&self, route: Route) -> Option<&RoleRequirement> {
        self.requirements.get(&route)
    }

    /// Resolve `path` and decide what to show for `session`.
    ///
    /// Public routes are never guarded, but a settled, signed-in session is
    /// sent on to the landing page instead of the login or register form.
    pub fn navigate(&self, path: &str, session: &SessionSnapshot) -> Navigation {
        let route = Route::from_path(path);
        let decision = if route.is_public() {
            if session.is_authenticated() && !session.is_loading {
                GuardDecision::Redirect(DEFAULT_LANDING)
            } else {
                GuardDecision::Render
            }
        } else {
            guard(session, self.requirement(route))
        };
        debug!(path, route = %route, ?decision, "Navigation resolved");
        Navigation { route, decision }
    }
}
