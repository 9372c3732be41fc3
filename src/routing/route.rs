use std::fmt;

use serde::Serialize;

/// Client-side destinations of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Drones,
    Pilots,
    Flights,
    CreateFlight,
    Monitoring,
    Profile,
    NoFlyZones,
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Drones,
        Route::Pilots,
        Route::Flights,
        Route::CreateFlight,
        Route::Monitoring,
        Route::Profile,
        Route::NoFlyZones,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Drones => "/drones",
            Route::Pilots => "/pilots",
            Route::Flights => "/flights",
            Route::CreateFlight => "/flights/create",
            Route::Monitoring => "/monitoring",
            Route::Profile => "/profile",
            Route::NoFlyZones => "/no-fly-zones",
        }
    }

    /// Resolve a path; anything unmatched (including `/`) lands on `/login`.
    ///
    /// A query string, fragment or trailing slash is ignored.
    pub fn from_path(path: &str) -> Route {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .unwrap_or(Route::Login)
    }

    /// Reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
