//! Client-side routing and the guard in front of protected views

pub mod guard;
pub mod route;
pub mod router;

pub use guard::{decide, guard, GuardDecision, DEFAULT_LANDING, LOGIN_ROUTE};
pub use route::Route;
pub use router::{Navigation, Router};
