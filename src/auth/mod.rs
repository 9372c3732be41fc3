//! Authentication backends

pub mod backend;

pub use backend::{AuthBackend, MockAuthBackend, DEFAULT_SIMULATED_LATENCY};
