//! Session management - who is using the application right now

pub mod state;
pub mod store;

pub use state::SessionSnapshot;
pub use store::{SessionStore, DEFAULT_REQUEST_TIMEOUT, IDENTITY_SLOT};
