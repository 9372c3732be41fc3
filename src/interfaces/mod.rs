//! View boundary: turns form input into store calls and every outcome into
//! a notification.

pub mod auth;
pub mod flights;

pub use auth::{submit_login, submit_register, LoginForm, RegisterForm};
pub use flights::submit_flight;
