//! Sign-in and registration views

pub mod dto;
pub mod handlers;

pub use dto::{LoginForm, RegisterForm};
pub use handlers::{submit_login, submit_register};
