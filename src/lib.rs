//! # UTM Dispatch
//!
//! Client-side core of a drone flight-operations console: session,
//! notifications, theme and route guarding, over mock data sources.
//!
//! ## Architecture
//!
//! - **domain**: Drones, pilots, flight applications, no-fly zones, users and roles
//! - **infrastructure**: Key-value storage, mock repositories, weather client
//! - **auth**: Authentication backend port and its simulated implementation
//! - **session**: Signed-in identity and role checks
//! - **notifications**: Time-limited alert queue
//! - **theme**: Light / dark / auto display preference
//! - **routing**: Paths and the guard in front of protected views
//! - **interfaces**: Form submission at the view boundary
//! - **app**: Wiring and lifecycle of all of the above

pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod routing;
pub mod session;
pub mod shared;
pub mod theme;

pub use app::{init_tracing, open_storage, AppContext};
pub use config::{default_config_path, AppConfig, ConfigError};

pub use notifications::{NewNotification, Notification, NotificationQueue, Severity};
pub use routing::{GuardDecision, Route, Router};
pub use session::{SessionSnapshot, SessionStore};
pub use theme::{ColorSchemeSignal, ThemeMode, ThemeStore};
