//! Display theme: the tri-state preference, the OS signal it can follow,
//! and the store that ties them together.

pub mod mode;
pub mod signal;
pub mod store;

pub use mode::ThemeMode;
pub use signal::ColorSchemeSignal;
pub use store::{ThemeSnapshot, ThemeStore, THEME_SLOT};
