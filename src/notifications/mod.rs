//! Notifications module
//!
//! Transient, self-expiring user feedback, decoupled from any single view.
//!
//! # Usage
//! ```ignore
//! use utm_dispatch::notifications::{NewNotification, NotificationQueue};
//!
//! let queue = NotificationQueue::new();
//! let id = queue.add(NewNotification::error("Invalid email or password"));
//! queue.remove(id);
//! ```

pub mod model;
pub mod queue;

pub use model::{NewNotification, Notification, Severity, DEFAULT_DURATION};
pub use queue::NotificationQueue;
