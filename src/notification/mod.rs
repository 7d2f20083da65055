//! Transient toast messages
//!
//! Any screen can show a toast; it stays up for the configured duration and
//! is replaced by the next one.

mod render;
mod state;

pub use render::render_notification;
pub use state::{Notification, NotificationState, NotificationStyle};
