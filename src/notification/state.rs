use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct NotificationState {
    current: Option<Notification>,
    duration: Duration,
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl NotificationState {
    pub fn new(dismiss_ms: u64) -> Self {
        Self {
            current: None,
            duration: Duration::from_millis(dismiss_ms),
        }
    }

    pub fn show(&mut self, message: &str) {
        self.show_styled_at(message, NotificationStyle::Success, Instant::now());
    }

    pub fn show_error(&mut self, message: &str) {
        self.show_styled_at(message, NotificationStyle::Error, Instant::now());
    }

    /// Replace any visible toast with a new one shown from `now`
    pub fn show_styled_at(&mut self, message: &str, style: NotificationStyle, now: Instant) {
        log::debug!("Toast ({:?}): {}", style, message);
        self.current = Some(Notification {
            message: message.to_string(),
            style,
            expires_at: now + self.duration,
        });
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }

    /// Drop the toast once its time is up; returns true if one was removed
    pub fn clear_if_expired(&mut self) -> bool {
        self.clear_if_expired_at(Instant::now())
    }

    pub fn clear_if_expired_at(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod state_tests;
