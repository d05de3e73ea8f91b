//! Status messages shown on the message bar.
//!
//! A message stays visible for a fixed time after it was set and is then
//! hidden; only the most recent message is kept.

use std::time::{Duration, Instant};

/// Type of status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Hints and results of successful operations.
    Info,
    /// Failed operations.
    Error,
}

/// A single status message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// Type of message.
    pub notification_type: NotificationType,
    /// When the message was set.
    pub created_at: Instant,
    /// How long the message should be visible.
    pub duration: Duration,
}

impl Notification {
    /// Creates a new message visible for `duration`.
    pub fn new(
        message: impl Into<String>,
        notification_type: NotificationType,
        duration: Duration,
    ) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration,
        }
    }

    /// Returns whether the message has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Returns whether the message has expired as of `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }
}

/// Holds the current status message.
#[derive(Debug)]
pub struct NotificationManager {
    current: Option<Notification>,
    duration: Duration,
}

impl NotificationManager {
    /// Creates a manager whose messages stay visible for `duration`.
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    /// Replaces the current message.
    pub fn notify(&mut self, message: impl Into<String>, notification_type: NotificationType) {
        let notification = Notification::new(message, notification_type, self.duration);
        match notification_type {
            NotificationType::Info => log::trace!("status: {}", notification.message),
            NotificationType::Error => log::warn!("status: {}", notification.message),
        }
        self.current = Some(notification);
    }

    /// Sets an info message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationType::Info);
    }

    /// Sets an error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationType::Error);
    }

    /// Returns the message text if it has not expired yet.
    pub fn visible(&self) -> Option<&str> {
        self.visible_at(Instant::now())
    }

    /// Returns the message text if it has not expired as of `now`.
    pub fn visible_at(&self, now: Instant) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|n| !n.is_expired_at(now))
            .map(|n| n.message.as_str())
    }

    /// Clears the current message.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_creation() {
        let notification =
            Notification::new("Test message", NotificationType::Info, Duration::from_secs(5));
        assert_eq!(notification.message, "Test message");
        assert!(!notification.is_expired());
    }

    #[test]
    fn test_message_expires() {
        let mut manager = NotificationManager::new(Duration::from_secs(5));
        manager.info("HELP: Ctrl-S = save");
        assert_eq!(manager.visible(), Some("HELP: Ctrl-S = save"));

        let later = Instant::now() + Duration::from_secs(6);
        assert_eq!(manager.visible_at(later), None);
    }

    #[test]
    fn test_latest_message_wins() {
        let mut manager = NotificationManager::new(Duration::from_secs(5));
        manager.info("first");
        manager.error("second");
        assert_eq!(manager.visible(), Some("second"));

        manager.clear();
        assert_eq!(manager.visible(), None);
    }
}
