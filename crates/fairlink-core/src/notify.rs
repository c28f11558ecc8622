// ── User-visible notifications ──
//
// Short messages for whatever surface is showing toasts (the CLI prints
// them to stderr). Fan-out over a broadcast channel; every notification
// is also logged, so nothing is lost when no one is listening.

use serde::Serialize;
use strum::Display;
use tokio::sync::broadcast;
use tracing::{error, info};

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Broadcast sender for notifications. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Notifications {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Log and broadcast a notification.
    pub fn publish(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => {
                info!(title = %notification.title, "{}", notification.description);
            }
            NotificationLevel::Error => {
                error!(title = %notification.title, "{}", notification.description);
            }
        }
        // No receivers is fine: the log line above is the record.
        let _ = self.tx.send(notification);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_published_notifications() {
        let notifications = Notifications::new();
        let mut rx = notifications.subscribe();
        notifications.publish(Notification::error("Save failed", "store unreachable"));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.level, NotificationLevel::Error);
        assert_eq!(received.title, "Save failed");
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        Notifications::new().publish(Notification::success("Saved", "ok"));
    }
}
