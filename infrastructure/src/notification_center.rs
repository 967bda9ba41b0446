//! Notification center
//!
//! Stores the notifications the engine emits and owns their read state.
//! Newest first per recipient. Notification content is never touched after
//! delivery; only `is_read` toggles and deletions happen here.

use council_application::ports::notification_sink::NotificationSink;
use council_domain::Notification;
use std::sync::RwLock;

/// Thread-safe notification store implementing the sink port.
#[derive(Default)]
pub struct NotificationCenter {
    notifications: RwLock<Vec<Notification>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore from persisted notifications, preserving order.
    pub fn from_notifications(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: RwLock::new(notifications),
        }
    }

    /// Notifications for one recipient, newest first.
    pub fn for_user(&self, user_id: &str) -> Vec<Notification> {
        self.notifications
            .read()
            .expect("center poisoned")
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn unread_count(&self, user_id: &str) -> usize {
        self.notifications
            .read()
            .expect("center poisoned")
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count()
    }

    /// Mark one notification read. Returns false for unknown ids.
    pub fn mark_read(&self, notification_id: &str) -> bool {
        let mut notifications = self.notifications.write().expect("center poisoned");
        match notifications.iter_mut().find(|n| n.id == notification_id) {
            Some(notification) => {
                notification.mark_read();
                true
            }
            None => false,
        }
    }

    /// Mark everything for one recipient read. Returns how many flipped.
    pub fn mark_all_read(&self, user_id: &str) -> usize {
        let mut notifications = self.notifications.write().expect("center poisoned");
        let mut flipped = 0;
        for notification in notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.mark_read();
            flipped += 1;
        }
        flipped
    }

    /// Remove one notification. Returns false for unknown ids.
    pub fn delete(&self, notification_id: &str) -> bool {
        let mut notifications = self.notifications.write().expect("center poisoned");
        let before = notifications.len();
        notifications.retain(|n| n.id != notification_id);
        notifications.len() != before
    }

    /// Everything in the store, for snapshots.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.read().expect("center poisoned").clone()
    }
}

impl NotificationSink for NotificationCenter {
    fn deliver(&self, notification: Notification) {
        // Newest first
        self.notifications
            .write()
            .expect("center poisoned")
            .insert(0, notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use council_domain::NotificationKind;

    fn notification(user_id: &str, title: &str) -> Notification {
        Notification::new(
            user_id,
            NotificationKind::ReplyReceived,
            title,
            "content",
            Utc::now(),
        )
    }

    #[test]
    fn test_for_user_filters_and_orders_newest_first() {
        let center = NotificationCenter::new();
        center.deliver(notification("u1", "first"));
        center.deliver(notification("u2", "other"));
        center.deliver(notification("u1", "second"));

        let mine = center.for_user("u1");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].title, "second");
        assert_eq!(mine[1].title, "first");
    }

    #[test]
    fn test_read_state_toggles() {
        let center = NotificationCenter::new();
        center.deliver(notification("u1", "a"));
        center.deliver(notification("u1", "b"));
        assert_eq!(center.unread_count("u1"), 2);

        let id = center.for_user("u1")[0].id.clone();
        assert!(center.mark_read(&id));
        assert_eq!(center.unread_count("u1"), 1);

        assert_eq!(center.mark_all_read("u1"), 1);
        assert_eq!(center.unread_count("u1"), 0);
        assert!(!center.mark_read("nope"));
    }

    #[test]
    fn test_delete() {
        let center = NotificationCenter::new();
        center.deliver(notification("u1", "a"));
        let id = center.for_user("u1")[0].id.clone();

        assert!(center.delete(&id));
        assert!(!center.delete(&id));
        assert!(center.for_user("u1").is_empty());
    }
}
