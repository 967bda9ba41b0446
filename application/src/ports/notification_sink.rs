//! Port for notification delivery.
//!
//! The engine hands finished [`Notification`] records to the sink; storage,
//! display, and read-state management are the sink's concern. Delivery is
//! intentionally synchronous and non-fallible so a broken sink can never
//! disrupt a state transition.

use council_domain::Notification;
use std::sync::Mutex;

/// Port for delivering notifications produced by the engine.
pub trait NotificationSink: Send + Sync {
    /// Accept a notification record.
    fn deliver(&self, notification: Notification);
}

/// No-op implementation for tests and when notifications are disabled.
pub struct NoNotificationSink;

impl NotificationSink for NoNotificationSink {
    fn deliver(&self, _notification: Notification) {}
}

/// Test sink that records every delivered notification.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered.lock().expect("sink poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().expect("sink poisoned").len()
    }
}

impl NotificationSink for RecordingSink {
    fn deliver(&self, notification: Notification) {
        self.delivered.lock().expect("sink poisoned").push(notification);
    }
}
