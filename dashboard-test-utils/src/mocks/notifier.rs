//! Notifier that keeps everything it is told

use dashboard_core::notify::{Notification, NotificationStatus, Notifier};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn with_status(&self, status: NotificationStatus) -> Vec<Notification> {
        self.notifications()
            .into_iter()
            .filter(|notification| notification.status == status)
            .collect()
    }

    pub fn successes(&self) -> Vec<Notification> {
        self.with_status(NotificationStatus::Success)
    }

    pub fn errors(&self) -> Vec<Notification> {
        self.with_status(NotificationStatus::Error)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
