//! User notifications
//!
//! Components that tell the user about outcomes receive a [`Notifier`]
//! explicitly. How a notification is shown is up to the implementation.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub status: NotificationStatus,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Notification {
    pub fn new(status: NotificationStatus, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
            title: None,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(NotificationStatus::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(NotificationStatus::Error, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(NotificationStatus::Info, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(NotificationStatus::Warning, text)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Receives notifications meant for the user
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}
