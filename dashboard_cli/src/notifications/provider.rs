//! Notifier and navigator implementations for the CLI

use dashboard_core::navigation::Navigator;
use dashboard_core::notify::{Notification, Notifier};
use log::{debug, warn};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Channel-based notifier
///
/// Sends every notification to a separate rendering task. Once
/// [`ChannelNotifier::close`] has been called further notifications are
/// dropped, which lets the renderer finish.
pub struct ChannelNotifier {
    tx: Mutex<Option<mpsc::UnboundedSender<Notification>>>,
}

impl ChannelNotifier {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self {
            tx: Mutex::new(Some(tx)),
        }
    }

    /// Drop the sender so the renderer can exit its loop
    pub fn close(&self) {
        let mut guard = self.tx.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = None;
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        let tx = {
            self.tx
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .clone()
        };
        match tx {
            Some(tx) => {
                if tx.send(notification).is_err() {
                    debug!("Notification renderer is gone, dropping notification");
                }
            }
            None => warn!("Notification after close: {}", notification.text),
        }
    }
}

/// Create a notifier and the receiver its renderer reads from
pub fn create_notification_channel() -> (Arc<ChannelNotifier>, mpsc::UnboundedReceiver<Notification>)
{
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(ChannelNotifier::new(tx)), rx)
}

/// Navigator for a terminal: there is no page to move to, so the target URL
/// is remembered and logged
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    visited: Mutex<Vec<String>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &str) {
        debug!("Navigating to {url}");
        self.visited
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
    }
}
