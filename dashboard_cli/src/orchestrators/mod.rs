//! Orchestrators coordinating the dashboard commands
//!
//! Each orchestrator wires a core view or handler to the console: it owns
//! the notification channel and the spinner, and turns the outcome into a
//! serializable report for the output formatters.

pub mod product_update;
pub mod taxes;
pub mod transaction;

pub use product_update::{ProductChanges, ProductUpdateOrchestrator, ProductUpdateReport};
pub use taxes::{TaxListReport, TaxOrchestrator, TaxUpdateReport, parse_rate};
pub use transaction::{TransactionOrchestrator, TransactionReport};

use crate::notifications::{
    ChannelNotifier, NotificationRenderer, create_notification_channel, render_notifications,
    request_spinner,
};
use anyhow::{Context, Result};
use dashboard_core::notify::Notification;
use indicatif::ProgressBar;
use log::warn;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// How a command presents its progress
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOptions {
    /// Print notifications as they arrive
    pub live_notifications: bool,
    pub use_color: bool,
    pub show_spinner: bool,
}

/// Notifications and spinner for the duration of one command
pub(crate) struct NotificationSession {
    notifier: Arc<ChannelNotifier>,
    rendering: JoinHandle<Vec<Notification>>,
    spinner: Option<ProgressBar>,
}

impl NotificationSession {
    pub(crate) fn start(options: ConsoleOptions, message: &str) -> Self {
        let spinner = options.show_spinner.then(|| request_spinner(message));

        let mut renderer = if options.live_notifications {
            NotificationRenderer::new(options.use_color)
        } else {
            NotificationRenderer::silent()
        };
        if let Some(spinner) = &spinner {
            renderer = renderer.with_spinner(spinner.clone());
        }

        let (notifier, rx) = create_notification_channel();
        let rendering = tokio::spawn(render_notifications(rx, renderer));

        Self {
            notifier,
            rendering,
            spinner,
        }
    }

    pub(crate) fn notifier(&self) -> Arc<ChannelNotifier> {
        self.notifier.clone()
    }

    /// Stop accepting notifications and return every one delivered
    async fn finish(self) -> Result<Vec<Notification>> {
        self.notifier.close();
        let rendered = self.rendering.await;
        if let Some(spinner) = self.spinner {
            spinner.finish_and_clear();
        }
        rendered.context("Notification renderer stopped unexpectedly")
    }

    /// Finish the session and pair `outcome` with the delivered notifications
    ///
    /// A failed `outcome` takes precedence over a renderer failure.
    pub(crate) async fn settle<T>(self, outcome: Result<T>) -> Result<(T, Vec<Notification>)> {
        let finished = self.finish().await;
        match (outcome, finished) {
            (Ok(value), Ok(notifications)) => Ok((value, notifications)),
            (Ok(_), Err(renderer)) => Err(renderer),
            (Err(e), Ok(_)) => Err(e),
            (Err(e), Err(renderer)) => {
                warn!("{renderer:#}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::notify::Notifier;

    fn quiet() -> ConsoleOptions {
        ConsoleOptions::default()
    }

    #[tokio::test]
    async fn test_settle_collects_notifications() {
        let session = NotificationSession::start(quiet(), "Saving");
        session.notifier().notify(Notification::success("Saved changes"));

        let (value, notifications) = session.settle(Ok(7)).await.unwrap();

        assert_eq!(value, 7);
        assert_eq!(notifications, vec![Notification::success("Saved changes")]);
    }

    #[tokio::test]
    async fn test_settle_reports_renderer_failure() {
        let session = NotificationSession::start(quiet(), "Saving");
        session.rendering.abort();

        let error = session.settle(Ok(())).await.unwrap_err();

        assert!(error.to_string().contains("Notification renderer"));
    }

    #[tokio::test]
    async fn test_settle_keeps_submit_error_over_renderer_failure() {
        let session = NotificationSession::start(quiet(), "Saving");
        session.rendering.abort();

        let error = session
            .settle::<()>(Err(anyhow::anyhow!("Product update was rejected")))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Product update was rejected");
    }
}
