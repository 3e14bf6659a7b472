//! Notification rendering for the CLI
//!
//! Prints notifications to stderr as they arrive and keeps them so the
//! command can include them in its final output.

use colored::*;
use dashboard_core::notify::{Notification, NotificationStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;

/// Drain `rx` into `renderer` until every sender is gone
pub async fn render_notifications(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    mut renderer: NotificationRenderer,
) -> Vec<Notification> {
    while let Some(notification) = rx.recv().await {
        renderer.handle(notification);
    }
    renderer.finish()
}

pub struct NotificationRenderer {
    use_color: bool,
    print: bool,
    spinner: Option<ProgressBar>,
    delivered: Vec<Notification>,
}

impl NotificationRenderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            use_color,
            print: true,
            spinner: None,
            delivered: Vec::new(),
        }
    }

    /// Collect without printing, for machine-readable output
    pub fn silent() -> Self {
        Self {
            print: false,
            ..Self::new(false)
        }
    }

    /// Print above this spinner instead of through it
    pub fn with_spinner(mut self, spinner: ProgressBar) -> Self {
        self.spinner = Some(spinner);
        self
    }

    pub fn format(&self, notification: &Notification) -> String {
        let (marker, label) = match notification.status {
            NotificationStatus::Success => ("✓", "success"),
            NotificationStatus::Error => ("✗", "error"),
            NotificationStatus::Info => ("→", "info"),
            NotificationStatus::Warning => ("!", "warning"),
        };

        let marker = if self.use_color {
            match notification.status {
                NotificationStatus::Success => marker.green().to_string(),
                NotificationStatus::Error => marker.red().to_string(),
                NotificationStatus::Info => marker.cyan().to_string(),
                NotificationStatus::Warning => marker.yellow().to_string(),
            }
        } else {
            format!("[{label}]")
        };

        match &notification.title {
            Some(title) if self.use_color => {
                format!("{marker} {}: {}", title.bold(), notification.text)
            }
            Some(title) => format!("{marker} {title}: {}", notification.text),
            None => format!("{marker} {}", notification.text),
        }
    }

    pub fn handle(&mut self, notification: Notification) {
        if self.print {
            let line = self.format(&notification);
            match &self.spinner {
                Some(spinner) => spinner.suspend(|| eprintln!("{line}")),
                None => eprintln!("{line}"),
            }
        }
        self.delivered.push(notification);
    }

    /// Every notification handled so far
    pub fn finish(self) -> Vec<Notification> {
        self.delivered
    }
}

/// Spinner shown while requests are in flight
pub fn request_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
