//! Console delivery of notifications
//!
//! Core handlers report through the [`dashboard_core::Notifier`] trait. The
//! CLI implementation forwards each notification over a channel to a
//! renderer task that prints it, keeping output off the request path.

pub mod provider;
pub mod renderer;

pub use provider::{ChannelNotifier, ConsoleNavigator, create_notification_channel};
pub use renderer::{NotificationRenderer, render_notifications, request_spinner};
