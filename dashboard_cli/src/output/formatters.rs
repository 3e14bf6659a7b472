use super::{MoneyReport, OutputFormatter};
use crate::orchestrators::{
    ProductUpdateReport, TaxListReport, TaxUpdateReport, TransactionReport,
};
use anyhow::Result;
use colored::*;
use dashboard_core::notify::{Notification, NotificationStatus};
use dashboard_core::taxes::TaxConfigurationError;
use dashboard_core::RemoteError;
use serde::Serialize;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn status_line(&self, ok: bool, text: &str) -> String {
        if ok {
            format!("{} {text}\n", self.colorize("✓", |s| s.green()))
        } else {
            format!("{} {text}\n", self.colorize("✗", |s| s.red()))
        }
    }

    fn push_notifications(&self, output: &mut String, notifications: &[Notification]) {
        if notifications.is_empty() {
            return;
        }
        output.push_str("\nNotifications:\n");
        for notification in notifications {
            let label = match notification.status {
                NotificationStatus::Success => self.colorize("success", |s| s.green()),
                NotificationStatus::Error => self.colorize("error", |s| s.red()),
                NotificationStatus::Info => self.colorize("info", |s| s.cyan()),
                NotificationStatus::Warning => self.colorize("warning", |s| s.yellow()),
            };
            match &notification.title {
                Some(title) => {
                    output.push_str(&format!("  [{label}] {title}: {}\n", notification.text))
                }
                None => output.push_str(&format!("  [{label}] {}\n", notification.text)),
            }
        }
    }

    fn remote_error_line(&self, error: &RemoteError) -> String {
        let kind = self.colorize(error.kind().as_str(), |s| s.yellow());
        let field = error.field().unwrap_or("-");
        match error.message() {
            Some(message) => format!("  {kind} {field}: {} ({message})\n", error.code()),
            None => format!("  {kind} {field}: {}\n", error.code()),
        }
    }

    fn tax_error_line(&self, error: &TaxConfigurationError) -> String {
        let field = error.field.as_deref().unwrap_or("-");
        match &error.message {
            Some(message) => format!("  {field}: {} ({message})\n", error.code),
            None => format!("  {field}: {}\n", error.code),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_product_update(&self, report: &ProductUpdateReport) -> Result<String> {
        let mut output = String::new();

        if report.is_success() {
            output.push_str(&self.status_line(
                true,
                &format!("Product {} saved", report.product_id),
            ));
        } else {
            output.push_str(&self.status_line(
                false,
                &format!(
                    "Product {} saved with {} errors",
                    report.product_id,
                    report.errors.len()
                ),
            ));
            output.push_str("\nErrors:\n");
            for error in &report.errors {
                output.push_str(&self.remote_error_line(error));
            }
        }

        if !report.steps.is_empty() {
            output.push_str("\nRequests:\n");
            for step in &report.steps {
                output.push_str(&format!("  {:<28} {}\n", step.step, step.calls));
            }
        }

        self.push_notifications(&mut output, &report.notifications);
        Ok(output)
    }

    fn format_tax_list(&self, report: &TaxListReport) -> Result<String> {
        let mut output = String::new();

        if let Some(url) = &report.redirected_to {
            output.push_str(&format!("Redirected to {url}\n\n"));
        }

        if report.configurations.is_empty() {
            output.push_str("No countries configured\n");
        }

        for configuration in &report.configurations {
            let selected = report
                .selected
                .as_deref()
                .is_some_and(|code| code == configuration.country.code);
            let header = format!(
                "{} {}",
                configuration.country.code, configuration.country.name
            );
            if selected {
                output.push_str(&format!("{}\n", self.colorize(&header, |s| s.bold())));
            } else {
                output.push_str(&format!("{header}\n"));
            }

            for rate in &configuration.tax_class_country_rates {
                let class = rate
                    .tax_class
                    .as_ref()
                    .map(|class| class.name.as_str())
                    .unwrap_or("Country default rate");
                let value = match rate.rate {
                    Some(rate) => format!("{rate}%"),
                    None => self.colorize("not set", |s| s.dimmed()),
                };
                output.push_str(&format!("  {class:<28} {value}\n"));
            }
        }

        if !report.tax_classes.is_empty() {
            let names: Vec<&str> = report
                .tax_classes
                .iter()
                .map(|class| class.name.as_str())
                .collect();
            output.push_str(&format!("\nTax classes: {}\n", names.join(", ")));
        }

        Ok(output)
    }

    fn format_tax_updates(&self, reports: &[TaxUpdateReport]) -> Result<String> {
        let mut output = String::new();
        for report in reports {
            if report.is_success() {
                output.push_str(&self.status_line(
                    true,
                    &format!("Tax rates of {} saved", report.country),
                ));
            } else {
                output.push_str(&self.status_line(
                    false,
                    &format!("Tax rates of {} rejected", report.country),
                ));
                for error in &report.errors {
                    output.push_str(&self.tax_error_line(error));
                }
            }
            self.push_notifications(&mut output, &report.notifications);
        }
        Ok(output)
    }

    fn format_transaction(&self, report: &TransactionReport) -> Result<String> {
        let subject = match report.amount {
            Some(amount) => format!("{} of {amount} on {}", report.action, report.transaction_id),
            None => format!("{} on {}", report.action, report.transaction_id),
        };

        if !report.confirmed {
            return Ok(format!("Cancelled {subject}\n"));
        }
        if report.is_success() {
            return Ok(self.status_line(true, &format!("Requested {subject}")));
        }

        let mut output = self.status_line(false, &format!("Request for {subject} failed"));
        for error in &report.errors {
            let field = error.field.as_deref().unwrap_or("-");
            match &error.message {
                Some(message) => {
                    output.push_str(&format!("  {field}: {} ({message})\n", error.code))
                }
                None => output.push_str(&format!("  {field}: {}\n", error.code)),
            }
        }
        Ok(output)
    }

    fn format_money(&self, report: &MoneyReport) -> Result<String> {
        Ok(format!("{} {}", report.currency, report.amount))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_product_update(&self, report: &ProductUpdateReport) -> Result<String> {
        self.render(report)
    }

    fn format_tax_list(&self, report: &TaxListReport) -> Result<String> {
        self.render(report)
    }

    fn format_tax_updates(&self, reports: &[TaxUpdateReport]) -> Result<String> {
        self.render(reports)
    }

    fn format_transaction(&self, report: &TransactionReport) -> Result<String> {
        self.render(report)
    }

    fn format_money(&self, report: &MoneyReport) -> Result<String> {
        self.render(report)
    }
}
