mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use crate::orchestrators::{
    ProductUpdateReport, TaxListReport, TaxUpdateReport, TransactionReport,
};
use anyhow::Result;
use serde::Serialize;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }

    /// Explicit flag first, then the configured default; JSON when stdout is
    /// not a terminal and nothing was configured
    pub fn resolve(flag: Option<&str>, configured: &str, interactive: bool) -> Result<Self> {
        match flag {
            Some(flag) => Self::from_string(flag),
            None if configured.is_empty() && !interactive => Ok(Self::Json),
            None if configured.is_empty() => Ok(Self::Text),
            None => Self::from_string(configured),
        }
    }
}

/// An amount formatted for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoneyReport {
    pub currency: String,
    pub amount: String,
    pub locale: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    fn format_product_update(&self, report: &ProductUpdateReport) -> Result<String>;

    fn format_tax_list(&self, report: &TaxListReport) -> Result<String>;

    fn format_tax_updates(&self, reports: &[TaxUpdateReport]) -> Result<String>;

    fn format_transaction(&self, report: &TransactionReport) -> Result<String>;

    fn format_money(&self, report: &MoneyReport) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_string("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_string("csv").is_err());
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(
            OutputFormat::resolve(Some("text"), "json", false).unwrap(),
            OutputFormat::Text
        );
        assert_eq!(
            OutputFormat::resolve(None, "text", false).unwrap(),
            OutputFormat::Text
        );
        assert_eq!(OutputFormat::resolve(None, "", false).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::resolve(None, "", true).unwrap(), OutputFormat::Text);
    }
}
