//! Dashboard Core Library
//!
//! This is the core library for the merchant dashboard, providing the
//! product update orchestration, tax and order views, money formatting and
//! the GraphQL transport they talk through.

pub mod error;
pub mod graphql;
pub mod messages;
pub mod money;
pub mod navigation;
pub mod notify;
pub mod orders;
pub mod product;
pub mod taxes;

// Mock implementations and testing utilities live in the dashboard-test-utils crate

// Re-export main types
pub use error::{Error, Result};
pub use graphql::{GraphQlClient, SaleorApi};
pub use messages::{EnglishMessages, MessageCatalog};
pub use money::{Locale, Money, MoneyDisplay, format_amount};
pub use navigation::{ConfirmButtonState, DialogActions, Navigator, QueryParams};
pub use notify::{Notification, NotificationStatus, Notifier, NullNotifier};
pub use orders::{TransactionAction, TransactionActionDialog, TransactionApi};
pub use product::{
    ProductMutations, ProductQueries, ProductUpdateHandler, ProductUpdateSubmitData, RemoteError,
    RemoteErrorKind, SubmitOutcome,
};
pub use taxes::{CountriesListView, TaxApi};

/// Core client configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint of the shop API
    pub api_url: String,
    pub auth_token: Option<String>,
    pub timeout_seconds: u64,
    /// Language tag used for number formatting
    pub locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/graphql/".to_string(),
            auth_token: None,
            timeout_seconds: 30,
            locale: "en".to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            api_url: "http://127.0.0.1:9/graphql/".to_string(),
            auth_token: Some("test-token".to_string()),
            timeout_seconds: 2,
            locale: "en".to_string(),
        }
    }

    /// Number formatting for the configured locale
    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.api_url.ends_with("/graphql/"));
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.auth_token.is_none());
        assert_eq!(config.locale(), Locale::english());
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = ClientConfig::test();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ClientConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_api_builds_from_config() {
        assert!(SaleorApi::new(&ClientConfig::test()).is_ok());
    }
}
