//! Error types for the dashboard core library
//!
//! Remote validation problems (a mutation answering with field errors) are
//! *data* and live in [`crate::product::RemoteError`]. The types here cover
//! failures that reject an operation outright.

use thiserror::Error;

pub mod transport;
pub mod validation;

pub use self::transport::TransportError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the dashboard core library
///
/// Errors are categorized into two main types:
/// - Transport errors: the remote API could not be reached or rejected the request
/// - Validation errors: input and configuration problems detected locally
#[derive(Error, Debug)]
pub enum Error {
    /// Transport related errors
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Whether retrying the same operation later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_transient(),
            Self::Validation(_) => false,
        }
    }
}

// Conversions from external error types

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Transport(TransportError::Timeout);
        }
        if err.is_connect() {
            return Self::Transport(TransportError::NetworkOffline);
        }
        if let Some(status) = err.status() {
            return Self::Transport(TransportError::server_error(status.as_u16(), &err.to_string()));
        }
        if err.is_decode() {
            return Self::Transport(TransportError::decode(err.to_string()));
        }
        Self::Transport(TransportError::other(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(TransportError::decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn test_network_offline_error() {
        let error = Error::Transport(TransportError::NetworkOffline);

        assert!(matches!(
            error,
            Error::Transport(TransportError::NetworkOffline)
        ));
        assert!(error.to_string().contains("unreachable"));
        assert!(error.is_transient());
    }

    #[test]
    fn test_server_error_includes_status() {
        let error = Error::Transport(TransportError::server_error(502, "Bad gateway"));

        assert!(error.to_string().contains("502"));
        assert!(error.to_string().contains("Bad gateway"));
        assert!(error.is_transient());
    }

    #[test]
    fn test_missing_field_error() {
        let error = Error::Validation(ValidationError::missing_field("product.id"));

        assert!(matches!(
            error,
            Error::Validation(ValidationError::MissingField { .. })
        ));
        assert!(error.to_string().contains("product.id"));
        assert!(!error.is_transient());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = json_error.into();

        assert!(matches!(
            error,
            Error::Transport(TransportError::Decode { .. })
        ));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = Error::Transport(TransportError::other("boom"));

        // Should compile if Error implements std::error::Error
        let _: &dyn StdError = &error;
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_error() -> Result<()> {
            Err(Error::Transport(TransportError::Timeout))
        }

        assert!(returns_error().is_err());
    }
}
