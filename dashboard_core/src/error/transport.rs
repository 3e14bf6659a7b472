//! Transport related error types

use thiserror::Error;

/// Failures talking to the remote GraphQL API
#[derive(Error, Debug)]
pub enum TransportError {
    /// API is unreachable
    #[error("API is unreachable or the network is offline")]
    NetworkOffline,

    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP response
    #[error("API server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// GraphQL-level errors returned alongside (or instead of) data
    #[error("GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Generic transport error
    #[error("Transport error: {message}")]
    Other { message: String },
}

impl TransportError {
    /// Create a server error with status and message
    pub fn server_error(status: u16, message: &str) -> Self {
        Self::ServerError {
            status,
            message: message.to_string(),
        }
    }

    /// Create a GraphQL error from the envelope's error messages
    pub fn graphql(messages: Vec<String>) -> Self {
        Self::GraphQl { messages }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a generic transport error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this error is transient and can be retried
    pub fn is_transient(&self) -> bool {
        match self {
            Self::NetworkOffline | Self::Timeout => true,
            Self::ServerError { status, .. } => matches!(status, 502..=504 | 429),
            _ => false,
        }
    }

    /// Check if this error indicates a permanent failure
    pub fn is_permanent(&self) -> bool {
        match self {
            Self::ServerError { status, .. } => matches!(status, 400..=499) && *status != 429,
            Self::GraphQl { .. } | Self::Decode { .. } => true,
            _ => false,
        }
    }
}
