//! Errors reported by remote mutations
//!
//! Every mutation answers with its own error shape. They are normalized here
//! into one closed union so callers can render and count them uniformly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`RemoteError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    Product,
    Attribute,
    Upload,
    Stock,
    BulkStock,
    ChannelListing,
    Metadata,
}

impl RemoteErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Attribute => "attribute",
            Self::Upload => "upload",
            Self::Stock => "stock",
            Self::BulkStock => "bulk_stock",
            Self::ChannelListing => "channel_listing",
            Self::Metadata => "metadata",
        }
    }
}

impl fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level error returned by one of the product mutations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteError {
    Product {
        field: Option<String>,
        code: String,
        message: Option<String>,
        #[serde(default)]
        attributes: Vec<String>,
    },
    Attribute {
        field: Option<String>,
        code: String,
        message: Option<String>,
    },
    Upload {
        field: Option<String>,
        code: String,
        message: Option<String>,
    },
    Stock {
        field: Option<String>,
        code: String,
        message: Option<String>,
    },
    BulkStock {
        field: Option<String>,
        code: String,
        message: Option<String>,
        index: Option<usize>,
    },
    ChannelListing {
        field: Option<String>,
        code: String,
        message: Option<String>,
        #[serde(default)]
        channels: Vec<String>,
    },
    Metadata {
        field: Option<String>,
        code: String,
        message: Option<String>,
    },
}

impl RemoteError {
    pub fn kind(&self) -> RemoteErrorKind {
        match self {
            Self::Product { .. } => RemoteErrorKind::Product,
            Self::Attribute { .. } => RemoteErrorKind::Attribute,
            Self::Upload { .. } => RemoteErrorKind::Upload,
            Self::Stock { .. } => RemoteErrorKind::Stock,
            Self::BulkStock { .. } => RemoteErrorKind::BulkStock,
            Self::ChannelListing { .. } => RemoteErrorKind::ChannelListing,
            Self::Metadata { .. } => RemoteErrorKind::Metadata,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Product { field, .. }
            | Self::Attribute { field, .. }
            | Self::Upload { field, .. }
            | Self::Stock { field, .. }
            | Self::BulkStock { field, .. }
            | Self::ChannelListing { field, .. }
            | Self::Metadata { field, .. } => field.as_deref(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Product { code, .. }
            | Self::Attribute { code, .. }
            | Self::Upload { code, .. }
            | Self::Stock { code, .. }
            | Self::BulkStock { code, .. }
            | Self::ChannelListing { code, .. }
            | Self::Metadata { code, .. } => code,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Product { message, .. }
            | Self::Attribute { message, .. }
            | Self::Upload { message, .. }
            | Self::Stock { message, .. }
            | Self::BulkStock { message, .. }
            | Self::ChannelListing { message, .. }
            | Self::Metadata { message, .. } => message.as_deref(),
        }
    }

    /// Shorthand for an error with only a kind, field and code
    pub fn new(kind: RemoteErrorKind, field: Option<&str>, code: &str) -> Self {
        RawMutationError {
            field: field.map(str::to_string),
            code: code.to_string(),
            ..Default::default()
        }
        .into_remote(kind)
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind(), self.code())?;
        if let Some(field) = self.field() {
            write!(f, " on '{field}'")?;
        }
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Errors from every step of one submit, in step order; empty means success
pub type SubmitOutcome = Vec<RemoteError>;

/// Error object as it appears in a mutation payload, before normalization
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMutationError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub attributes: Option<Vec<String>>,
    #[serde(default)]
    pub channels: Option<Vec<String>>,
    #[serde(default)]
    pub index: Option<usize>,
}

impl RawMutationError {
    pub fn into_remote(self, kind: RemoteErrorKind) -> RemoteError {
        let Self {
            field,
            code,
            message,
            attributes,
            channels,
            index,
        } = self;
        match kind {
            RemoteErrorKind::Product => RemoteError::Product {
                field,
                code,
                message,
                attributes: attributes.unwrap_or_default(),
            },
            RemoteErrorKind::Attribute => RemoteError::Attribute {
                field,
                code,
                message,
            },
            RemoteErrorKind::Upload => RemoteError::Upload {
                field,
                code,
                message,
            },
            RemoteErrorKind::Stock => RemoteError::Stock {
                field,
                code,
                message,
            },
            RemoteErrorKind::BulkStock => RemoteError::BulkStock {
                field,
                code,
                message,
                index,
            },
            RemoteErrorKind::ChannelListing => RemoteError::ChannelListing {
                field,
                code,
                message,
                channels: channels.unwrap_or_default(),
            },
            RemoteErrorKind::Metadata => RemoteError::Metadata {
                field,
                code,
                message,
            },
        }
    }
}

/// Normalize a payload's error list into one kind
pub fn normalize_errors(raw: Vec<RawMutationError>, kind: RemoteErrorKind) -> Vec<RemoteError> {
    raw.into_iter().map(|error| error.into_remote(kind)).collect()
}
