//! Test utilities for the merchant dashboard client
//!
//! This crate provides mock API implementations, recording collaborators and
//! test data builders for testing dashboard functionality.

pub mod builders;
pub mod mocks;

// Re-export commonly used types
pub use builders::{ProductBuilder, SubmitDataBuilder};
pub use mocks::{
    MockProductApi, MockTaxApi, MockTransactionApi, RecordedCall, RecordingNavigator,
    RecordingNotifier, TransactionRequest,
};
