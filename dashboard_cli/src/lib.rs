//! Merchant dashboard command line interface
//!
//! The binary in `main.rs` parses arguments; everything it drives lives here
//! so it can be exercised from integration tests.

pub mod config;
pub mod error;
pub mod notifications;
pub mod orchestrators;
pub mod output;
pub mod terminal;
