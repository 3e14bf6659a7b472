//! GraphQL transport and the remote API built on it

pub mod api;
pub mod client;
pub mod documents;

pub use api::SaleorApi;
pub use client::GraphQlClient;
