//! Mock implementations for testing

mod navigator;
mod notifier;
mod product_api;
mod tax_api;
mod transaction_api;

pub use navigator::RecordingNavigator;
pub use notifier::RecordingNotifier;
pub use product_api::{MockProductApi, RecordedCall, UPLOAD_URL_BASE};
pub use tax_api::MockTaxApi;
pub use transaction_api::{MockTransactionApi, TransactionRequest};
