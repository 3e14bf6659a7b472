//! Mock implementation of the transaction API for testing

use async_trait::async_trait;
use dashboard_core::error::TransportError;
use dashboard_core::orders::{TransactionAction, TransactionApi, TransactionRequestError};
use dashboard_core::{Error, Result};
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

/// A request received by [`MockTransactionApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub transaction_id: String,
    pub action: TransactionAction,
    pub amount: Option<Decimal>,
}

#[derive(Debug, Default)]
struct MockTransactionState {
    errors: Vec<TransactionRequestError>,
    offline: bool,
    requests: Vec<TransactionRequest>,
}

#[derive(Clone, Default)]
pub struct MockTransactionApi {
    state: Arc<Mutex<MockTransactionState>>,
}

impl MockTransactionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_errors(&self, errors: Vec<TransactionRequestError>) {
        self.state.lock().unwrap().errors = errors;
    }

    pub fn expect_network_failure(&self) {
        self.state.lock().unwrap().offline = true;
    }

    pub fn requests(&self) -> Vec<TransactionRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl TransactionApi for MockTransactionApi {
    async fn request_action(
        &self,
        transaction_id: &str,
        action: TransactionAction,
        amount: Option<Decimal>,
    ) -> Result<Vec<TransactionRequestError>> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(TransactionRequest {
            transaction_id: transaction_id.to_string(),
            action,
            amount,
        });
        if state.offline {
            return Err(Error::Transport(TransportError::NetworkOffline));
        }
        Ok(state.errors.clone())
    }
}
