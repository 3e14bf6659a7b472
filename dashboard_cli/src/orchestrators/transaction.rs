//! Transaction action command orchestrator

use anyhow::{Context, Result};
use dashboard_core::navigation::ConfirmButtonState;
use dashboard_core::orders::{
    TransactionAction, TransactionActionDialog, TransactionApi, TransactionRequestError,
};
use log::info;
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionReport {
    pub transaction_id: String,
    pub action: TransactionAction,
    pub amount: Option<Decimal>,
    /// False when the confirmation was declined and nothing was sent
    pub confirmed: bool,
    pub errors: Vec<TransactionRequestError>,
}

impl TransactionReport {
    pub fn is_success(&self) -> bool {
        self.confirmed && self.errors.is_empty()
    }
}

pub struct TransactionOrchestrator<A> {
    api: Arc<A>,
}

impl<A> TransactionOrchestrator<A>
where
    A: TransactionApi + 'static,
{
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Ask `confirm` with the dialog texts, then request the action
    pub async fn run<F>(
        &self,
        transaction_id: &str,
        action: TransactionAction,
        amount: Option<Decimal>,
        confirm: F,
    ) -> Result<TransactionReport>
    where
        F: FnOnce(&TransactionActionDialog) -> Result<bool>,
    {
        let dialog = TransactionActionDialog::new(action);
        let mut report = TransactionReport {
            transaction_id: transaction_id.to_string(),
            action,
            amount,
            confirmed: false,
            errors: Vec::new(),
        };

        if !confirm(&dialog)? {
            info!("{} on {transaction_id} cancelled", dialog.action_label());
            return Ok(report);
        }
        report.confirmed = true;

        report.errors = dialog
            .submit(self.api.as_ref(), transaction_id, amount)
            .await
            .with_context(|| format!("Failed to {} transaction", dialog.action_type()))?;

        if dialog.confirm_state() == ConfirmButtonState::Success {
            info!("{} of {transaction_id} requested", dialog.action_label());
        }
        Ok(report)
    }
}
