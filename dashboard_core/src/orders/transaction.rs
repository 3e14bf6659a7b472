//! Confirmation of payment transaction actions
//!
//! Capturing, refunding or cancelling a transaction is irreversible, so the
//! dashboard asks for confirmation first. [`TransactionActionDialog`] holds
//! the dialog's texts and the confirm button state around the request.

use crate::Result;
use crate::messages::{EnglishMessages, MessageCatalog};
use crate::navigation::ConfirmButtonState;
use async_trait::async_trait;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionAction {
    Charge,
    Refund,
    Void,
}

impl TransactionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "CHARGE",
            Self::Refund => "REFUND",
            Self::Void => "VOID",
        }
    }
}

impl fmt::Display for TransactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "charge" | "capture" => Ok(Self::Charge),
            "refund" => Ok(Self::Refund),
            "void" | "cancel" => Ok(Self::Void),
            other => Err(format!("unknown transaction action '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequestError {
    #[serde(default)]
    pub field: Option<String>,
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait TransactionApi: Send + Sync {
    /// Ask the payment app to run `action`; `amount: None` means the full amount
    async fn request_action(
        &self,
        transaction_id: &str,
        action: TransactionAction,
        amount: Option<Decimal>,
    ) -> Result<Vec<TransactionRequestError>>;
}

pub struct TransactionActionDialog {
    action: TransactionAction,
    messages: Arc<dyn MessageCatalog>,
    confirm_state: Mutex<ConfirmButtonState>,
}

impl TransactionActionDialog {
    pub fn new(action: TransactionAction) -> Self {
        Self::with_messages(action, Arc::new(EnglishMessages))
    }

    pub fn with_messages(action: TransactionAction, messages: Arc<dyn MessageCatalog>) -> Self {
        Self {
            action,
            messages,
            confirm_state: Mutex::new(ConfirmButtonState::Default),
        }
    }

    pub fn action(&self) -> TransactionAction {
        self.action
    }

    pub fn action_label(&self) -> String {
        self.messages.transaction_action_label(self.action)
    }

    /// Label as used inside sentences
    pub fn action_type(&self) -> String {
        self.action_label().to_lowercase()
    }

    pub fn title(&self) -> String {
        self.messages.transaction_dialog_title(&self.action_type())
    }

    pub fn warning_text(&self) -> String {
        self.messages.transaction_dialog_warning(&self.action_type())
    }

    pub fn confirm_label(&self) -> String {
        self.action_label()
    }

    pub fn cancel_label(&self) -> String {
        self.messages.cancel()
    }

    pub fn confirm_state(&self) -> ConfirmButtonState {
        *self
            .confirm_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_confirm_state(&self, state: ConfirmButtonState) {
        *self
            .confirm_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = state;
    }

    /// Request the action and move the confirm button through its states
    pub async fn submit(
        &self,
        api: &dyn TransactionApi,
        transaction_id: &str,
        amount: Option<Decimal>,
    ) -> Result<Vec<TransactionRequestError>> {
        debug!("Requesting {} on transaction {transaction_id}", self.action);
        self.set_confirm_state(ConfirmButtonState::Loading);

        let result = api.request_action(transaction_id, self.action, amount).await;
        let state = match &result {
            Ok(errors) if errors.is_empty() => ConfirmButtonState::Success,
            Ok(errors) => {
                warn!(
                    "{} on transaction {transaction_id} rejected with {} errors",
                    self.action,
                    errors.len()
                );
                ConfirmButtonState::Error
            }
            Err(_) => ConfirmButtonState::Error,
        };
        self.set_confirm_state(state);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialog_texts_for_charge() {
        let dialog = TransactionActionDialog::new(TransactionAction::Charge);

        assert_eq!(dialog.action_label(), "Capture");
        assert_eq!(dialog.action_type(), "capture");
        assert_eq!(dialog.title(), "Confirm capture");
        assert!(dialog.warning_text().contains("capture this transaction"));
        assert_eq!(dialog.confirm_label(), "Capture");
        assert_eq!(dialog.cancel_label(), "Cancel");
    }

    #[test]
    fn test_void_is_presented_as_cancel() {
        let dialog = TransactionActionDialog::new(TransactionAction::Void);
        assert_eq!(dialog.title(), "Confirm cancel");
    }

    #[test]
    fn test_action_parses_labels_and_codes() {
        assert_eq!("capture".parse(), Ok(TransactionAction::Charge));
        assert_eq!("VOID".parse(), Ok(TransactionAction::Void));
        assert_eq!("refund".parse(), Ok(TransactionAction::Refund));
        assert!("settle".parse::<TransactionAction>().is_err());
    }

    #[test]
    fn test_action_serializes_as_enum_value() {
        assert_eq!(
            serde_json::to_value(TransactionAction::Charge).unwrap(),
            "CHARGE"
        );
    }

    #[test]
    fn test_initial_confirm_state() {
        let dialog = TransactionActionDialog::new(TransactionAction::Refund);
        assert_eq!(dialog.confirm_state(), ConfirmButtonState::Default);
    }
}
