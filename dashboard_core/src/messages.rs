//! User-facing texts
//!
//! Everything shown to a user goes through a [`MessageCatalog`] so a caller
//! can substitute translations. [`EnglishMessages`] is the built-in catalog.

use crate::orders::TransactionAction;
use crate::product::RemoteError;

pub trait MessageCatalog: Send + Sync {
    fn saved_changes(&self) -> String;

    fn something_went_wrong(&self) -> String;

    /// Text for an error code, `None` when the catalog does not know it
    fn error_code_message(&self, code: &str) -> Option<String>;

    /// Text for a remote error: known code, then server message, then generic
    fn product_error_message(&self, error: &RemoteError) -> String {
        self.error_code_message(error.code())
            .or_else(|| error.message().map(str::to_string))
            .unwrap_or_else(|| self.something_went_wrong())
    }

    fn transaction_action_label(&self, action: TransactionAction) -> String;

    fn transaction_dialog_title(&self, action_type: &str) -> String;

    fn transaction_dialog_warning(&self, action_type: &str) -> String;

    fn cancel(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishMessages;

impl MessageCatalog for EnglishMessages {
    fn saved_changes(&self) -> String {
        "Saved changes".to_string()
    }

    fn something_went_wrong(&self) -> String {
        "Something went wrong".to_string()
    }

    fn error_code_message(&self, code: &str) -> Option<String> {
        let text = match code {
            "ALREADY_EXISTS" => "A product with this SKU already exists",
            "ATTRIBUTE_ALREADY_ASSIGNED" => {
                "This attribute has already been assigned to this product type"
            }
            "ATTRIBUTE_CANNOT_BE_ASSIGNED" => "This attribute cannot be assigned to this product type",
            "ATTRIBUTE_VARIANTS_DISABLED" => "Variants are disabled in this product type",
            "DUPLICATED_INPUT_ITEM" => "Select each channel only once",
            "GRAPHQL_ERROR" => "An unexpected error occurred",
            "INVALID" => "Invalid value",
            "NOT_FOUND" => "Object not found",
            "NOT_PRODUCTS_IMAGE" => "This is not a product image",
            "NOT_PRODUCTS_VARIANT" => "This variant does not belong to this product",
            "PRODUCT_NOT_ASSIGNED_TO_CHANNEL" => "Product is not available in the selected channel",
            "PRODUCT_WITHOUT_CATEGORY" => "Product must have a category set",
            "REQUIRED" => "This field is required",
            "UNIQUE" => "This field has to be unique",
            "VARIANT_NO_DIGITAL_CONTENT" => "This variant does not have any digital content",
            _ => return None,
        };
        Some(text.to_string())
    }

    fn transaction_action_label(&self, action: TransactionAction) -> String {
        match action {
            TransactionAction::Charge => "Capture",
            TransactionAction::Refund => "Refund",
            TransactionAction::Void => "Cancel",
        }
        .to_string()
    }

    fn transaction_dialog_title(&self, action_type: &str) -> String {
        format!("Confirm {action_type}")
    }

    fn transaction_dialog_warning(&self, action_type: &str) -> String {
        format!("Are you sure you want to {action_type} this transaction?")
    }

    fn cancel(&self) -> String {
        "Cancel".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{RawMutationError, RemoteErrorKind};

    fn error(code: &str, message: Option<&str>) -> RemoteError {
        RawMutationError {
            code: code.to_string(),
            message: message.map(str::to_string),
            ..Default::default()
        }
        .into_remote(RemoteErrorKind::ChannelListing)
    }

    #[test]
    fn test_known_code_wins_over_server_message() {
        let text = EnglishMessages.product_error_message(&error("REQUIRED", Some("required!")));
        assert_eq!(text, "This field is required");
    }

    #[test]
    fn test_unknown_code_uses_server_message() {
        let text = EnglishMessages.product_error_message(&error("WEIRD", Some("Server says no")));
        assert_eq!(text, "Server says no");
    }

    #[test]
    fn test_falls_back_to_generic_text() {
        let text = EnglishMessages.product_error_message(&error("WEIRD", None));
        assert_eq!(text, "Something went wrong");
    }

    #[test]
    fn test_transaction_labels() {
        assert_eq!(
            EnglishMessages.transaction_action_label(TransactionAction::Charge),
            "Capture"
        );
        assert_eq!(
            EnglishMessages.transaction_action_label(TransactionAction::Void),
            "Cancel"
        );
        assert_eq!(
            EnglishMessages.transaction_dialog_title("refund"),
            "Confirm refund"
        );
    }
}
