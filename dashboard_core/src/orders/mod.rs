//! Order management

pub mod transaction;

pub use transaction::{
    TransactionAction, TransactionActionDialog, TransactionApi, TransactionRequestError,
};
