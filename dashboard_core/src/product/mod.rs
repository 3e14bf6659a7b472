//! Product editing
//!
//! Server-side product state, the form data a save submits, and the handler
//! that turns one save into the required sequence of remote mutations.

pub mod api;
pub mod errors;
pub mod handler;
pub mod metadata;
pub mod status;
pub mod types;
pub mod variables;

pub use api::{
    FileUploadPayload, FileUploadVariables, MetadataMutations, MutationPayload, ProductMutations,
    ProductQueries,
};
pub use errors::{RawMutationError, RemoteError, RemoteErrorKind, SubmitOutcome};
pub use handler::ProductUpdateHandler;
pub use metadata::{MetadataChange, MetadataUpdateHandler};
pub use status::{MutationStep, OperationStatus, StatusBoard, StepStatus, SubmitPhase};
pub use types::{
    AttributeChange, AttributeInputType, AttributeRef, AttributeValue, FileAttributeChange,
    MetadataItem, PendingFile, Product, ProductAttribute, ProductChannelListing,
    ProductUpdateSubmitData, ProductVariant, Stock, StockChange, UploadedFile, VariantChange,
};
