//! Product update orchestration
//!
//! One [`ProductUpdateHandler::submit`] runs, in order:
//!
//! 1. file uploads for attribute values (batched)
//! 2. deletion of file values superseded by step 1 (batched)
//! 3. the product update itself, embedding uploaded file URLs
//! 4. variant stock updates and variant field updates (two batched families)
//! 5. the channel listing update, concurrently with step 4
//! 6. metadata and private metadata, wrapping steps 1-5
//!
//! Field errors are collected as data and never stop later steps. A rejected
//! call ends the submit with `Err` once its batch has settled.

use super::api::ProductMutations;
use super::errors::{RemoteError, SubmitOutcome};
use super::metadata::{MetadataChange, MetadataUpdateHandler};
use super::status::{MutationStep, OperationStatus, StatusBoard, StepStatus, SubmitPhase};
use super::types::{Product, ProductUpdateSubmitData};
use super::variables::{self, UploadedFiles};
use crate::messages::{EnglishMessages, MessageCatalog};
use crate::notify::{Notification, Notifier};
use crate::{Error, Result};
use futures::future::join_all;
use log::{debug, error};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct LastErrors {
    product: Vec<RemoteError>,
    channels: Vec<RemoteError>,
}

/// Submits edits of one product
pub struct ProductUpdateHandler {
    product: Product,
    api: Arc<dyn ProductMutations>,
    notifier: Arc<dyn Notifier>,
    messages: Arc<dyn MessageCatalog>,
    status: StatusBoard,
    last: Mutex<LastErrors>,
}

impl ProductUpdateHandler {
    /// Create a handler for `product` as last fetched from the server
    pub fn new(product: Product, api: Arc<dyn ProductMutations>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            product,
            api,
            notifier,
            messages: Arc::new(EnglishMessages),
            status: StatusBoard::new(),
            last: Mutex::new(LastErrors::default()),
        }
    }

    /// Use a different catalog for notification texts
    pub fn with_messages(mut self, messages: Arc<dyn MessageCatalog>) -> Self {
        self.messages = messages;
        self
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Run every step of a save and return all field errors in step order
    ///
    /// An empty result emits one success notification.
    pub async fn submit(&self, data: &ProductUpdateSubmitData) -> Result<SubmitOutcome> {
        debug!("Submitting update of product {}", self.product.id);

        let metadata = MetadataUpdateHandler::new(self.api.as_ref(), &self.status);
        let result = metadata
            .run(
                &self.product.id,
                MetadataChange::new(&self.product.metadata, &data.metadata),
                MetadataChange::new(&self.product.private_metadata, &data.private_metadata),
                self.send_mutations(data),
            )
            .await;
        self.status.set_phase(SubmitPhase::Settled);

        let errors = result.inspect_err(|err| {
            error!("Update of product {} was rejected: {err}", self.product.id);
        })?;

        if errors.is_empty() {
            self.notifier
                .notify(Notification::success(self.messages.saved_changes()));
        } else {
            debug!(
                "Update of product {} finished with {} errors",
                self.product.id,
                errors.len()
            );
        }
        Ok(errors)
    }

    async fn send_mutations(&self, data: &ProductUpdateSubmitData) -> Result<SubmitOutcome> {
        let mut errors = Vec::new();

        self.status.set_phase(SubmitPhase::Uploading);
        let uploaded = self.upload_files(data, &mut errors).await?;

        self.status.set_phase(SubmitPhase::Deleting);
        let deletes = variables::superseded_value_deletes(&self.product, data, &uploaded);
        debug!("Deleting {} superseded attribute values", deletes.len());
        let deleted = join_all(deletes.into_iter().map(|variables| {
            self.status.tracked(
                MutationStep::DeleteAttributeValue,
                self.api.delete_attribute_value(variables),
            )
        }))
        .await;
        for payload in deleted.into_iter().collect::<Result<Vec<_>>>()? {
            errors.extend(payload.errors);
        }

        self.status.set_phase(SubmitPhase::UpdatingProduct);
        let product_variables = variables::product_update_variables(&self.product, data, &uploaded);
        let payload = self
            .status
            .tracked(
                MutationStep::UpdateProduct,
                self.api.update_product(product_variables),
            )
            .await?;
        self.last_errors().product = payload.errors.clone();
        errors.extend(payload.errors);

        self.status.set_phase(SubmitPhase::UpdatingVariantsAndChannels);
        let stock_updates = variables::variant_stocks_variables(&self.product, data);
        let field_updates = variables::variant_fields_variables(&self.product, data);
        debug!(
            "Updating {} variant stocks and {} variants",
            stock_updates.len(),
            field_updates.len()
        );
        let stocks = join_all(stock_updates.into_iter().map(|variables| {
            self.status.tracked(
                MutationStep::UpdateVariantStocks,
                self.api.update_variant_stocks(variables),
            )
        }));
        let fields = join_all(field_updates.into_iter().map(|variables| {
            self.status
                .tracked(MutationStep::UpdateVariant, self.api.update_variant(variables))
        }));
        let channels = self.update_channels(data);
        let (stocks, fields, channels) = futures::join!(stocks, fields, channels);

        for payload in stocks.into_iter().collect::<Result<Vec<_>>>()? {
            errors.extend(payload.errors);
        }
        for payload in fields.into_iter().collect::<Result<Vec<_>>>()? {
            errors.extend(payload.errors);
        }
        errors.extend(channels?);

        Ok(errors)
    }

    async fn upload_files(
        &self,
        data: &ProductUpdateSubmitData,
        errors: &mut Vec<RemoteError>,
    ) -> Result<UploadedFiles> {
        let uploads = variables::upload_batch(data);
        debug!("Uploading {} attribute files", uploads.len());

        let results = join_all(uploads.into_iter().map(|(attribute_id, variables)| async move {
            let payload = self
                .status
                .tracked(MutationStep::UploadFile, self.api.upload_file(variables))
                .await?;
            Ok::<_, Error>((attribute_id, payload))
        }))
        .await;

        let mut uploaded = UploadedFiles::new();
        for (attribute_id, payload) in results.into_iter().collect::<Result<Vec<_>>>()? {
            if payload.errors.is_empty()
                && let Some(file) = payload.uploaded_file
            {
                uploaded.insert(attribute_id, file);
            }
            errors.extend(payload.errors);
        }
        Ok(uploaded)
    }

    async fn update_channels(&self, data: &ProductUpdateSubmitData) -> Result<Vec<RemoteError>> {
        let channel_variables = variables::channels_variables(&self.product, data);
        let payload = self
            .status
            .tracked(
                MutationStep::UpdateChannels,
                self.api.update_channels(channel_variables),
            )
            .await
            .inspect_err(|err| {
                error!(
                    "Channel listing update of product {} was rejected: {err}",
                    self.product.id
                );
            })?;

        for channel_error in &payload.errors {
            self.notifier.notify(Notification::error(
                self.messages.product_error_message(channel_error),
            ));
        }
        self.last_errors().channels = payload.errors.clone();
        Ok(payload.errors)
    }

    fn last_errors(&self) -> MutexGuard<'_, LastErrors> {
        self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn phase(&self) -> SubmitPhase {
        self.status.phase()
    }

    /// Aggregate `called`/`loading` across every step
    pub fn status(&self) -> OperationStatus {
        self.status.aggregate()
    }

    pub fn step_status(&self, step: MutationStep) -> StepStatus {
        self.status.step(step)
    }

    /// Errors of the most recent product update call
    pub fn product_errors(&self) -> Vec<RemoteError> {
        self.last_errors().product.clone()
    }

    /// Errors of the most recent channel listing update call
    pub fn channels_errors(&self) -> Vec<RemoteError> {
        self.last_errors().channels.clone()
    }
}
