//! Mock implementation of the product API for testing

use async_trait::async_trait;
use dashboard_core::error::TransportError;
use dashboard_core::product::api::{
    AttributeValueDeleteVariables, FileUploadPayload, FileUploadVariables, MetadataMutations,
    MetadataUpdateVariables, MutationPayload, ProductChannelListingUpdateVariables,
    ProductMutations, ProductQueries, ProductUpdateVariables, VariantStocksUpdateVariables,
    VariantUpdateVariables,
};
use dashboard_core::product::{MutationStep, Product, RemoteError, UploadedFile};
use dashboard_core::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Base of the URLs the mock hands out for uploaded files
pub const UPLOAD_URL_BASE: &str = "https://cdn.example.com/uploads/";

/// One call received by [`MockProductApi`], with its variables
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    UploadFile(FileUploadVariables),
    DeleteAttributeValue(AttributeValueDeleteVariables),
    UpdateProduct(ProductUpdateVariables),
    UpdateVariantStocks(VariantStocksUpdateVariables),
    UpdateVariant(VariantUpdateVariables),
    UpdateChannels(ProductChannelListingUpdateVariables),
    UpdateMetadata(MetadataUpdateVariables),
    UpdatePrivateMetadata(MetadataUpdateVariables),
}

impl RecordedCall {
    pub fn step(&self) -> MutationStep {
        match self {
            Self::UploadFile(_) => MutationStep::UploadFile,
            Self::DeleteAttributeValue(_) => MutationStep::DeleteAttributeValue,
            Self::UpdateProduct(_) => MutationStep::UpdateProduct,
            Self::UpdateVariantStocks(_) => MutationStep::UpdateVariantStocks,
            Self::UpdateVariant(_) => MutationStep::UpdateVariant,
            Self::UpdateChannels(_) => MutationStep::UpdateChannels,
            Self::UpdateMetadata(_) => MutationStep::UpdateMetadata,
            Self::UpdatePrivateMetadata(_) => MutationStep::UpdatePrivateMetadata,
        }
    }
}

/// Configuration for mock behavior
#[derive(Debug, Default)]
struct MockBehavior {
    errors: HashMap<MutationStep, Vec<RemoteError>>,
    rejected: HashMap<MutationStep, MockRejection>,
    delay: Duration,
    products: HashMap<String, Product>,
}

#[derive(Debug, Clone, Copy)]
enum MockRejection {
    NetworkOffline,
    Timeout,
}

impl From<MockRejection> for Error {
    fn from(rejection: MockRejection) -> Self {
        match rejection {
            MockRejection::NetworkOffline => Error::Transport(TransportError::NetworkOffline),
            MockRejection::Timeout => Error::Transport(TransportError::Timeout),
        }
    }
}

#[derive(Debug, Default)]
struct Concurrency {
    current: usize,
    peak: usize,
}

/// Mock implementation of the product mutations and queries
///
/// Every call is recorded. By default each call succeeds without errors and
/// uploads answer with a URL under [`UPLOAD_URL_BASE`]. Steps can be
/// configured to answer with field errors or to reject the call outright.
///
/// # Examples
///
/// ```rust,no_run
/// use dashboard_test_utils::MockProductApi;
/// use dashboard_core::product::{MutationStep, RemoteError, RemoteErrorKind};
///
/// let api = MockProductApi::new();
/// api.expect_errors(
///     MutationStep::UpdateProduct,
///     vec![RemoteError::new(RemoteErrorKind::Product, Some("slug"), "UNIQUE")],
/// );
/// assert_eq!(api.call_count(MutationStep::UpdateProduct), 0);
/// ```
#[derive(Clone, Default)]
pub struct MockProductApi {
    behavior: Arc<Mutex<MockBehavior>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    concurrency: Arc<Mutex<Concurrency>>,
}

impl MockProductApi {
    /// Create a new mock API with default behavior
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call of `step` with these field errors
    pub fn expect_errors(&self, step: MutationStep, errors: Vec<RemoteError>) {
        self.behavior.lock().unwrap().errors.insert(step, errors);
    }

    /// Reject every call of `step` as if the network were down
    pub fn expect_network_failure(&self, step: MutationStep) {
        self.behavior
            .lock()
            .unwrap()
            .rejected
            .insert(step, MockRejection::NetworkOffline);
    }

    /// Reject every call of `step` with a timeout
    pub fn expect_timeout(&self, step: MutationStep) {
        self.behavior
            .lock()
            .unwrap()
            .rejected
            .insert(step, MockRejection::Timeout);
    }

    /// Delay every answer, so calls overlap
    pub fn with_delay(self, delay: Duration) -> Self {
        self.behavior.lock().unwrap().delay = delay;
        self
    }

    /// Serve `product` from [`ProductQueries::product`]
    pub fn with_product(self, product: Product) -> Self {
        self.behavior
            .lock()
            .unwrap()
            .products
            .insert(product.id.clone(), product);
        self
    }

    /// All recorded calls in the order they were issued
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, step: MutationStep) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.step() == step)
            .collect()
    }

    pub fn call_count(&self, step: MutationStep) -> usize {
        self.calls_for(step).len()
    }

    /// Steps in the order of their first call
    pub fn step_sequence(&self) -> Vec<MutationStep> {
        let mut sequence = Vec::new();
        for call in self.calls() {
            if !sequence.contains(&call.step()) {
                sequence.push(call.step());
            }
        }
        sequence
    }

    /// Highest number of calls that were in flight at once
    pub fn peak_concurrency(&self) -> usize {
        self.concurrency.lock().unwrap().peak
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
        *self.concurrency.lock().unwrap() = Concurrency::default();
    }

    /// Record the call, wait out the delay and produce the configured answer
    async fn answer(&self, call: RecordedCall) -> Result<Vec<RemoteError>> {
        let step = call.step();
        self.calls.lock().unwrap().push(call);

        {
            let mut concurrency = self.concurrency.lock().unwrap();
            concurrency.current += 1;
            concurrency.peak = concurrency.peak.max(concurrency.current);
        }

        let (delay, rejection, errors) = {
            let behavior = self.behavior.lock().unwrap();
            (
                behavior.delay,
                behavior.rejected.get(&step).copied(),
                behavior.errors.get(&step).cloned().unwrap_or_default(),
            )
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        } else {
            tokio::task::yield_now().await;
        }

        self.concurrency.lock().unwrap().current -= 1;

        match rejection {
            Some(rejection) => Err(rejection.into()),
            None => Ok(errors),
        }
    }
}

#[async_trait]
impl MetadataMutations for MockProductApi {
    async fn update_metadata(&self, variables: MetadataUpdateVariables) -> Result<MutationPayload> {
        let errors = self.answer(RecordedCall::UpdateMetadata(variables)).await?;
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_private_metadata(
        &self,
        variables: MetadataUpdateVariables,
    ) -> Result<MutationPayload> {
        let errors = self
            .answer(RecordedCall::UpdatePrivateMetadata(variables))
            .await?;
        Ok(MutationPayload::with_errors(errors))
    }
}

#[async_trait]
impl ProductMutations for MockProductApi {
    async fn upload_file(&self, variables: FileUploadVariables) -> Result<FileUploadPayload> {
        let file_name = variables.file.file_name.clone();
        let content_type = variables.file.content_type.clone();
        let errors = self.answer(RecordedCall::UploadFile(variables)).await?;

        let uploaded_file = errors.is_empty().then(|| UploadedFile {
            url: format!("{UPLOAD_URL_BASE}{file_name}"),
            content_type,
        });
        Ok(FileUploadPayload {
            uploaded_file,
            errors,
        })
    }

    async fn delete_attribute_value(
        &self,
        variables: AttributeValueDeleteVariables,
    ) -> Result<MutationPayload> {
        let errors = self
            .answer(RecordedCall::DeleteAttributeValue(variables))
            .await?;
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_product(&self, variables: ProductUpdateVariables) -> Result<MutationPayload> {
        let errors = self.answer(RecordedCall::UpdateProduct(variables)).await?;
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_variant_stocks(
        &self,
        variables: VariantStocksUpdateVariables,
    ) -> Result<MutationPayload> {
        let errors = self
            .answer(RecordedCall::UpdateVariantStocks(variables))
            .await?;
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_variant(&self, variables: VariantUpdateVariables) -> Result<MutationPayload> {
        let errors = self.answer(RecordedCall::UpdateVariant(variables)).await?;
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_channels(
        &self,
        variables: ProductChannelListingUpdateVariables,
    ) -> Result<MutationPayload> {
        let errors = self.answer(RecordedCall::UpdateChannels(variables)).await?;
        Ok(MutationPayload::with_errors(errors))
    }
}

#[async_trait]
impl ProductQueries for MockProductApi {
    async fn product(&self, id: &str) -> Result<Option<Product>> {
        Ok(self.behavior.lock().unwrap().products.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::product::{PendingFile, RemoteErrorKind};

    #[tokio::test]
    async fn test_upload_answers_with_url() {
        let api = MockProductApi::new();

        let payload = api
            .upload_file(FileUploadVariables {
                file: PendingFile::new("manual.pdf", vec![1, 2]),
            })
            .await
            .unwrap();

        assert_eq!(
            payload.uploaded_file.unwrap().url,
            "https://cdn.example.com/uploads/manual.pdf"
        );
        assert_eq!(api.call_count(MutationStep::UploadFile), 1);
    }

    #[tokio::test]
    async fn test_configured_errors_are_returned() {
        let api = MockProductApi::new();
        api.expect_errors(
            MutationStep::DeleteAttributeValue,
            vec![RemoteError::new(RemoteErrorKind::Attribute, None, "NOT_FOUND")],
        );

        let payload = api
            .delete_attribute_value(AttributeValueDeleteVariables {
                id: "value".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(payload.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_rejects() {
        let api = MockProductApi::new();
        api.expect_network_failure(MutationStep::UpdateVariant);

        let result = api
            .update_variant(VariantUpdateVariables {
                id: "v1".to_string(),
                input: Default::default(),
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::Transport(TransportError::NetworkOffline))
        ));
        assert_eq!(api.call_count(MutationStep::UpdateVariant), 1);
    }
}
