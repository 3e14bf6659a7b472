//! Remote operations consumed by the product update handler
//!
//! The traits here are the only boundary between the orchestration logic and
//! the transport. Every method answers `Ok(payload)` when the server replied,
//! with field errors already normalized into [`RemoteError`]s, and `Err` when
//! the call itself was rejected.

use super::errors::RemoteError;
use super::types::{MetadataItem, PendingFile, Product, ProductChannelListing, UploadedFile};
use crate::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Variables for uploading one attribute file
///
/// Not serialized as JSON: the file travels as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadVariables {
    pub file: PendingFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeValueDeleteVariables {
    pub id: String,
}

/// One attribute assignment inside a product update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValueInput {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeoInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub attributes: Vec<AttributeValueInput>,
    pub name: String,
    pub slug: String,
    #[serde(serialize_with = "serialize_json_string")]
    pub description: Option<serde_json::Value>,
    pub category: Option<String>,
    pub collections: Vec<String>,
    pub charge_taxes: bool,
    pub rating: Option<f64>,
    pub seo: SeoInput,
}

/// Rich text travels as a JSON document encoded in a string
fn serialize_json_string<S: Serializer>(
    value: &Option<serde_json::Value>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(document) => serializer.serialize_some(&document.to_string()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductUpdateVariables {
    pub id: String,
    pub input: ProductInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockInput {
    pub warehouse: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantStocksUpdateVariables {
    pub id: String,
    pub stocks: Vec<StockInput>,
    pub remove_stocks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantFieldsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_inventory: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantUpdateVariables {
    pub id: String,
    pub input: VariantFieldsInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelListingAddInput {
    pub channel_id: String,
    pub is_published: bool,
    pub publication_date: Option<NaiveDate>,
    pub is_available_for_purchase: bool,
    pub available_for_purchase_date: Option<NaiveDate>,
    pub visible_in_listings: bool,
}

impl From<&ProductChannelListing> for ChannelListingAddInput {
    fn from(listing: &ProductChannelListing) -> Self {
        Self {
            channel_id: listing.channel_id.clone(),
            is_published: listing.is_published,
            publication_date: listing.publication_date,
            is_available_for_purchase: listing.is_available_for_purchase,
            available_for_purchase_date: listing.available_for_purchase_date,
            visible_in_listings: listing.visible_in_listings,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChannelListingUpdateInput {
    pub update_channels: Vec<ChannelListingAddInput>,
    pub remove_channels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductChannelListingUpdateVariables {
    pub id: String,
    pub input: ProductChannelListingUpdateInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataUpdateVariables {
    pub id: String,
    pub input: Vec<MetadataItem>,
    pub keys_to_delete: Vec<String>,
}

/// Result of an upload: the stored file when it succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUploadPayload {
    pub uploaded_file: Option<UploadedFile>,
    pub errors: Vec<RemoteError>,
}

/// Result of any mutation that only reports errors back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationPayload {
    pub errors: Vec<RemoteError>,
}

impl MutationPayload {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn with_errors(errors: Vec<RemoteError>) -> Self {
        Self { errors }
    }
}

/// Public and private metadata writes
#[async_trait]
pub trait MetadataMutations: Send + Sync {
    async fn update_metadata(&self, variables: MetadataUpdateVariables) -> Result<MutationPayload>;

    async fn update_private_metadata(
        &self,
        variables: MetadataUpdateVariables,
    ) -> Result<MutationPayload>;
}

/// Every write issued by one product submit
#[async_trait]
pub trait ProductMutations: MetadataMutations {
    async fn upload_file(&self, variables: FileUploadVariables) -> Result<FileUploadPayload>;

    async fn delete_attribute_value(
        &self,
        variables: AttributeValueDeleteVariables,
    ) -> Result<MutationPayload>;

    async fn update_product(&self, variables: ProductUpdateVariables) -> Result<MutationPayload>;

    async fn update_variant_stocks(
        &self,
        variables: VariantStocksUpdateVariables,
    ) -> Result<MutationPayload>;

    async fn update_variant(&self, variables: VariantUpdateVariables) -> Result<MutationPayload>;

    async fn update_channels(
        &self,
        variables: ProductChannelListingUpdateVariables,
    ) -> Result<MutationPayload>;
}

/// Reads needed to build a handler
#[async_trait]
pub trait ProductQueries: Send + Sync {
    /// Server-known state of a product, `None` if it does not exist
    async fn product(&self, id: &str) -> Result<Option<Product>>;
}
