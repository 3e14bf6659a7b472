//! GraphQL implementation of the remote operation traits

use super::client::{GraphQlClient, take_field};
use super::documents;
use crate::orders::{TransactionAction, TransactionApi, TransactionRequestError};
use crate::product::api::{
    AttributeValueDeleteVariables, FileUploadPayload, FileUploadVariables, MetadataMutations,
    MetadataUpdateVariables, MutationPayload, ProductChannelListingUpdateVariables,
    ProductMutations, ProductQueries, ProductUpdateVariables, VariantStocksUpdateVariables,
    VariantUpdateVariables,
};
use crate::product::errors::{RawMutationError, RemoteErrorKind, normalize_errors};
use crate::product::types::{
    AttributeRef, AttributeValue, MetadataItem, Product, ProductAttribute, ProductChannelListing,
    ProductVariant, Stock, UploadedFile,
};
use crate::taxes::{
    Country, TaxApi, TaxClass, TaxClassRateInput, TaxConfigurationError, TaxCountryConfiguration,
};
use crate::{ClientConfig, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Default, Deserialize)]
struct ErrorsPayload {
    #[serde(default)]
    errors: Vec<RawMutationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileUploadResponse {
    #[serde(default)]
    uploaded_file: Option<UploadedFile>,
    #[serde(default)]
    errors: Vec<RawMutationError>,
}

#[derive(Debug, Deserialize)]
struct IdNode {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StockNode {
    warehouse: IdNode,
    quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VariantNode {
    id: String,
    name: String,
    #[serde(default)]
    sku: Option<String>,
    #[serde(default)]
    track_inventory: Option<bool>,
    #[serde(default)]
    stocks: Vec<StockNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelListingNode {
    channel: IdNode,
    is_published: bool,
    #[serde(default)]
    publication_date: Option<NaiveDate>,
    is_available_for_purchase: Option<bool>,
    #[serde(default)]
    available_for_purchase: Option<NaiveDate>,
    visible_in_listings: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductNode {
    id: String,
    name: String,
    slug: String,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    seo_title: Option<String>,
    #[serde(default)]
    seo_description: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    charge_taxes: bool,
    #[serde(default)]
    category: Option<IdNode>,
    #[serde(default)]
    collections: Vec<IdNode>,
    #[serde(default)]
    attributes: Vec<AttributeNode>,
    #[serde(default)]
    variants: Vec<VariantNode>,
    #[serde(default)]
    channel_listings: Vec<ChannelListingNode>,
    #[serde(default)]
    metadata: Vec<MetadataItem>,
    #[serde(default)]
    private_metadata: Vec<MetadataItem>,
}

#[derive(Debug, Deserialize)]
struct AttributeNode {
    attribute: AttributeRef,
    #[serde(default)]
    values: Vec<AttributeValue>,
}

/// Rich text arrives as a JSON document encoded in a string
fn parse_description(description: Option<Value>) -> Option<Value> {
    match description? {
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(serde_json::from_str(&text).unwrap_or(Value::String(text))),
        Value::Null => None,
        other => Some(other),
    }
}

impl From<ProductNode> for Product {
    fn from(node: ProductNode) -> Self {
        Self {
            id: node.id,
            name: node.name,
            slug: node.slug,
            description: parse_description(node.description),
            category_id: node.category.map(|category| category.id),
            collection_ids: node
                .collections
                .into_iter()
                .map(|collection| collection.id)
                .collect(),
            charge_taxes: node.charge_taxes,
            rating: node.rating,
            seo_title: node.seo_title,
            seo_description: node.seo_description,
            attributes: node
                .attributes
                .into_iter()
                .map(|attribute| ProductAttribute {
                    attribute: attribute.attribute,
                    values: attribute.values,
                })
                .collect(),
            variants: node
                .variants
                .into_iter()
                .map(|variant| ProductVariant {
                    id: variant.id,
                    name: variant.name,
                    sku: variant.sku,
                    track_inventory: variant.track_inventory.unwrap_or(true),
                    stocks: variant
                        .stocks
                        .into_iter()
                        .map(|stock| Stock {
                            warehouse_id: stock.warehouse.id,
                            quantity: stock.quantity,
                        })
                        .collect(),
                })
                .collect(),
            channel_listings: node
                .channel_listings
                .into_iter()
                .map(|listing| ProductChannelListing {
                    channel_id: listing.channel.id,
                    is_published: listing.is_published,
                    publication_date: listing.publication_date,
                    is_available_for_purchase: listing.is_available_for_purchase.unwrap_or(false),
                    available_for_purchase_date: listing.available_for_purchase,
                    visible_in_listings: listing.visible_in_listings,
                })
                .collect(),
            metadata: node.metadata,
            private_metadata: node.private_metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Edge<T> {
    node: T,
}

#[derive(Debug, Deserialize)]
struct Connection<T> {
    edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
struct Shop {
    #[serde(default)]
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct TaxErrorsPayload {
    #[serde(default)]
    errors: Vec<TaxConfigurationError>,
}

#[derive(Debug, Deserialize)]
struct TransactionErrorsPayload {
    #[serde(default)]
    errors: Vec<TransactionRequestError>,
}

/// Remote API of a Saleor-compatible GraphQL endpoint
#[derive(Debug, Clone)]
pub struct SaleorApi {
    client: GraphQlClient,
}

impl SaleorApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: GraphQlClient::new(config)?,
        })
    }

    pub fn with_client(client: GraphQlClient) -> Self {
        Self { client }
    }

    async fn errors_mutation<V: serde::Serialize + Sync>(
        &self,
        document: &str,
        variables: &V,
        field: &str,
        kind: RemoteErrorKind,
    ) -> Result<MutationPayload> {
        let payload: ErrorsPayload = self.client.execute_field(document, variables, field).await?;
        Ok(MutationPayload::with_errors(normalize_errors(
            payload.errors,
            kind,
        )))
    }

    /// Write `input` and delete `keys_to_delete` in one request
    async fn metadata_mutation(
        &self,
        document: &str,
        variables: &MetadataUpdateVariables,
        update_field: &str,
        delete_field: &str,
    ) -> Result<MutationPayload> {
        let data = self.client.execute(document, variables).await?;
        let updated: ErrorsPayload = take_field(data.clone(), update_field)?;
        let deleted: ErrorsPayload = take_field(data, delete_field)?;

        let mut errors = normalize_errors(updated.errors, RemoteErrorKind::Metadata);
        errors.extend(normalize_errors(deleted.errors, RemoteErrorKind::Metadata));
        Ok(MutationPayload::with_errors(errors))
    }
}

#[async_trait]
impl MetadataMutations for SaleorApi {
    async fn update_metadata(&self, variables: MetadataUpdateVariables) -> Result<MutationPayload> {
        self.metadata_mutation(
            documents::UPDATE_METADATA,
            &variables,
            "updateMetadata",
            "deleteMetadata",
        )
        .await
    }

    async fn update_private_metadata(
        &self,
        variables: MetadataUpdateVariables,
    ) -> Result<MutationPayload> {
        self.metadata_mutation(
            documents::UPDATE_PRIVATE_METADATA,
            &variables,
            "updatePrivateMetadata",
            "deletePrivateMetadata",
        )
        .await
    }
}

#[async_trait]
impl ProductMutations for SaleorApi {
    async fn upload_file(&self, variables: FileUploadVariables) -> Result<FileUploadPayload> {
        let data = self
            .client
            .upload(documents::FILE_UPLOAD, &variables.file)
            .await?;
        let response: FileUploadResponse = take_field(data, "fileUpload")?;
        Ok(FileUploadPayload {
            uploaded_file: response.uploaded_file,
            errors: normalize_errors(response.errors, RemoteErrorKind::Upload),
        })
    }

    async fn delete_attribute_value(
        &self,
        variables: AttributeValueDeleteVariables,
    ) -> Result<MutationPayload> {
        self.errors_mutation(
            documents::ATTRIBUTE_VALUE_DELETE,
            &variables,
            "attributeValueDelete",
            RemoteErrorKind::Attribute,
        )
        .await
    }

    async fn update_product(&self, variables: ProductUpdateVariables) -> Result<MutationPayload> {
        self.errors_mutation(
            documents::PRODUCT_UPDATE,
            &variables,
            "productUpdate",
            RemoteErrorKind::Product,
        )
        .await
    }

    async fn update_variant_stocks(
        &self,
        variables: VariantStocksUpdateVariables,
    ) -> Result<MutationPayload> {
        let data = self
            .client
            .execute(documents::VARIANT_STOCKS_UPDATE, &variables)
            .await?;
        let deleted: ErrorsPayload = take_field(data.clone(), "productVariantStocksDelete")?;
        let updated: ErrorsPayload = take_field(data, "productVariantStocksUpdate")?;

        let mut errors = normalize_errors(deleted.errors, RemoteErrorKind::Stock);
        errors.extend(normalize_errors(updated.errors, RemoteErrorKind::BulkStock));
        Ok(MutationPayload::with_errors(errors))
    }

    async fn update_variant(&self, variables: VariantUpdateVariables) -> Result<MutationPayload> {
        self.errors_mutation(
            documents::VARIANT_UPDATE,
            &variables,
            "productVariantUpdate",
            RemoteErrorKind::Product,
        )
        .await
    }

    async fn update_channels(
        &self,
        variables: ProductChannelListingUpdateVariables,
    ) -> Result<MutationPayload> {
        self.errors_mutation(
            documents::PRODUCT_CHANNEL_LISTING_UPDATE,
            &variables,
            "productChannelListingUpdate",
            RemoteErrorKind::ChannelListing,
        )
        .await
    }
}

#[async_trait]
impl ProductQueries for SaleorApi {
    async fn product(&self, id: &str) -> Result<Option<Product>> {
        debug!("Fetching product {id}");
        let node: Option<ProductNode> = self
            .client
            .execute_field(documents::PRODUCT_DETAILS, &json!({ "id": id }), "product")
            .await?;
        Ok(node.map(Product::from))
    }
}

#[async_trait]
impl TaxApi for SaleorApi {
    async fn tax_country_configurations(&self) -> Result<Vec<TaxCountryConfiguration>> {
        let configurations: Option<Vec<TaxCountryConfiguration>> = self
            .client
            .execute_field(
                documents::TAX_COUNTRIES_LIST,
                &json!({}),
                "taxCountryConfigurations",
            )
            .await?;
        Ok(configurations.unwrap_or_default())
    }

    async fn tax_classes(&self, first: usize) -> Result<Vec<TaxClass>> {
        let connection: Option<Connection<TaxClass>> = self
            .client
            .execute_field(
                documents::TAX_CLASSES_LIST,
                &json!({ "first": first }),
                "taxClasses",
            )
            .await?;
        Ok(connection
            .map(|connection| connection.edges.into_iter().map(|edge| edge.node).collect())
            .unwrap_or_default())
    }

    async fn shop_countries(&self) -> Result<Vec<Country>> {
        let shop: Option<Shop> = self
            .client
            .execute_field(documents::SHOP_COUNTRIES, &json!({}), "shop")
            .await?;
        Ok(shop.map(|shop| shop.countries).unwrap_or_default())
    }

    async fn update_tax_country_configuration(
        &self,
        country_code: &str,
        rates: Vec<TaxClassRateInput>,
    ) -> Result<Vec<TaxConfigurationError>> {
        let variables = json!({
            "countryCode": country_code,
            "updateTaxClassRates": rates,
        });
        let payload: TaxErrorsPayload = self
            .client
            .execute_field(
                documents::TAX_COUNTRY_CONFIGURATION_UPDATE,
                &variables,
                "taxCountryConfigurationUpdate",
            )
            .await?;
        Ok(payload.errors)
    }
}

#[async_trait]
impl TransactionApi for SaleorApi {
    async fn request_action(
        &self,
        transaction_id: &str,
        action: TransactionAction,
        amount: Option<Decimal>,
    ) -> Result<Vec<TransactionRequestError>> {
        let variables = json!({
            "id": transaction_id,
            "action": action,
            "amount": amount,
        });
        let payload: TransactionErrorsPayload = self
            .client
            .execute_field(
                documents::TRANSACTION_REQUEST_ACTION,
                &variables,
                "transactionRequestAction",
            )
            .await?;
        Ok(payload.errors)
    }
}
