//! Product domain types
//!
//! [`Product`] is the server-known state of a product as last fetched;
//! [`ProductUpdateSubmitData`] is what the user wants it to become. The
//! update handler diffs the two to decide which remote calls to issue.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single public or private metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// How an attribute's values are entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeInputType {
    Dropdown,
    Multiselect,
    File,
    Reference,
    PlainText,
    RichText,
    Numeric,
    Boolean,
    Date,
    DateTime,
    Swatch,
}

/// Attribute definition as referenced from a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRef {
    pub id: String,
    #[serde(default)]
    pub slug: Option<String>,
    pub input_type: AttributeInputType,
}

/// A file already stored by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValue {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub file: Option<UploadedFile>,
}

/// An attribute assigned to a product together with its current values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub attribute: AttributeRef,
    #[serde(default)]
    pub values: Vec<AttributeValue>,
}

impl ProductAttribute {
    pub fn is_file(&self) -> bool {
        self.attribute.input_type == AttributeInputType::File
    }

    /// Value identifiers as sent back in an update (slug, falling back to name)
    pub fn value_keys(&self) -> Vec<String> {
        self.values
            .iter()
            .filter_map(|value| value.slug.clone().or_else(|| value.name.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub warehouse_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default = "default_track_inventory")]
    pub track_inventory: bool,
    #[serde(default)]
    pub stocks: Vec<Stock>,
}

fn default_track_inventory() -> bool {
    true
}

impl ProductVariant {
    pub fn stock_quantity(&self, warehouse_id: &str) -> Option<i64> {
        self.stocks
            .iter()
            .find(|stock| stock.warehouse_id == warehouse_id)
            .map(|stock| stock.quantity)
    }
}

/// Publication and availability of a product in one sales channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChannelListing {
    pub channel_id: String,
    pub is_published: bool,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    pub is_available_for_purchase: bool,
    #[serde(default)]
    pub available_for_purchase_date: Option<NaiveDate>,
    pub visible_in_listings: bool,
}

/// Server-known state of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub collection_ids: Vec<String>,
    #[serde(default)]
    pub charge_taxes: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub channel_listings: Vec<ProductChannelListing>,
    #[serde(default)]
    pub metadata: Vec<MetadataItem>,
    #[serde(default)]
    pub private_metadata: Vec<MetadataItem>,
}

impl Product {
    pub fn variant(&self, id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    pub fn attribute(&self, id: &str) -> Option<&ProductAttribute> {
        self.attributes
            .iter()
            .find(|attribute| attribute.attribute.id == id)
    }
}

/// A file selected locally and not yet uploaded
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl PendingFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            content,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl std::fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.content.len())
            .finish()
    }
}

/// New values for a non-file attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub attribute_id: String,
    pub values: Vec<String>,
}

/// A file attribute whose file is being replaced or removed
///
/// `file: None` removes the current file without uploading a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttributeChange {
    pub attribute_id: String,
    pub file: Option<PendingFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    pub warehouse_id: String,
    pub quantity: i64,
}

/// Edits to one variant; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantChange {
    pub variant_id: String,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub track_inventory: Option<bool>,
    pub stocks: Vec<StockChange>,
    pub removed_warehouse_ids: Vec<String>,
}

impl VariantChange {
    pub fn new(variant_id: impl Into<String>) -> Self {
        Self {
            variant_id: variant_id.into(),
            ..Default::default()
        }
    }
}

/// Everything a single "save" of the product form submits
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdateSubmitData {
    pub name: String,
    pub slug: String,
    pub description: Option<serde_json::Value>,
    pub category_id: Option<String>,
    pub collection_ids: Vec<String>,
    pub charge_taxes: bool,
    pub rating: Option<f64>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub attributes: Vec<AttributeChange>,
    pub attributes_with_new_file_value: Vec<FileAttributeChange>,
    pub variants: Vec<VariantChange>,
    pub channel_listings: Vec<ProductChannelListing>,
    pub metadata: Vec<MetadataItem>,
    pub private_metadata: Vec<MetadataItem>,
}

impl ProductUpdateSubmitData {
    /// Form data that submits the product unchanged
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            category_id: product.category_id.clone(),
            collection_ids: product.collection_ids.clone(),
            charge_taxes: product.charge_taxes,
            rating: product.rating,
            seo_title: product.seo_title.clone(),
            seo_description: product.seo_description.clone(),
            attributes: Vec::new(),
            attributes_with_new_file_value: Vec::new(),
            variants: Vec::new(),
            channel_listings: product.channel_listings.clone(),
            metadata: product.metadata.clone(),
            private_metadata: product.private_metadata.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_attribute(values: Vec<AttributeValue>) -> ProductAttribute {
        ProductAttribute {
            attribute: AttributeRef {
                id: "attr-manual".to_string(),
                slug: Some("manual".to_string()),
                input_type: AttributeInputType::File,
            },
            values,
        }
    }

    #[test]
    fn test_product_deserializes_from_camel_case() {
        let json = r#"{
            "id": "UHJvZHVjdDox",
            "name": "Juice",
            "slug": "juice",
            "chargeTaxes": true,
            "variants": [{"id": "v1", "name": "1l", "stocks": [{"warehouseId": "w1", "quantity": 4}]}],
            "channelListings": [{
                "channelId": "c1",
                "isPublished": true,
                "publicationDate": "2024-03-01",
                "isAvailableForPurchase": false,
                "visibleInListings": true
            }]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.slug, "juice");
        assert!(product.charge_taxes);
        assert_eq!(product.variant("v1").unwrap().stock_quantity("w1"), Some(4));
        assert!(product.variant("v1").unwrap().track_inventory);
        assert_eq!(
            product.channel_listings[0].publication_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_value_keys_prefer_slug() {
        let attribute = ProductAttribute {
            attribute: AttributeRef {
                id: "a1".to_string(),
                slug: None,
                input_type: AttributeInputType::Dropdown,
            },
            values: vec![
                AttributeValue {
                    id: "v1".to_string(),
                    name: Some("Red".to_string()),
                    slug: Some("red".to_string()),
                    file: None,
                },
                AttributeValue {
                    id: "v2".to_string(),
                    name: Some("Blue".to_string()),
                    slug: None,
                    file: None,
                },
            ],
        };

        assert_eq!(attribute.value_keys(), vec!["red", "Blue"]);
        assert!(!attribute.is_file());
    }

    #[test]
    fn test_file_attribute_detection() {
        assert!(file_attribute(Vec::new()).is_file());
    }

    #[test]
    fn test_pending_file_debug_hides_content() {
        let file = PendingFile::new("manual.pdf", vec![0; 2048]).with_content_type("application/pdf");
        let debug = format!("{file:?}");
        assert!(debug.contains("manual.pdf"));
        assert!(debug.contains("2048"));
        assert!(!debug.contains("[0, 0"));
    }

    #[test]
    fn test_submit_data_from_product_carries_current_state() {
        let product = Product {
            id: "p1".to_string(),
            name: "Juice".to_string(),
            slug: "juice".to_string(),
            description: None,
            category_id: Some("cat".to_string()),
            collection_ids: vec!["summer".to_string()],
            charge_taxes: true,
            rating: Some(4.5),
            seo_title: None,
            seo_description: None,
            attributes: vec![file_attribute(Vec::new())],
            variants: Vec::new(),
            channel_listings: Vec::new(),
            metadata: vec![MetadataItem::new("color", "red")],
            private_metadata: Vec::new(),
        };

        let data = ProductUpdateSubmitData::from_product(&product);
        assert_eq!(data.name, "Juice");
        assert_eq!(data.category_id.as_deref(), Some("cat"));
        assert_eq!(data.metadata, product.metadata);
        assert!(data.attributes_with_new_file_value.is_empty());
        assert!(data.variants.is_empty());
    }
}
