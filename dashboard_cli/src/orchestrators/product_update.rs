//! Product update command orchestrator
//!
//! Reads a change file, turns it into the data a product save submits and
//! runs it through [`ProductUpdateHandler`], delivering notifications to the
//! console while the requests are in flight.

use super::{ConsoleOptions, NotificationSession};
use anyhow::{Context, Result};
use dashboard_core::error::ValidationError;
use dashboard_core::notify::Notification;
use dashboard_core::product::{
    AttributeChange, FileAttributeChange, MetadataItem, MutationStep, PendingFile, Product,
    ProductMutations, ProductQueries, ProductUpdateHandler, ProductUpdateSubmitData, RemoteError,
    StockChange, VariantChange,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeValuesChange {
    pub id: String,
    pub values: Vec<String>,
}

/// New file for a file attribute; no `path` removes the current file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileChange {
    pub attribute: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StockQuantity {
    pub warehouse: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantChanges {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub track_inventory: Option<bool>,
    #[serde(default)]
    pub stocks: Vec<StockQuantity>,
    #[serde(default)]
    pub remove_stocks: Vec<String>,
}

/// Contents of a change file
///
/// Absent fields keep the product's current value. `metadata` and
/// `private_metadata` replace the whole key set when present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub collections: Option<Vec<String>>,
    #[serde(default)]
    pub charge_taxes: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub seo_title: Option<String>,
    #[serde(default)]
    pub seo_description: Option<String>,
    #[serde(default)]
    pub attributes: Vec<AttributeValuesChange>,
    #[serde(default)]
    pub files: Vec<FileChange>,
    #[serde(default)]
    pub variants: Vec<VariantChanges>,
    #[serde(default)]
    pub remove_channels: Vec<String>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub private_metadata: Option<BTreeMap<String, String>>,
}

fn metadata_items(entries: BTreeMap<String, String>) -> Vec<MetadataItem> {
    entries
        .into_iter()
        .map(|(key, value)| MetadataItem::new(key, value))
        .collect()
}

fn guess_content_type(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(content_type.to_string())
}

impl ProductChanges {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Change file is not valid")
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read change file {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Submit data for `product` with these changes applied
    ///
    /// Relative file paths resolve against `base_dir`.
    pub async fn into_submit_data(
        self,
        product: &Product,
        base_dir: &Path,
    ) -> Result<ProductUpdateSubmitData> {
        let mut data = ProductUpdateSubmitData::from_product(product);

        if let Some(name) = self.name {
            data.name = name;
        }
        if let Some(slug) = self.slug {
            data.slug = slug;
        }
        if self.description.is_some() {
            data.description = self.description;
        }
        if self.category.is_some() {
            data.category_id = self.category;
        }
        if let Some(collections) = self.collections {
            data.collection_ids = collections;
        }
        if let Some(charge_taxes) = self.charge_taxes {
            data.charge_taxes = charge_taxes;
        }
        if self.rating.is_some() {
            data.rating = self.rating;
        }
        if self.seo_title.is_some() {
            data.seo_title = self.seo_title;
        }
        if self.seo_description.is_some() {
            data.seo_description = self.seo_description;
        }

        data.attributes = self
            .attributes
            .into_iter()
            .map(|change| AttributeChange {
                attribute_id: change.id,
                values: change.values,
            })
            .collect();

        for change in self.files {
            let file = match change.path {
                Some(path) => {
                    let path = base_dir.join(path);
                    let content = tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    let file_name = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .ok_or_else(|| {
                            dashboard_core::Error::from(ValidationError::invalid_parameter(
                                "path",
                                &format!("{} has no file name", path.display()),
                            ))
                        })?
                        .to_string();
                    let mut file = PendingFile::new(file_name, content);
                    file.content_type = change.content_type.or_else(|| guess_content_type(&path));
                    Some(file)
                }
                None => None,
            };
            data.attributes_with_new_file_value.push(FileAttributeChange {
                attribute_id: change.attribute,
                file,
            });
        }

        data.variants = self
            .variants
            .into_iter()
            .map(|change| VariantChange {
                variant_id: change.id,
                name: change.name,
                sku: change.sku,
                track_inventory: change.track_inventory,
                stocks: change
                    .stocks
                    .into_iter()
                    .map(|stock| StockChange {
                        warehouse_id: stock.warehouse,
                        quantity: stock.quantity,
                    })
                    .collect(),
                removed_warehouse_ids: change.remove_stocks,
            })
            .collect();

        data.channel_listings
            .retain(|listing| !self.remove_channels.contains(&listing.channel_id));

        if let Some(metadata) = self.metadata {
            data.metadata = metadata_items(metadata);
        }
        if let Some(private_metadata) = self.private_metadata {
            data.private_metadata = metadata_items(private_metadata);
        }

        Ok(data)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub calls: usize,
}

/// Outcome of one product update
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdateReport {
    pub product_id: String,
    pub errors: Vec<RemoteError>,
    pub notifications: Vec<Notification>,
    pub steps: Vec<StepReport>,
}

impl ProductUpdateReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrator for the `product update` command
pub struct ProductUpdateOrchestrator<A> {
    api: Arc<A>,
    options: ConsoleOptions,
}

impl<A> ProductUpdateOrchestrator<A>
where
    A: ProductMutations + ProductQueries + 'static,
{
    pub fn new(api: Arc<A>, options: ConsoleOptions) -> Self {
        Self { api, options }
    }

    async fn fetch_product(&self, product_id: &str) -> Result<Product> {
        let product = self
            .api
            .product(product_id)
            .await
            .context("Failed to fetch product")?;
        product.ok_or_else(|| {
            dashboard_core::Error::from(ValidationError::not_found("product", product_id)).into()
        })
    }

    pub async fn update(
        &self,
        product_id: &str,
        changes: ProductChanges,
        base_dir: &Path,
    ) -> Result<ProductUpdateReport> {
        let product = self.fetch_product(product_id).await?;
        let data = changes.into_submit_data(&product, base_dir).await?;
        debug!(
            "Submitting {} file changes and {} variant changes for {product_id}",
            data.attributes_with_new_file_value.len(),
            data.variants.len()
        );

        let session =
            NotificationSession::start(self.options, &format!("Saving product {product_id}"));
        let api: Arc<dyn ProductMutations> = self.api.clone();
        let handler = ProductUpdateHandler::new(product, api, session.notifier());
        let result = handler
            .submit(&data)
            .await
            .context("Product update was rejected");
        let (errors, notifications) = session.settle(result).await?;

        let steps = MutationStep::ALL
            .iter()
            .map(|step| StepReport {
                step: step.name(),
                calls: handler.step_status(*step).calls,
            })
            .filter(|report| report.calls > 0)
            .collect();

        Ok(ProductUpdateReport {
            product_id: product_id.to_string(),
            errors,
            notifications,
            steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_file_parses() {
        let changes = ProductChanges::from_json(
            r#"{
                "name": "Orange Juice",
                "files": [{"attribute": "manual", "path": "manual.pdf"}, {"attribute": "leaflet"}],
                "variants": [{"id": "v1", "stocks": [{"warehouse": "w1", "quantity": 3}]}],
                "metadata": {"origin": "spain"}
            }"#,
        )
        .unwrap();

        assert_eq!(changes.name.as_deref(), Some("Orange Juice"));
        assert!(changes.files[1].path.is_none());
        assert_eq!(changes.variants[0].stocks[0].quantity, 3);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!(ProductChanges::from_json(r#"{"nmae": "typo"}"#).is_err());
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            guess_content_type(Path::new("manual.PDF")).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(guess_content_type(Path::new("notes")), None);
    }
}
