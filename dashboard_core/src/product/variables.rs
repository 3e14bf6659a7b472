//! Mutation variables derived from the server state and the submitted form
//!
//! All functions here are pure. They decide *which* remote calls a submit
//! issues; the handler only decides *when*.

use super::api::{
    AttributeValueDeleteVariables, AttributeValueInput, ChannelListingAddInput,
    FileUploadVariables, ProductChannelListingUpdateInput, ProductChannelListingUpdateVariables,
    ProductInput, ProductUpdateVariables, SeoInput, StockInput, VariantFieldsInput,
    VariantStocksUpdateVariables, VariantUpdateVariables,
};
use super::types::{Product, ProductUpdateSubmitData, UploadedFile};
use log::warn;
use std::collections::{HashMap, HashSet};

/// Uploaded files keyed by the attribute they belong to
pub type UploadedFiles = HashMap<String, UploadedFile>;

/// One upload per file attribute that carries a new file, keyed by attribute
pub fn upload_batch(data: &ProductUpdateSubmitData) -> Vec<(String, FileUploadVariables)> {
    data.attributes_with_new_file_value
        .iter()
        .filter_map(|change| {
            change.file.as_ref().map(|file| {
                (
                    change.attribute_id.clone(),
                    FileUploadVariables { file: file.clone() },
                )
            })
        })
        .collect()
}

/// Existing file values replaced by a successful upload or explicitly removed
///
/// A failed upload leaves the current value in place.
pub fn superseded_value_deletes(
    product: &Product,
    data: &ProductUpdateSubmitData,
    uploaded: &UploadedFiles,
) -> Vec<AttributeValueDeleteVariables> {
    data.attributes_with_new_file_value
        .iter()
        .filter(|change| change.file.is_none() || uploaded.contains_key(&change.attribute_id))
        .filter_map(|change| product.attribute(&change.attribute_id))
        .filter(|attribute| attribute.is_file())
        .flat_map(|attribute| attribute.values.iter())
        .map(|value| AttributeValueDeleteVariables {
            id: value.id.clone(),
        })
        .collect()
}

fn attribute_inputs(data: &ProductUpdateSubmitData, uploaded: &UploadedFiles) -> Vec<AttributeValueInput> {
    let file_changes: HashSet<&str> = data
        .attributes_with_new_file_value
        .iter()
        .map(|change| change.attribute_id.as_str())
        .collect();

    // a file change owns its attribute
    let plain = data
        .attributes
        .iter()
        .filter(|change| !file_changes.contains(change.attribute_id.as_str()))
        .map(|change| AttributeValueInput {
            id: change.attribute_id.clone(),
            values: Some(change.values.clone()),
            ..Default::default()
        });

    let files = data
        .attributes_with_new_file_value
        .iter()
        .filter_map(|change| match (&change.file, uploaded.get(&change.attribute_id)) {
            (None, _) => Some(AttributeValueInput {
                id: change.attribute_id.clone(),
                values: Some(Vec::new()),
                ..Default::default()
            }),
            (Some(_), Some(file)) => Some(AttributeValueInput {
                id: change.attribute_id.clone(),
                file: Some(file.url.clone()),
                content_type: file.content_type.clone(),
                ..Default::default()
            }),
            // upload failed, its error is already reported
            (Some(_), None) => None,
        });

    plain.chain(files).collect()
}

/// The primary product update, with uploaded file URLs embedded
pub fn product_update_variables(
    product: &Product,
    data: &ProductUpdateSubmitData,
    uploaded: &UploadedFiles,
) -> ProductUpdateVariables {
    ProductUpdateVariables {
        id: product.id.clone(),
        input: ProductInput {
            attributes: attribute_inputs(data, uploaded),
            name: data.name.clone(),
            slug: data.slug.clone(),
            description: data.description.clone(),
            category: data.category_id.clone(),
            collections: data.collection_ids.clone(),
            charge_taxes: data.charge_taxes,
            rating: data.rating,
            seo: SeoInput {
                title: data.seo_title.clone(),
                description: data.seo_description.clone(),
            },
        },
    }
}

/// One stock update per variant whose stocks differ from the server
pub fn variant_stocks_variables(
    product: &Product,
    data: &ProductUpdateSubmitData,
) -> Vec<VariantStocksUpdateVariables> {
    data.variants
        .iter()
        .filter_map(|change| {
            let Some(variant) = product.variant(&change.variant_id) else {
                warn!(
                    "Skipping stock changes for unknown variant {}",
                    change.variant_id
                );
                return None;
            };

            let stocks: Vec<StockInput> = change
                .stocks
                .iter()
                .filter(|stock| variant.stock_quantity(&stock.warehouse_id) != Some(stock.quantity))
                .map(|stock| StockInput {
                    warehouse: stock.warehouse_id.clone(),
                    quantity: stock.quantity,
                })
                .collect();
            let remove_stocks: Vec<String> = change
                .removed_warehouse_ids
                .iter()
                .filter(|warehouse_id| variant.stock_quantity(warehouse_id).is_some())
                .cloned()
                .collect();

            if stocks.is_empty() && remove_stocks.is_empty() {
                return None;
            }
            Some(VariantStocksUpdateVariables {
                id: variant.id.clone(),
                stocks,
                remove_stocks,
            })
        })
        .collect()
}

/// One field update per variant whose name, SKU or inventory tracking changed
pub fn variant_fields_variables(
    product: &Product,
    data: &ProductUpdateSubmitData,
) -> Vec<VariantUpdateVariables> {
    data.variants
        .iter()
        .filter_map(|change| {
            let Some(variant) = product.variant(&change.variant_id) else {
                warn!(
                    "Skipping field changes for unknown variant {}",
                    change.variant_id
                );
                return None;
            };

            let input = VariantFieldsInput {
                name: change.name.clone().filter(|name| *name != variant.name),
                sku: change
                    .sku
                    .clone()
                    .filter(|sku| variant.sku.as_deref() != Some(sku.as_str())),
                track_inventory: change
                    .track_inventory
                    .filter(|track| *track != variant.track_inventory),
            };

            if input == VariantFieldsInput::default() {
                return None;
            }
            Some(VariantUpdateVariables {
                id: variant.id.clone(),
                input,
            })
        })
        .collect()
}

/// Listings to upsert, plus server channels dropped from the form
pub fn channels_variables(
    product: &Product,
    data: &ProductUpdateSubmitData,
) -> ProductChannelListingUpdateVariables {
    let submitted: HashSet<&str> = data
        .channel_listings
        .iter()
        .map(|listing| listing.channel_id.as_str())
        .collect();

    ProductChannelListingUpdateVariables {
        id: product.id.clone(),
        input: ProductChannelListingUpdateInput {
            update_channels: data
                .channel_listings
                .iter()
                .map(ChannelListingAddInput::from)
                .collect(),
            remove_channels: product
                .channel_listings
                .iter()
                .filter(|listing| !submitted.contains(listing.channel_id.as_str()))
                .map(|listing| listing.channel_id.clone())
                .collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::types::{
        AttributeChange, AttributeInputType, AttributeRef, AttributeValue, FileAttributeChange,
        PendingFile, ProductAttribute, ProductChannelListing, ProductVariant, Stock, StockChange,
        VariantChange,
    };

    fn listing(channel_id: &str) -> ProductChannelListing {
        ProductChannelListing {
            channel_id: channel_id.to_string(),
            is_published: true,
            publication_date: None,
            is_available_for_purchase: true,
            available_for_purchase_date: None,
            visible_in_listings: true,
        }
    }

    fn product() -> Product {
        Product {
            id: "p1".to_string(),
            name: "Juice".to_string(),
            slug: "juice".to_string(),
            description: None,
            category_id: None,
            collection_ids: Vec::new(),
            charge_taxes: false,
            rating: None,
            seo_title: None,
            seo_description: None,
            attributes: vec![ProductAttribute {
                attribute: AttributeRef {
                    id: "manual".to_string(),
                    slug: None,
                    input_type: AttributeInputType::File,
                },
                values: vec![AttributeValue {
                    id: "old-file".to_string(),
                    name: Some("old.pdf".to_string()),
                    slug: None,
                    file: None,
                }],
            }],
            variants: vec![ProductVariant {
                id: "v1".to_string(),
                name: "1l".to_string(),
                sku: Some("JUICE-1L".to_string()),
                track_inventory: true,
                stocks: vec![
                    Stock {
                        warehouse_id: "w1".to_string(),
                        quantity: 5,
                    },
                    Stock {
                        warehouse_id: "w2".to_string(),
                        quantity: 1,
                    },
                ],
            }],
            channel_listings: vec![listing("c1"), listing("c2")],
            metadata: Vec::new(),
            private_metadata: Vec::new(),
        }
    }

    fn uploaded(attribute_id: &str) -> UploadedFiles {
        HashMap::from([(
            attribute_id.to_string(),
            UploadedFile {
                url: "https://cdn/new.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
            },
        )])
    }

    #[test]
    fn test_upload_batch_skips_removals() {
        let mut data = ProductUpdateSubmitData::from_product(&product());
        data.attributes_with_new_file_value = vec![
            FileAttributeChange {
                attribute_id: "manual".to_string(),
                file: Some(PendingFile::new("new.pdf", vec![1, 2, 3])),
            },
            FileAttributeChange {
                attribute_id: "photo".to_string(),
                file: None,
            },
        ];

        let batch = upload_batch(&data);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].0, "manual");
        assert_eq!(batch[0].1.file.file_name, "new.pdf");
    }

    #[test]
    fn test_deletes_only_after_successful_upload() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.attributes_with_new_file_value = vec![FileAttributeChange {
            attribute_id: "manual".to_string(),
            file: Some(PendingFile::new("new.pdf", vec![1])),
        }];

        assert!(superseded_value_deletes(&product, &data, &UploadedFiles::new()).is_empty());

        let deletes = superseded_value_deletes(&product, &data, &uploaded("manual"));
        assert_eq!(deletes, vec![AttributeValueDeleteVariables {
            id: "old-file".to_string()
        }]);
    }

    #[test]
    fn test_explicit_removal_deletes_and_clears_values() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.attributes_with_new_file_value = vec![FileAttributeChange {
            attribute_id: "manual".to_string(),
            file: None,
        }];

        let deletes = superseded_value_deletes(&product, &data, &UploadedFiles::new());
        assert_eq!(deletes.len(), 1);

        let variables = product_update_variables(&product, &data, &UploadedFiles::new());
        assert_eq!(variables.input.attributes[0].values, Some(Vec::new()));
        assert_eq!(variables.input.attributes[0].file, None);
    }

    #[test]
    fn test_product_update_embeds_uploaded_url() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.name = "Orange juice".to_string();
        data.attributes = vec![AttributeChange {
            attribute_id: "color".to_string(),
            values: vec!["orange".to_string()],
        }];
        data.attributes_with_new_file_value = vec![FileAttributeChange {
            attribute_id: "manual".to_string(),
            file: Some(PendingFile::new("new.pdf", vec![1])),
        }];

        let variables = product_update_variables(&product, &data, &uploaded("manual"));
        assert_eq!(variables.id, "p1");
        assert_eq!(variables.input.name, "Orange juice");
        assert_eq!(variables.input.attributes.len(), 2);
        assert_eq!(
            variables.input.attributes[1].file.as_deref(),
            Some("https://cdn/new.pdf")
        );
    }

    #[test]
    fn test_file_change_replaces_plain_values_of_same_attribute() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.attributes = vec![AttributeChange {
            attribute_id: "manual".to_string(),
            values: vec!["old-file".to_string()],
        }];
        data.attributes_with_new_file_value = vec![FileAttributeChange {
            attribute_id: "manual".to_string(),
            file: Some(PendingFile::new("new.pdf", vec![1])),
        }];

        let variables = product_update_variables(&product, &data, &uploaded("manual"));
        let manual: Vec<_> = variables
            .input
            .attributes
            .iter()
            .filter(|input| input.id == "manual")
            .collect();
        assert_eq!(manual.len(), 1);
        assert_eq!(manual[0].file.as_deref(), Some("https://cdn/new.pdf"));
        assert!(manual[0].values.is_none());
    }

    #[test]
    fn test_failed_upload_is_left_out_of_product_update() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.attributes_with_new_file_value = vec![FileAttributeChange {
            attribute_id: "manual".to_string(),
            file: Some(PendingFile::new("new.pdf", vec![1])),
        }];

        let variables = product_update_variables(&product, &data, &UploadedFiles::new());
        assert!(variables.input.attributes.is_empty());
    }

    #[test]
    fn test_stock_delta_ignores_unchanged_quantities() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        let mut change = VariantChange::new("v1");
        change.stocks = vec![
            StockChange {
                warehouse_id: "w1".to_string(),
                quantity: 5,
            },
            StockChange {
                warehouse_id: "w3".to_string(),
                quantity: 2,
            },
        ];
        change.removed_warehouse_ids = vec!["w2".to_string(), "w9".to_string()];
        data.variants = vec![change];

        let variables = variant_stocks_variables(&product, &data);
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].stocks, vec![StockInput {
            warehouse: "w3".to_string(),
            quantity: 2
        }]);
        assert_eq!(variables[0].remove_stocks, vec!["w2"]);
    }

    #[test]
    fn test_unchanged_variant_issues_no_calls() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        let mut change = VariantChange::new("v1");
        change.name = Some("1l".to_string());
        change.sku = Some("JUICE-1L".to_string());
        change.track_inventory = Some(true);
        data.variants = vec![change, VariantChange::new("missing")];

        assert!(variant_stocks_variables(&product, &data).is_empty());
        assert!(variant_fields_variables(&product, &data).is_empty());
    }

    #[test]
    fn test_variant_fields_only_carry_changes() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        let mut change = VariantChange::new("v1");
        change.name = Some("1l".to_string());
        change.sku = Some("JUICE-1000".to_string());
        data.variants = vec![change];

        let variables = variant_fields_variables(&product, &data);
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].input.name, None);
        assert_eq!(variables[0].input.sku.as_deref(), Some("JUICE-1000"));
    }

    #[test]
    fn test_channels_removed_from_form_are_removed() {
        let product = product();
        let mut data = ProductUpdateSubmitData::from_product(&product);
        data.channel_listings = vec![listing("c2"), listing("c3")];

        let variables = channels_variables(&product, &data);
        assert_eq!(variables.input.update_channels.len(), 2);
        assert_eq!(variables.input.remove_channels, vec!["c1"]);
    }
}
