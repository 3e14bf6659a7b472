//! Test data builders for creating product update scenarios

use dashboard_core::product::{
    AttributeChange, AttributeInputType, AttributeRef, AttributeValue, FileAttributeChange,
    MetadataItem, PendingFile, Product, ProductAttribute, ProductChannelListing,
    ProductUpdateSubmitData, ProductVariant, Stock, StockChange, UploadedFile, VariantChange,
};

/// Builder for the server-known state of a product
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    /// Create a product with the given id and otherwise empty state
    pub fn new(id: &str) -> Self {
        Self {
            product: Product {
                id: id.to_string(),
                name: "Test Product".to_string(),
                slug: "test-product".to_string(),
                description: None,
                category_id: Some("Q2F0ZWdvcnk6MQ==".to_string()),
                collection_ids: Vec::new(),
                charge_taxes: true,
                rating: None,
                seo_title: None,
                seo_description: None,
                attributes: Vec::new(),
                variants: Vec::new(),
                channel_listings: Vec::new(),
                metadata: Vec::new(),
                private_metadata: Vec::new(),
            },
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.product.name = name.to_string();
        self
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.product.slug = slug.to_string();
        self
    }

    /// Add a plain attribute with the given value slugs
    pub fn with_attribute(mut self, attribute_id: &str, value_slugs: &[&str]) -> Self {
        self.product.attributes.push(ProductAttribute {
            attribute: AttributeRef {
                id: attribute_id.to_string(),
                slug: Some(attribute_id.to_string()),
                input_type: AttributeInputType::Dropdown,
            },
            values: value_slugs
                .iter()
                .map(|slug| AttributeValue {
                    id: format!("{attribute_id}-{slug}"),
                    name: Some(slug.to_string()),
                    slug: Some(slug.to_string()),
                    file: None,
                })
                .collect(),
        });
        self
    }

    /// Add a file attribute; each value id gets a stored file
    pub fn with_file_attribute(mut self, attribute_id: &str, value_ids: &[&str]) -> Self {
        self.product.attributes.push(ProductAttribute {
            attribute: AttributeRef {
                id: attribute_id.to_string(),
                slug: Some(attribute_id.to_string()),
                input_type: AttributeInputType::File,
            },
            values: value_ids
                .iter()
                .map(|id| AttributeValue {
                    id: id.to_string(),
                    name: Some(format!("{id}.pdf")),
                    slug: Some(id.to_string()),
                    file: Some(UploadedFile {
                        url: format!("https://cdn.example.com/stored/{id}.pdf"),
                        content_type: Some("application/pdf".to_string()),
                    }),
                })
                .collect(),
        });
        self
    }

    /// Add a variant with stock per (warehouse, quantity)
    pub fn with_variant(mut self, variant_id: &str, stocks: &[(&str, i64)]) -> Self {
        self.product.variants.push(ProductVariant {
            id: variant_id.to_string(),
            name: format!("Variant {variant_id}"),
            sku: Some(format!("SKU-{variant_id}")),
            track_inventory: true,
            stocks: stocks
                .iter()
                .map(|(warehouse_id, quantity)| Stock {
                    warehouse_id: warehouse_id.to_string(),
                    quantity: *quantity,
                })
                .collect(),
        });
        self
    }

    /// Publish the product in a channel
    pub fn with_channel(mut self, channel_id: &str) -> Self {
        self.product.channel_listings.push(ProductChannelListing {
            channel_id: channel_id.to_string(),
            is_published: true,
            publication_date: None,
            is_available_for_purchase: true,
            available_for_purchase_date: None,
            visible_in_listings: true,
        });
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.product.metadata.push(MetadataItem::new(key, value));
        self
    }

    pub fn with_private_metadata(mut self, key: &str, value: &str) -> Self {
        self.product
            .private_metadata
            .push(MetadataItem::new(key, value));
        self
    }

    pub fn build(self) -> Product {
        self.product
    }
}

/// Builder for the data one save submits, starting from "no changes"
pub struct SubmitDataBuilder {
    data: ProductUpdateSubmitData,
}

impl SubmitDataBuilder {
    /// Submit data that leaves `product` unchanged
    pub fn unchanged(product: &Product) -> Self {
        Self {
            data: ProductUpdateSubmitData::from_product(product),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.data.name = name.to_string();
        self
    }

    pub fn with_attribute_values(mut self, attribute_id: &str, values: &[&str]) -> Self {
        self.data.attributes.push(AttributeChange {
            attribute_id: attribute_id.to_string(),
            values: values.iter().map(|value| value.to_string()).collect(),
        });
        self
    }

    /// Replace the file of `attribute_id` with a new PDF
    pub fn with_new_file(mut self, attribute_id: &str, file_name: &str) -> Self {
        self.data
            .attributes_with_new_file_value
            .push(FileAttributeChange {
                attribute_id: attribute_id.to_string(),
                file: Some(
                    PendingFile::new(file_name, b"%PDF-1.7 test".to_vec())
                        .with_content_type("application/pdf"),
                ),
            });
        self
    }

    /// Remove the file of `attribute_id`
    pub fn with_removed_file(mut self, attribute_id: &str) -> Self {
        self.data
            .attributes_with_new_file_value
            .push(FileAttributeChange {
                attribute_id: attribute_id.to_string(),
                file: None,
            });
        self
    }

    fn variant(&mut self, variant_id: &str) -> &mut VariantChange {
        let index = match self
            .data
            .variants
            .iter()
            .position(|change| change.variant_id == variant_id)
        {
            Some(index) => index,
            None => {
                self.data.variants.push(VariantChange::new(variant_id));
                self.data.variants.len() - 1
            }
        };
        &mut self.data.variants[index]
    }

    pub fn with_stock(mut self, variant_id: &str, warehouse_id: &str, quantity: i64) -> Self {
        self.variant(variant_id).stocks.push(StockChange {
            warehouse_id: warehouse_id.to_string(),
            quantity,
        });
        self
    }

    pub fn with_removed_stock(mut self, variant_id: &str, warehouse_id: &str) -> Self {
        self.variant(variant_id)
            .removed_warehouse_ids
            .push(warehouse_id.to_string());
        self
    }

    pub fn with_variant_name(mut self, variant_id: &str, name: &str) -> Self {
        self.variant(variant_id).name = Some(name.to_string());
        self
    }

    pub fn with_variant_sku(mut self, variant_id: &str, sku: &str) -> Self {
        self.variant(variant_id).sku = Some(sku.to_string());
        self
    }

    /// Drop the product from a channel
    pub fn without_channel(mut self, channel_id: &str) -> Self {
        self.data
            .channel_listings
            .retain(|listing| listing.channel_id != channel_id);
        self
    }

    /// Set a metadata entry, replacing any entry with the same key
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.data.metadata.retain(|item| item.key != key);
        self.data.metadata.push(MetadataItem::new(key, value));
        self
    }

    pub fn without_metadata(mut self, key: &str) -> Self {
        self.data.metadata.retain(|item| item.key != key);
        self
    }

    pub fn with_private_metadata(mut self, key: &str, value: &str) -> Self {
        self.data.private_metadata.retain(|item| item.key != key);
        self.data
            .private_metadata
            .push(MetadataItem::new(key, value));
        self
    }

    pub fn build(self) -> ProductUpdateSubmitData {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = ProductBuilder::new("p1")
            .with_file_attribute("manual", &["old"])
            .with_variant("v1", &[("w1", 3)])
            .with_channel("c1")
            .build();

        assert!(product.attribute("manual").unwrap().is_file());
        assert_eq!(product.variant("v1").unwrap().stock_quantity("w1"), Some(3));
        assert_eq!(product.channel_listings.len(), 1);
    }

    #[test]
    fn test_submit_builder_merges_variant_changes() {
        let product = ProductBuilder::new("p1").with_variant("v1", &[]).build();

        let data = SubmitDataBuilder::unchanged(&product)
            .with_stock("v1", "w1", 4)
            .with_variant_name("v1", "Large")
            .build();

        assert_eq!(data.variants.len(), 1);
        assert_eq!(data.variants[0].stocks.len(), 1);
        assert_eq!(data.variants[0].name.as_deref(), Some("Large"));
    }
}
