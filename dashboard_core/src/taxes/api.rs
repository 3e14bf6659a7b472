//! Remote operations of the tax configuration pages

use super::types::{Country, TaxClass, TaxClassRateInput, TaxConfigurationError, TaxCountryConfiguration};
use crate::Result;
use async_trait::async_trait;

/// Tax classes fetched for the country view
pub const TAX_CLASSES_PAGE_SIZE: usize = 100;

#[async_trait]
pub trait TaxApi: Send + Sync {
    async fn tax_country_configurations(&self) -> Result<Vec<TaxCountryConfiguration>>;

    async fn tax_classes(&self, first: usize) -> Result<Vec<TaxClass>>;

    /// Countries the shop ships to
    async fn shop_countries(&self) -> Result<Vec<Country>>;

    async fn update_tax_country_configuration(
        &self,
        country_code: &str,
        rates: Vec<TaxClassRateInput>,
    ) -> Result<Vec<TaxConfigurationError>>;
}
