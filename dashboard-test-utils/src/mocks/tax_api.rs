//! Mock implementation of the tax API for testing

use async_trait::async_trait;
use dashboard_core::error::TransportError;
use dashboard_core::taxes::{
    Country, TaxApi, TaxClass, TaxClassRateInput, TaxConfigurationError, TaxCountryConfiguration,
};
use dashboard_core::{Error, Result};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockTaxState {
    configurations: Vec<TaxCountryConfiguration>,
    tax_classes: Vec<TaxClass>,
    shop_countries: Vec<Country>,
    update_errors: Vec<TaxConfigurationError>,
    reject_updates: bool,
    requested_page_sizes: Vec<usize>,
    updates: Vec<(String, Vec<TaxClassRateInput>)>,
}

/// In-memory tax API that records every update
#[derive(Clone, Default)]
pub struct MockTaxApi {
    state: Arc<Mutex<MockTaxState>>,
}

impl MockTaxApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configurations(self, configurations: Vec<TaxCountryConfiguration>) -> Self {
        self.state.lock().unwrap().configurations = configurations;
        self
    }

    pub fn with_tax_classes(self, tax_classes: Vec<TaxClass>) -> Self {
        self.state.lock().unwrap().tax_classes = tax_classes;
        self
    }

    pub fn with_shop_countries(self, countries: Vec<Country>) -> Self {
        self.state.lock().unwrap().shop_countries = countries;
        self
    }

    /// Answer updates with these errors
    pub fn expect_update_errors(&self, errors: Vec<TaxConfigurationError>) {
        self.state.lock().unwrap().update_errors = errors;
    }

    /// Reject updates as if the server failed
    pub fn expect_update_failure(&self) {
        self.state.lock().unwrap().reject_updates = true;
    }

    /// Page sizes requested from `tax_classes`
    pub fn requested_page_sizes(&self) -> Vec<usize> {
        self.state.lock().unwrap().requested_page_sizes.clone()
    }

    /// Updates received, as (country code, rates)
    pub fn updates(&self) -> Vec<(String, Vec<TaxClassRateInput>)> {
        self.state.lock().unwrap().updates.clone()
    }
}

#[async_trait]
impl TaxApi for MockTaxApi {
    async fn tax_country_configurations(&self) -> Result<Vec<TaxCountryConfiguration>> {
        Ok(self.state.lock().unwrap().configurations.clone())
    }

    async fn tax_classes(&self, first: usize) -> Result<Vec<TaxClass>> {
        let mut state = self.state.lock().unwrap();
        state.requested_page_sizes.push(first);
        Ok(state.tax_classes.iter().take(first).cloned().collect())
    }

    async fn shop_countries(&self) -> Result<Vec<Country>> {
        Ok(self.state.lock().unwrap().shop_countries.clone())
    }

    async fn update_tax_country_configuration(
        &self,
        country_code: &str,
        rates: Vec<TaxClassRateInput>,
    ) -> Result<Vec<TaxConfigurationError>> {
        let mut state = self.state.lock().unwrap();
        state.updates.push((country_code.to_string(), rates));
        if state.reject_updates {
            return Err(Error::Transport(TransportError::server_error(
                500,
                "Internal server error",
            )));
        }
        Ok(state.update_errors.clone())
    }
}
