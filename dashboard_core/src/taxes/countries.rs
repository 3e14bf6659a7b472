//! Tax configuration per country
//!
//! [`CountriesListView`] holds what the countries tab shows: configurations
//! known to the server, countries added locally but not yet saved, and the
//! state of the save bar. All collaborators are passed in explicitly.

use super::api::{TAX_CLASSES_PAGE_SIZE, TaxApi};
use super::types::{
    Country, CountryChoice, TaxClass, TaxClassRateInput, TaxConfigurationError,
    TaxCountryConfiguration,
};
use super::urls::{ADD_COUNTRY_DIALOG, TaxTab, tax_countries_list_url, tax_tab_path};
use crate::error::ValidationError;
use crate::messages::{EnglishMessages, MessageCatalog};
use crate::navigation::{ConfirmButtonState, DialogActions, Navigator, QueryParams};
use crate::notify::{Notification, Notifier};
use crate::Result;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MutationState {
    called: bool,
    loading: bool,
    failed: bool,
    errors: Vec<TaxConfigurationError>,
}

#[derive(Debug, Default)]
struct ViewState {
    configurations: Option<Vec<TaxCountryConfiguration>>,
    tax_classes: Vec<TaxClass>,
    shop_countries: Option<Vec<Country>>,
    new_countries: Vec<TaxCountryConfiguration>,
    mutation: MutationState,
}

pub struct CountriesListView {
    id: Option<String>,
    params: QueryParams,
    api: Arc<dyn TaxApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    messages: Arc<dyn MessageCatalog>,
    state: Mutex<ViewState>,
}

impl CountriesListView {
    /// `id` is the selected country code from the URL, if any
    pub fn new(
        id: Option<String>,
        params: QueryParams,
        api: Arc<dyn TaxApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            id,
            params,
            api,
            navigator,
            notifier,
            messages: Arc::new(EnglishMessages),
            state: Mutex::new(ViewState::default()),
        }
    }

    pub fn with_messages(mut self, messages: Arc<dyn MessageCatalog>) -> Self {
        self.messages = messages;
        self
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn selected_country(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Fetch configurations, tax classes and shop countries, then redirect to
    /// the first configured country when none is selected
    pub async fn load(&self) -> Result<()> {
        let (configurations, tax_classes, shop_countries) = futures::join!(
            self.api.tax_country_configurations(),
            self.api.tax_classes(TAX_CLASSES_PAGE_SIZE),
            self.api.shop_countries(),
        );
        let (configurations, tax_classes, shop_countries) =
            (configurations?, tax_classes?, shop_countries?);
        debug!(
            "Loaded {} tax configurations, {} tax classes, {} shop countries",
            configurations.len(),
            tax_classes.len(),
            shop_countries.len()
        );

        {
            let mut state = self.state();
            state.configurations = Some(configurations);
            state.tax_classes = tax_classes;
            state.shop_countries = Some(shop_countries);
        }

        self.redirect_to_first_configuration();
        Ok(())
    }

    fn redirect_to_first_configuration(&self) {
        if self.id.is_some() {
            return;
        }
        let first = self
            .state()
            .configurations
            .as_ref()
            .and_then(|configurations| configurations.first())
            .map(|configuration| configuration.country.code.clone());
        if let Some(code) = first {
            self.navigator
                .navigate(&tax_countries_list_url(Some(&code), &QueryParams::new()));
        }
    }

    /// Server configurations followed by countries added in this session
    pub fn all_country_taxes(&self) -> Vec<TaxCountryConfiguration> {
        let state = self.state();
        state
            .configurations
            .iter()
            .flatten()
            .chain(state.new_countries.iter())
            .cloned()
            .collect()
    }

    pub fn tax_classes(&self) -> Vec<TaxClass> {
        self.state().tax_classes.clone()
    }

    /// Nothing is rendered while a redirect to a country is pending
    pub fn should_render(&self) -> bool {
        self.id.is_some() || self.all_country_taxes().is_empty()
    }

    pub fn handle_tab_change(&self, tab: TaxTab) {
        self.navigator.navigate(&tax_tab_path(tab));
    }

    fn dialog_actions(&self) -> DialogActions<'_> {
        let id = self.id.clone();
        DialogActions::new(
            self.navigator.as_ref(),
            move |params| tax_countries_list_url(id.as_deref(), params),
            self.params.clone(),
        )
    }

    pub fn open_add_country_dialog(&self) {
        self.dialog_actions().open(ADD_COUNTRY_DIALOG);
    }

    pub fn close_dialog(&self) {
        self.dialog_actions().close();
    }

    pub fn is_add_country_dialog_open(&self) -> bool {
        self.dialog_actions().is_open(ADD_COUNTRY_DIALOG)
    }

    /// Shop countries without a configuration yet, all unchecked
    ///
    /// `None` until shop countries are loaded.
    pub fn available_countries(&self) -> Option<Vec<CountryChoice>> {
        let chosen: HashSet<String> = self
            .all_country_taxes()
            .into_iter()
            .map(|configuration| configuration.country.code)
            .collect();

        let state = self.state();
        let shop_countries = state.shop_countries.as_ref()?;
        Some(
            shop_countries
                .iter()
                .filter(|country| !chosen.contains(&country.code))
                .map(|country| CountryChoice {
                    country: country.clone(),
                    checked: false,
                })
                .collect(),
        )
    }

    /// Close the dialog and add an unconfigured entry per chosen country
    pub fn confirm_new_countries(&self, countries: Vec<Country>) {
        self.close_dialog();

        let redirect_to = {
            let mut state = self.state();
            let added: Vec<TaxCountryConfiguration> = countries
                .into_iter()
                .map(|country| TaxCountryConfiguration::unconfigured(country, &state.tax_classes))
                .collect();
            debug!("Adding {} countries to tax configuration", added.len());
            state.new_countries.extend(added);

            let server_is_empty = state
                .configurations
                .as_ref()
                .is_none_or(|configurations| configurations.is_empty());
            match (&self.id, state.new_countries.first()) {
                (None, Some(first)) if server_is_empty => Some(first.country.code.clone()),
                _ => None,
            }
        };

        if let Some(code) = redirect_to {
            self.navigator
                .navigate(&tax_countries_list_url(Some(&code), &QueryParams::new()));
        }
    }

    /// Save the rates of the selected country
    pub async fn submit(&self, rates: Vec<TaxClassRateInput>) -> Result<Vec<TaxConfigurationError>> {
        let country_code = self
            .id
            .clone()
            .ok_or_else(|| ValidationError::missing_field("country"))?;

        {
            let mut state = self.state();
            state.mutation.called = true;
            state.mutation.loading = true;
            state.mutation.failed = false;
        }

        let result = self
            .api
            .update_tax_country_configuration(&country_code, rates)
            .await;

        let errors = {
            let mut state = self.state();
            state.mutation.loading = false;
            match result {
                Ok(errors) => {
                    state.mutation.errors = errors.clone();
                    errors
                }
                Err(e) => {
                    state.mutation.failed = true;
                    state.mutation.errors.clear();
                    error!("Saving tax configuration of {country_code} failed: {e}");
                    return Err(e);
                }
            }
        };

        if errors.is_empty() {
            self.notifier
                .notify(Notification::success(self.messages.saved_changes()));
        } else {
            warn!(
                "Tax configuration of {country_code} rejected with {} errors",
                errors.len()
            );
        }
        Ok(errors)
    }

    pub fn savebar_state(&self) -> ConfirmButtonState {
        let state = self.state();
        if state.mutation.failed {
            return ConfirmButtonState::Error;
        }
        ConfirmButtonState::from_mutation(
            state.mutation.called,
            state.mutation.loading,
            state.mutation.errors.len(),
        )
    }

    /// Editing is disabled while a save is in flight
    pub fn is_disabled(&self) -> bool {
        self.state().mutation.loading
    }
}
