//! Tax configuration command orchestrator

use super::{ConsoleOptions, NotificationSession};
use crate::notifications::ConsoleNavigator;
use anyhow::{Context, Result};
use dashboard_core::error::ValidationError;
use dashboard_core::navigation::{ACTION_PARAM, QueryParams};
use dashboard_core::notify::Notification;
use dashboard_core::taxes::{
    ADD_COUNTRY_DIALOG, CountriesListView, Country, TaxApi, TaxClass, TaxClassRateInput,
    TaxConfigurationError, TaxCountryConfiguration,
};
use log::{debug, info};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;

/// Class name that addresses the country's default rate
pub const DEFAULT_RATE_CLASS: &str = "default";

/// A rate given on the command line, before its tax class is resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateArgument {
    pub tax_class: String,
    pub rate: Option<Decimal>,
}

/// Parse `CLASS=RATE`; an empty rate clears it
pub fn parse_rate(argument: &str) -> Result<RateArgument, String> {
    let (class, rate) = argument
        .split_once('=')
        .ok_or_else(|| format!("expected CLASS=RATE, got '{argument}'"))?;
    let class = class.trim();
    if class.is_empty() {
        return Err(format!("missing tax class in '{argument}'"));
    }

    let rate = rate.trim();
    let rate = if rate.is_empty() {
        None
    } else {
        let value = Decimal::from_str(rate.trim_end_matches('%'))
            .map_err(|e| format!("invalid rate '{rate}': {e}"))?;
        if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
            return Err(format!("rate must be between 0 and 100, got {value}"));
        }
        Some(value)
    };

    Ok(RateArgument {
        tax_class: class.to_string(),
        rate,
    })
}

fn resolve_rates(
    arguments: &[RateArgument],
    tax_classes: &[TaxClass],
) -> dashboard_core::Result<Vec<TaxClassRateInput>> {
    arguments
        .iter()
        .map(|argument| {
            if argument.tax_class.eq_ignore_ascii_case(DEFAULT_RATE_CLASS) {
                return Ok(TaxClassRateInput {
                    tax_class_id: None,
                    rate: argument.rate,
                });
            }
            let tax_class = tax_classes
                .iter()
                .find(|class| {
                    class.id == argument.tax_class
                        || class.name.eq_ignore_ascii_case(&argument.tax_class)
                })
                .ok_or_else(|| ValidationError::not_found("tax class", &argument.tax_class))?;
            Ok(TaxClassRateInput {
                tax_class_id: Some(tax_class.id.clone()),
                rate: argument.rate,
            })
        })
        .collect()
}

/// Rates of `configuration` with `overrides` applied on top
fn merge_rates(
    configuration: &TaxCountryConfiguration,
    overrides: Vec<TaxClassRateInput>,
) -> Vec<TaxClassRateInput> {
    let mut rates: Vec<TaxClassRateInput> = configuration
        .tax_class_country_rates
        .iter()
        .map(|rate| TaxClassRateInput {
            tax_class_id: rate.tax_class.as_ref().map(|class| class.id.clone()),
            rate: rate.rate,
        })
        .collect();

    for input in overrides {
        match rates
            .iter_mut()
            .find(|rate| rate.tax_class_id == input.tax_class_id)
        {
            Some(existing) => existing.rate = input.rate,
            None => rates.push(input),
        }
    }
    rates
}

#[derive(Debug, Clone, Serialize)]
pub struct TaxListReport {
    pub selected: Option<String>,
    /// Where the view sent the user when no country was selected
    pub redirected_to: Option<String>,
    pub configurations: Vec<TaxCountryConfiguration>,
    pub tax_classes: Vec<TaxClass>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaxUpdateReport {
    pub country: String,
    pub errors: Vec<TaxConfigurationError>,
    pub notifications: Vec<Notification>,
}

impl TaxUpdateReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrator for the `taxes` commands
pub struct TaxOrchestrator<A> {
    api: Arc<A>,
    options: ConsoleOptions,
}

impl<A> TaxOrchestrator<A>
where
    A: TaxApi + 'static,
{
    pub fn new(api: Arc<A>, options: ConsoleOptions) -> Self {
        Self { api, options }
    }

    fn view(
        &self,
        country: Option<&str>,
        params: QueryParams,
        session: &NotificationSession,
    ) -> (CountriesListView, Arc<ConsoleNavigator>) {
        let navigator = Arc::new(ConsoleNavigator::new());
        let api: Arc<dyn TaxApi> = self.api.clone();
        let view = CountriesListView::new(
            country.map(str::to_uppercase),
            params,
            api,
            navigator.clone(),
            session.notifier(),
        );
        (view, navigator)
    }

    pub async fn list(&self, country: Option<&str>) -> Result<TaxListReport> {
        let session = NotificationSession::start(self.options, "Loading tax configuration");
        let (view, navigator) = self.view(country, QueryParams::new(), &session);
        let loaded = view
            .load()
            .await
            .context("Failed to load tax configuration");
        session.settle(loaded).await?;

        Ok(TaxListReport {
            selected: view.selected_country().map(str::to_string),
            redirected_to: navigator.last(),
            configurations: view.all_country_taxes(),
            tax_classes: view.tax_classes(),
        })
    }

    /// Save `rates` for a country, keeping the rates not mentioned
    pub async fn update(&self, country: &str, rates: &[RateArgument]) -> Result<TaxUpdateReport> {
        let session = NotificationSession::start(
            self.options,
            &format!("Saving tax rates of {}", country.to_uppercase()),
        );
        let (view, _) = self.view(Some(country), QueryParams::new(), &session);
        let result = self.save(&view, rates, None).await;
        let (errors, notifications) = session.settle(result).await?;

        Ok(TaxUpdateReport {
            country: country.to_uppercase(),
            errors,
            notifications,
        })
    }

    /// Submit through `view`, starting from `unsaved` or from the selected
    /// country's server configuration
    async fn save(
        &self,
        view: &CountriesListView,
        rates: &[RateArgument],
        unsaved: Option<TaxCountryConfiguration>,
    ) -> Result<Vec<TaxConfigurationError>> {
        view.load()
            .await
            .context("Failed to load tax configuration")?;
        let overrides = resolve_rates(rates, &view.tax_classes())?;

        let code = view.selected_country().unwrap_or_default();
        let configuration = match unsaved {
            Some(configuration) => configuration,
            None => view
                .all_country_taxes()
                .into_iter()
                .find(|configuration| configuration.country.code == code)
                .ok_or_else(|| {
                    dashboard_core::Error::from(ValidationError::not_found(
                        "tax configuration",
                        code,
                    ))
                })?,
        };

        let errors = view
            .submit(merge_rates(&configuration, overrides))
            .await
            .context("Failed to save tax configuration")?;
        debug!("Save bar after submit: {:?}", view.savebar_state());
        Ok(errors)
    }

    /// Add shop countries to the configuration and save them with `rates`
    pub async fn add_countries(
        &self,
        codes: &[String],
        rates: &[RateArgument],
    ) -> Result<Vec<TaxUpdateReport>> {
        let chosen = self.choose_countries(codes).await?;

        let mut reports = Vec::with_capacity(chosen.len());
        for configuration in chosen {
            let code = configuration.country.code.clone();
            info!("Saving new tax configuration for {code}");

            let session =
                NotificationSession::start(self.options, &format!("Saving tax rates of {code}"));
            let (view, _) = self.view(Some(&code), QueryParams::new(), &session);
            let result = self.save(&view, rates, Some(configuration)).await;
            let (errors, notifications) = session.settle(result).await?;

            reports.push(TaxUpdateReport {
                country: code,
                errors,
                notifications,
            });
        }
        Ok(reports)
    }

    /// Pick `codes` in the add-country dialog and return their fresh
    /// configurations
    async fn choose_countries(&self, codes: &[String]) -> Result<Vec<TaxCountryConfiguration>> {
        let session = NotificationSession::start(self.options, "Loading shop countries");
        let params = QueryParams::from([(ACTION_PARAM.to_string(), ADD_COUNTRY_DIALOG.to_string())]);
        let (view, _) = self.view(None, params, &session);
        let loaded = view
            .load()
            .await
            .context("Failed to load tax configuration");
        session.settle(loaded).await?;

        if !view.is_add_country_dialog_open() {
            anyhow::bail!("The add country dialog did not open");
        }
        let available = view.available_countries().unwrap_or_default();

        let mut countries: Vec<Country> = Vec::with_capacity(codes.len());
        for code in codes {
            let choice = available
                .iter()
                .find(|choice| choice.country.code.eq_ignore_ascii_case(code))
                .ok_or_else(|| {
                    dashboard_core::Error::from(ValidationError::invalid_parameter(
                        "country",
                        &format!("{code} is not a shop country or is already configured"),
                    ))
                })?;
            if !countries.contains(&choice.country) {
                countries.push(choice.country.clone());
            }
        }

        let added: Vec<String> = countries.iter().map(|c| c.code.clone()).collect();
        view.confirm_new_countries(countries);

        Ok(view
            .all_country_taxes()
            .into_iter()
            .filter(|configuration| added.contains(&configuration.country.code))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(
            parse_rate("Books=5.5").unwrap(),
            RateArgument {
                tax_class: "Books".to_string(),
                rate: Some(dec("5.5")),
            }
        );
        assert_eq!(parse_rate("default=23%").unwrap().rate, Some(dec("23")));
        assert_eq!(parse_rate("Books=").unwrap().rate, None);
    }

    #[test]
    fn test_parse_rate_rejects_bad_input() {
        assert!(parse_rate("Books").is_err());
        assert!(parse_rate("=5").is_err());
        assert!(parse_rate("Books=abc").is_err());
        assert!(parse_rate("Books=101").is_err());
        assert!(parse_rate("Books=-1").is_err());
    }

    #[test]
    fn test_resolve_by_name_or_id() {
        let classes = vec![TaxClass {
            id: "tc-1".to_string(),
            name: "Books".to_string(),
        }];
        let rates = resolve_rates(
            &[
                parse_rate("books=5").unwrap(),
                parse_rate("tc-1=7").unwrap(),
                parse_rate("default=20").unwrap(),
            ],
            &classes,
        )
        .unwrap();

        assert_eq!(rates[0].tax_class_id.as_deref(), Some("tc-1"));
        assert_eq!(rates[1].rate, Some(dec("7")));
        assert!(rates[2].tax_class_id.is_none());
        assert!(resolve_rates(&[parse_rate("Food=1").unwrap()], &classes).is_err());
    }

    #[test]
    fn test_merge_keeps_unmentioned_rates() {
        let books = TaxClass {
            id: "tc-1".to_string(),
            name: "Books".to_string(),
        };
        let food = TaxClass {
            id: "tc-2".to_string(),
            name: "Food".to_string(),
        };
        let configuration =
            TaxCountryConfiguration::unconfigured(Country::new("PL", "Poland"), &[books, food]);

        let merged = merge_rates(
            &configuration,
            vec![TaxClassRateInput {
                tax_class_id: Some("tc-2".to_string()),
                rate: Some(dec("8")),
            }],
        );

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].rate, None);
        assert_eq!(merged[1].rate, Some(dec("8")));
    }
}
