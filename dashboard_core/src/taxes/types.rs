//! Tax configuration types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    #[serde(alias = "country")]
    pub name: String,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxClass {
    pub id: String,
    pub name: String,
}

/// Rate of one tax class in one country; `rate: None` means not set yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxClassCountryRate {
    #[serde(default)]
    pub tax_class: Option<TaxClass>,
    #[serde(default)]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxCountryConfiguration {
    pub country: Country,
    #[serde(default)]
    pub tax_class_country_rates: Vec<TaxClassCountryRate>,
}

impl TaxCountryConfiguration {
    /// A fresh configuration with one unset rate per tax class
    pub fn unconfigured(country: Country, tax_classes: &[TaxClass]) -> Self {
        Self {
            country,
            tax_class_country_rates: tax_classes
                .iter()
                .map(|tax_class| TaxClassCountryRate {
                    tax_class: Some(tax_class.clone()),
                    rate: None,
                })
                .collect(),
        }
    }
}

/// One rate to write; a missing tax class sets the country's default rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxClassRateInput {
    #[serde(default)]
    pub tax_class_id: Option<String>,
    #[serde(default)]
    pub rate: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfigurationError {
    #[serde(default)]
    pub field: Option<String>,
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// A country offered in the "add country" dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryChoice {
    #[serde(flatten)]
    pub country: Country,
    pub checked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_configuration_deserializes() {
        let json = r#"{
            "country": {"code": "PL", "country": "Poland"},
            "taxClassCountryRates": [
                {"taxClass": {"id": "VGF4Q2xhc3M6MQ==", "name": "Books"}, "rate": 5},
                {"taxClass": null, "rate": 23.0}
            ]
        }"#;

        let configuration: TaxCountryConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(configuration.country.name, "Poland");
        assert_eq!(configuration.tax_class_country_rates.len(), 2);
        assert_eq!(
            configuration.tax_class_country_rates[1].rate,
            Some(Decimal::from_str("23").unwrap())
        );
        assert!(configuration.tax_class_country_rates[1].tax_class.is_none());
    }

    #[test]
    fn test_unconfigured_has_one_unset_rate_per_class() {
        let classes = vec![
            TaxClass {
                id: "1".to_string(),
                name: "Books".to_string(),
            },
            TaxClass {
                id: "2".to_string(),
                name: "Food".to_string(),
            },
        ];

        let configuration = TaxCountryConfiguration::unconfigured(Country::new("DE", "Germany"), &classes);
        assert_eq!(configuration.tax_class_country_rates.len(), 2);
        assert!(configuration
            .tax_class_country_rates
            .iter()
            .all(|rate| rate.rate.is_none() && rate.tax_class.is_some()));
    }
}
