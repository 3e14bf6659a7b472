//! Routes of the taxes section

use crate::navigation::{QueryParams, url_with_params};
use std::fmt;
use std::str::FromStr;

pub const TAXES_SECTION: &str = "/taxes";

/// Dialog that adds countries to the tax configuration
pub const ADD_COUNTRY_DIALOG: &str = "add-country";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxTab {
    Channels,
    Countries,
    TaxClasses,
}

impl TaxTab {
    fn segment(&self) -> &'static str {
        match self {
            Self::Channels => "channels",
            Self::Countries => "countries",
            Self::TaxClasses => "tax-classes",
        }
    }
}

impl fmt::Display for TaxTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for TaxTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channels" => Ok(Self::Channels),
            "countries" => Ok(Self::Countries),
            "tax-classes" => Ok(Self::TaxClasses),
            other => Err(format!("unknown tax tab '{other}'")),
        }
    }
}

pub fn tax_tab_path(tab: TaxTab) -> String {
    format!("{TAXES_SECTION}/{}", tab.segment())
}

/// Country list URL, optionally with a selected country
pub fn tax_countries_list_url(id: Option<&str>, params: &QueryParams) -> String {
    let path = match id {
        Some(id) => format!("{}/{}", tax_tab_path(TaxTab::Countries), id),
        None => format!("{}/", tax_tab_path(TaxTab::Countries)),
    };
    url_with_params(&path, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_paths() {
        assert_eq!(tax_tab_path(TaxTab::Channels), "/taxes/channels");
        assert_eq!(tax_tab_path(TaxTab::Countries), "/taxes/countries");
        assert_eq!(tax_tab_path(TaxTab::TaxClasses), "/taxes/tax-classes");
    }

    #[test]
    fn test_countries_list_url() {
        let mut params = QueryParams::new();
        assert_eq!(tax_countries_list_url(None, &params), "/taxes/countries/");

        params.insert("action".to_string(), ADD_COUNTRY_DIALOG.to_string());
        assert_eq!(
            tax_countries_list_url(Some("PL"), &params),
            "/taxes/countries/PL?action=add-country"
        );
    }

    #[test]
    fn test_tab_parses_from_segment() {
        assert_eq!("tax-classes".parse::<TaxTab>(), Ok(TaxTab::TaxClasses));
        assert!("vat".parse::<TaxTab>().is_err());
    }
}
