//! Tax configuration

pub mod api;
pub mod countries;
pub mod types;
pub mod urls;

pub use api::{TAX_CLASSES_PAGE_SIZE, TaxApi};
pub use countries::CountriesListView;
pub use types::{
    Country, CountryChoice, TaxClass, TaxClassCountryRate, TaxClassRateInput,
    TaxConfigurationError, TaxCountryConfiguration,
};
pub use urls::{ADD_COUNTRY_DIALOG, TaxTab, tax_countries_list_url, tax_tab_path};
