//! GraphQL operation documents

pub const PRODUCT_DETAILS: &str = r#"
query ProductDetails($id: ID!) {
  product(id: $id) {
    id
    name
    slug
    description
    seoTitle
    seoDescription
    rating
    chargeTaxes
    category { id }
    collections { id }
    attributes {
      attribute { id slug inputType }
      values { id name slug file { url contentType } }
    }
    variants {
      id
      name
      sku
      trackInventory
      stocks { warehouse { id } quantity }
    }
    channelListings {
      channel { id }
      isPublished
      publicationDate
      isAvailableForPurchase
      availableForPurchase
      visibleInListings
    }
    metadata { key value }
    privateMetadata { key value }
  }
}"#;

pub const FILE_UPLOAD: &str = r#"
mutation FileUpload($file: Upload!) {
  fileUpload(file: $file) {
    uploadedFile { url contentType }
    errors { code field message }
  }
}"#;

pub const ATTRIBUTE_VALUE_DELETE: &str = r#"
mutation AttributeValueDelete($id: ID!) {
  attributeValueDelete(id: $id) {
    errors { code field message }
  }
}"#;

pub const PRODUCT_UPDATE: &str = r#"
mutation ProductUpdate($id: ID!, $input: ProductInput!) {
  productUpdate(id: $id, input: $input) {
    errors { attributes code field message }
  }
}"#;

pub const VARIANT_STOCKS_UPDATE: &str = r#"
mutation VariantStocksUpdate($id: ID!, $stocks: [StockInput!]!, $removeStocks: [ID!]!) {
  productVariantStocksDelete(variantId: $id, warehouseIds: $removeStocks) {
    errors { code field message }
  }
  productVariantStocksUpdate(variantId: $id, stocks: $stocks) {
    errors { code field message index }
  }
}"#;

pub const VARIANT_UPDATE: &str = r#"
mutation VariantUpdate($id: ID!, $input: ProductVariantInput!) {
  productVariantUpdate(id: $id, input: $input) {
    errors { attributes code field message }
  }
}"#;

pub const PRODUCT_CHANNEL_LISTING_UPDATE: &str = r#"
mutation ProductChannelListingUpdate($id: ID!, $input: ProductChannelListingUpdateInput!) {
  productChannelListingUpdate(id: $id, input: $input) {
    errors { code field message channels }
  }
}"#;

pub const UPDATE_METADATA: &str = r#"
mutation UpdateMetadata($id: ID!, $input: [MetadataInput!]!, $keysToDelete: [String!]!) {
  updateMetadata(id: $id, input: $input) {
    errors { code field message }
  }
  deleteMetadata(id: $id, keys: $keysToDelete) {
    errors { code field message }
  }
}"#;

pub const UPDATE_PRIVATE_METADATA: &str = r#"
mutation UpdatePrivateMetadata($id: ID!, $input: [MetadataInput!]!, $keysToDelete: [String!]!) {
  updatePrivateMetadata(id: $id, input: $input) {
    errors { code field message }
  }
  deletePrivateMetadata(id: $id, keys: $keysToDelete) {
    errors { code field message }
  }
}"#;

pub const TAX_COUNTRIES_LIST: &str = r#"
query TaxCountriesList {
  taxCountryConfigurations {
    country { code country }
    taxClassCountryRates {
      rate
      taxClass { id name }
    }
  }
}"#;

pub const TAX_CLASSES_LIST: &str = r#"
query TaxClassesList($first: Int) {
  taxClasses(first: $first) {
    edges { node { id name } }
  }
}"#;

pub const SHOP_COUNTRIES: &str = r#"
query ShopCountries {
  shop {
    countries { code country }
  }
}"#;

pub const TAX_COUNTRY_CONFIGURATION_UPDATE: &str = r#"
mutation TaxCountryConfigurationUpdate($countryCode: CountryCode!, $updateTaxClassRates: [TaxClassRateInput!]!) {
  taxCountryConfigurationUpdate(countryCode: $countryCode, updateTaxClassRates: $updateTaxClassRates) {
    errors { field code message }
  }
}"#;

pub const TRANSACTION_REQUEST_ACTION: &str = r#"
mutation TransactionRequestAction($id: ID!, $action: TransactionActionEnum!, $amount: PositiveDecimal) {
  transactionRequestAction(id: $id, actionType: $action, amount: $amount) {
    errors { field code message }
  }
}"#;
