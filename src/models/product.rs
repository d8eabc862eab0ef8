//! Product shapes returned by the different search endpoints.
//!
//! The endpoints return overlapping subsets of the same product record.
//! Every shape requires `mpid`; everything else defaults when absent so that
//! a richer payload (e.g. a universal response) decodes into a narrower shape.

use super::offer::{Offer, StoreRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Store id (as sent by the API, e.g. "270") to that store's record.
pub type Stores = BTreeMap<String, StoreRecord>;

/// Common access to the product identifier.
pub trait Product {
    /// Indix product id.
    fn mpid(&self) -> &str;

    fn title(&self) -> Option<&str>;
}

/// Lowest and highest price seen across stores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub currency: Option<String>,
}

/// Product from the summary endpoint: identity and aggregates only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryProduct {
    pub mpid: String,
    pub title: Option<String>,
    pub brand_id: Option<u64>,
    pub brand_name: Option<String>,
    pub category_id: Option<u64>,
    pub category_name: Option<String>,
    #[serde(default)]
    pub upcs: Vec<String>,
    #[serde(default)]
    pub mpns: Vec<String>,
    pub image_url: Option<String>,
    pub price_range: Option<PriceRange>,
    pub offers_count: Option<u64>,
    pub stores_count: Option<u64>,
    /// Epoch millis of the last crawl
    pub last_recorded_at: Option<u64>,
}

/// Product from the catalog-standard endpoint, one flat list of listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStandardProduct {
    pub mpid: String,
    pub title: Option<String>,
    pub brand_id: Option<u64>,
    pub brand_name: Option<String>,
    pub category_id: Option<u64>,
    pub category_name: Option<String>,
    #[serde(default)]
    pub upcs: Vec<String>,
    #[serde(default)]
    pub mpns: Vec<String>,
    pub image_url: Option<String>,
    pub stores_count: Option<u64>,
    #[serde(default)]
    pub offers: Vec<Offer>,
}

/// Product from the catalog-premium endpoint, listings grouped by store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPremiumProduct {
    pub mpid: String,
    pub title: Option<String>,
    pub brand_id: Option<u64>,
    pub brand_name: Option<String>,
    pub category_id: Option<u64>,
    pub category_name: Option<String>,
    #[serde(default)]
    pub upcs: Vec<String>,
    #[serde(default)]
    pub mpns: Vec<String>,
    pub image_url: Option<String>,
    /// Free-form catalog attributes (color, size, material...)
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub stores_count: Option<u64>,
    #[serde(default)]
    pub stores: Stores,
}

/// Product from the offers-standard and offers-premium endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffersProduct {
    pub mpid: String,
    pub title: Option<String>,
    pub brand_id: Option<u64>,
    pub brand_name: Option<String>,
    pub category_id: Option<u64>,
    #[serde(default)]
    pub upcs: Vec<String>,
    pub offers_count: Option<u64>,
    #[serde(default)]
    pub stores: Stores,
}

/// Product from the universal endpoint, carrying every section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalProduct {
    pub mpid: String,
    pub title: Option<String>,
    pub brand_id: Option<u64>,
    pub brand_name: Option<String>,
    pub category_id: Option<u64>,
    pub category_name: Option<String>,
    pub category_name_path: Option<String>,
    #[serde(default)]
    pub upcs: Vec<String>,
    #[serde(default)]
    pub mpns: Vec<String>,
    pub image_url: Option<String>,
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub offers_count: Option<u64>,
    pub stores_count: Option<u64>,
    pub last_recorded_at: Option<u64>,
    #[serde(default)]
    pub stores: Stores,
}

macro_rules! impl_product {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Product for $ty {
                fn mpid(&self) -> &str {
                    &self.mpid
                }

                fn title(&self) -> Option<&str> {
                    self.title.as_deref()
                }
            }
        )+
    };
}

impl_product!(
    SummaryProduct,
    CatalogStandardProduct,
    CatalogPremiumProduct,
    OffersProduct,
    UniversalProduct,
);

macro_rules! impl_store_lookup {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Returns the record for a store id such as "270".
                pub fn store(&self, store_id: &str) -> Option<&StoreRecord> {
                    self.stores.get(store_id)
                }

                /// Iterates over every offer across all stores.
                pub fn all_offers(&self) -> impl Iterator<Item = &Offer> {
                    self.stores.values().flat_map(|s| s.offers.iter())
                }
            }
        )+
    };
}

impl_store_lookup!(CatalogPremiumProduct, OffersProduct, UniversalProduct);
