//! Search query construction and validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest page the API serves in one response.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Reasons a [`QueryBuilder`] refuses to produce a [`Query`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("search keyword (q) is required")]
    MissingKeyword,

    #[error("country code is required")]
    MissingCountryCode,

    #[error("country code must be two ASCII letters, got {0:?}")]
    InvalidCountryCode(String),

    #[error("{field} must be non-negative, got {value}")]
    NegativeId { field: &'static str, value: i64 },

    #[error("page number must start at 1")]
    InvalidPageNumber,

    #[error("page size must be between 1 and 50, got {0}")]
    InvalidPageSize(u32),

    #[error("invalid price range: {0}")]
    InvalidPriceRange(String),
}

/// Stock filter accepted by the search endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    /// Returns the value sent on the wire.
    pub fn as_param(&self) -> &'static str {
        match self {
            Availability::InStock => "IN_STOCK",
            Availability::OutOfStock => "OUT_OF_STOCK",
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    #[default]
    Relevance,
    PriceLowToHigh,
    PriceHighToLow,
    MostRecent,
}

impl SortBy {
    /// Returns the value sent on the wire.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortBy::Relevance => "RELEVANCE",
            SortBy::PriceLowToHigh => "PRICE_LOW_TO_HIGH",
            SortBy::PriceHighToLow => "PRICE_HIGH_TO_LOW",
            SortBy::MostRecent => "MOST_RECENT",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "RELEVANCE" => Ok(SortBy::Relevance),
            "PRICE_LOW_TO_HIGH" => Ok(SortBy::PriceLowToHigh),
            "PRICE_HIGH_TO_LOW" => Ok(SortBy::PriceHighToLow),
            "MOST_RECENT" => Ok(SortBy::MostRecent),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

/// A validated, immutable search query.
///
/// Built through [`Query::builder`]; once built it can be reused across any
/// number of client calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    q: String,
    country_code: String,
    stores_count: Option<u32>,
    store_ids: Vec<u64>,
    brand_ids: Vec<u64>,
    category_ids: Vec<u64>,
    start_price: Option<f64>,
    end_price: Option<f64>,
    availability: Option<Availability>,
    sort_by: Option<SortBy>,
    facet_by: Vec<String>,
    page_number: Option<u32>,
    page_size: Option<u32>,
}

impl Query {
    /// Starts a new query builder.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    pub fn q(&self) -> &str {
        &self.q
    }

    /// Upper-cased ISO country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn stores_count(&self) -> Option<u32> {
        self.stores_count
    }

    pub fn store_ids(&self) -> &[u64] {
        &self.store_ids
    }

    pub fn brand_ids(&self) -> &[u64] {
        &self.brand_ids
    }

    pub fn category_ids(&self) -> &[u64] {
        &self.category_ids
    }

    pub fn availability(&self) -> Option<Availability> {
        self.availability
    }

    pub fn sort_by(&self) -> Option<SortBy> {
        self.sort_by
    }

    pub fn page_number(&self) -> Option<u32> {
        self.page_number
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    /// Serializes the query into API parameters, in a stable order.
    ///
    /// List filters repeat their parameter name once per value. Unset
    /// options are omitted.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("q", self.q.clone()), ("countryCode", self.country_code.clone())];

        if let Some(count) = self.stores_count {
            params.push(("storesCount", count.to_string()));
        }
        params.extend(self.store_ids.iter().map(|id| ("storeId", id.to_string())));
        params.extend(self.brand_ids.iter().map(|id| ("brandId", id.to_string())));
        params.extend(self.category_ids.iter().map(|id| ("categoryId", id.to_string())));

        if let Some(price) = self.start_price {
            params.push(("startPrice", price.to_string()));
        }
        if let Some(price) = self.end_price {
            params.push(("endPrice", price.to_string()));
        }
        if let Some(availability) = self.availability {
            params.push(("availability", availability.as_param().to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            params.push(("sortBy", sort_by.as_param().to_string()));
        }
        params.extend(self.facet_by.iter().map(|facet| ("facetBy", facet.clone())));

        if let Some(page) = self.page_number {
            params.push(("pageNumber", page.to_string()));
        }
        if let Some(size) = self.page_size {
            params.push(("pageSize", size.to_string()));
        }

        params
    }
}

/// Chainable builder for [`Query`]. Validation happens in [`QueryBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    q: Option<String>,
    country_code: Option<String>,
    stores_count: Option<u32>,
    store_ids: Vec<i64>,
    brand_ids: Vec<i64>,
    category_ids: Vec<i64>,
    start_price: Option<f64>,
    end_price: Option<f64>,
    availability: Option<Availability>,
    sort_by: Option<SortBy>,
    facet_by: Vec<String>,
    page_number: Option<u32>,
    page_size: Option<u32>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search keyword.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Sets the country code (e.g. "US").
    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = Some(code.into());
        self
    }

    /// Limits how many stores are returned per product.
    pub fn stores_count(mut self, count: u32) -> Self {
        self.stores_count = Some(count);
        self
    }

    /// Restricts results to the given store ids.
    pub fn store_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.store_ids = ids.into_iter().collect();
        self
    }

    /// Restricts results to the given brand ids.
    pub fn brand_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.brand_ids = ids.into_iter().collect();
        self
    }

    /// Restricts results to the given category ids.
    pub fn category_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    /// Filters on sale price. Either bound may be open.
    pub fn price_range(mut self, start: Option<f64>, end: Option<f64>) -> Self {
        self.start_price = start;
        self.end_price = end;
        self
    }

    pub fn availability(mut self, availability: Availability) -> Self {
        self.availability = Some(availability);
        self
    }

    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Requests facet counts for the named facets.
    pub fn facet_by<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facet_by = facets.into_iter().map(Into::into).collect();
        self
    }

    /// Selects a 1-based result page.
    pub fn page_number(mut self, page: u32) -> Self {
        self.page_number = Some(page);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Validates the accumulated parameters and freezes them into a [`Query`].
    pub fn build(self) -> Result<Query, QueryError> {
        let q = match self.q {
            Some(q) if !q.trim().is_empty() => q.trim().to_string(),
            _ => return Err(QueryError::MissingKeyword),
        };

        let country_code = match self.country_code {
            Some(code) if !code.trim().is_empty() => normalize_country_code(&code)?,
            _ => return Err(QueryError::MissingCountryCode),
        };

        if self.page_number == Some(0) {
            return Err(QueryError::InvalidPageNumber);
        }
        if let Some(size) = self.page_size {
            if size == 0 || size > MAX_PAGE_SIZE {
                return Err(QueryError::InvalidPageSize(size));
            }
        }

        validate_price_range(self.start_price, self.end_price)?;

        Ok(Query {
            q,
            country_code,
            stores_count: self.stores_count,
            store_ids: non_negative("storeId", self.store_ids)?,
            brand_ids: non_negative("brandId", self.brand_ids)?,
            category_ids: non_negative("categoryId", self.category_ids)?,
            start_price: self.start_price,
            end_price: self.end_price,
            availability: self.availability,
            sort_by: self.sort_by,
            facet_by: self.facet_by.into_iter().filter(|f| !f.trim().is_empty()).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
        })
    }
}

fn normalize_country_code(code: &str) -> Result<String, QueryError> {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(QueryError::InvalidCountryCode(code.to_string()));
    }
    Ok(code.to_ascii_uppercase())
}

fn non_negative(field: &'static str, ids: Vec<i64>) -> Result<Vec<u64>, QueryError> {
    ids.into_iter()
        .map(|id| u64::try_from(id).map_err(|_| QueryError::NegativeId { field, value: id }))
        .collect()
}

fn validate_price_range(start: Option<f64>, end: Option<f64>) -> Result<(), QueryError> {
    for price in [start, end].into_iter().flatten() {
        if !price.is_finite() || price < 0.0 {
            return Err(QueryError::InvalidPriceRange(format!(
                "price must be a non-negative number, got {}",
                price
            )));
        }
    }
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(QueryError::InvalidPriceRange(format!(
                "start price {} is above end price {}",
                start, end
            )));
        }
    }
    Ok(())
}
