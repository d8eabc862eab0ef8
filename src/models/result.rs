//! Search result containers.

use super::facet::{deserialize_facets, Facet};
use super::product::{
    CatalogPremiumProduct, CatalogStandardProduct, OffersProduct, Product, SummaryProduct,
    UniversalProduct,
};
use crate::api::Endpoint;
use serde::{Deserialize, Serialize};

/// One page of search results.
///
/// `count` is the total number of matches, not the length of `products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<P> {
    pub count: u64,
    #[serde(default, deserialize_with = "deserialize_facets")]
    pub facets: Vec<Facet>,
    #[serde(default = "Vec::new")]
    pub products: Vec<P>,
}

pub type UniversalSearchResult = SearchResult<UniversalProduct>;
/// Shared by the offers-standard and offers-premium endpoints.
pub type OffersSearchResult = SearchResult<OffersProduct>;
pub type CatalogStandardSearchResult = SearchResult<CatalogStandardProduct>;
pub type CatalogPremiumSearchResult = SearchResult<CatalogPremiumProduct>;
pub type SummarySearchResult = SearchResult<SummaryProduct>;

impl<P> SearchResult<P> {
    /// Returns number of products on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns a facet by name.
    pub fn facet(&self, name: &str) -> Option<&Facet> {
        self.facets.iter().find(|f| f.name == name)
    }
}

impl<P: Product> SearchResult<P> {
    /// Product ids in response order.
    pub fn mpids(&self) -> Vec<&str> {
        self.products.iter().map(Product::mpid).collect()
    }

    /// Finds a product on this page by id.
    pub fn find(&self, mpid: &str) -> Option<&P> {
        self.products.iter().find(|p| p.mpid() == mpid)
    }
}

/// A decoded result tagged with the endpoint that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "endpoint", content = "result", rename_all = "camelCase")]
pub enum AnySearchResult {
    Universal(UniversalSearchResult),
    OffersStandard(OffersSearchResult),
    OffersPremium(OffersSearchResult),
    CatalogStandard(CatalogStandardSearchResult),
    CatalogPremium(CatalogPremiumSearchResult),
    Summary(SummarySearchResult),
}

/// Applies the same expression to whichever result the enum holds.
macro_rules! each_variant {
    ($value:expr, $r:ident => $body:expr) => {
        match $value {
            AnySearchResult::Universal($r) => $body,
            AnySearchResult::OffersStandard($r) => $body,
            AnySearchResult::OffersPremium($r) => $body,
            AnySearchResult::CatalogStandard($r) => $body,
            AnySearchResult::CatalogPremium($r) => $body,
            AnySearchResult::Summary($r) => $body,
        }
    };
}

impl AnySearchResult {
    /// Returns the endpoint this result came from.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            AnySearchResult::Universal(_) => Endpoint::Universal,
            AnySearchResult::OffersStandard(_) => Endpoint::OffersStandard,
            AnySearchResult::OffersPremium(_) => Endpoint::OffersPremium,
            AnySearchResult::CatalogStandard(_) => Endpoint::CatalogStandard,
            AnySearchResult::CatalogPremium(_) => Endpoint::CatalogPremium,
            AnySearchResult::Summary(_) => Endpoint::Summary,
        }
    }

    pub fn count(&self) -> u64 {
        each_variant!(self, r => r.count)
    }

    pub fn facets(&self) -> &[Facet] {
        each_variant!(self, r => r.facets.as_slice())
    }

    pub fn len(&self) -> usize {
        each_variant!(self, r => r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn mpids(&self) -> Vec<&str> {
        each_variant!(self, r => r.mpids())
    }

    pub fn as_universal(&self) -> Option<&UniversalSearchResult> {
        match self {
            AnySearchResult::Universal(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_offers(&self) -> Option<&OffersSearchResult> {
        match self {
            AnySearchResult::OffersStandard(r) | AnySearchResult::OffersPremium(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_catalog_standard(&self) -> Option<&CatalogStandardSearchResult> {
        match self {
            AnySearchResult::CatalogStandard(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_catalog_premium(&self) -> Option<&CatalogPremiumSearchResult> {
        match self {
            AnySearchResult::CatalogPremium(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SummarySearchResult> {
        match self {
            AnySearchResult::Summary(r) => Some(r),
            _ => None,
        }
    }
}
