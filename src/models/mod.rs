//! Typed search results, products, offers and facets.

pub mod facet;
pub mod offer;
pub mod product;
pub mod result;

pub use facet::{Facet, FacetValue};
pub use offer::{Offer, StoreRecord};
pub use product::{
    CatalogPremiumProduct, CatalogStandardProduct, OffersProduct, PriceRange, Product, Stores,
    SummaryProduct, UniversalProduct,
};
pub use result::{
    AnySearchResult, CatalogPremiumSearchResult, CatalogStandardSearchResult, OffersSearchResult,
    SearchResult, SummarySearchResult, UniversalSearchResult,
};
