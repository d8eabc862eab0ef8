//! Search endpoint variants and their paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The product search endpoints exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Endpoint {
    Universal,
    OffersStandard,
    OffersPremium,
    CatalogStandard,
    CatalogPremium,
    Summary,
}

impl Endpoint {
    /// Returns the API name of this endpoint, as used in its path.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Universal => "universal",
            Endpoint::OffersStandard => "offersStandard",
            Endpoint::OffersPremium => "offersPremium",
            Endpoint::CatalogStandard => "catalogStandard",
            Endpoint::CatalogPremium => "catalogPremium",
            Endpoint::Summary => "summary",
        }
    }

    /// Returns the request path, relative to the API base URL.
    pub fn path(&self) -> String {
        format!("/v2/{}/products", self.name())
    }

    /// Returns all search endpoints.
    pub fn all() -> &'static [Endpoint] {
        &[
            Endpoint::Universal,
            Endpoint::OffersStandard,
            Endpoint::OffersPremium,
            Endpoint::CatalogStandard,
            Endpoint::CatalogPremium,
            Endpoint::Summary,
        ]
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String =
            s.chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();

        Endpoint::all()
            .iter()
            .find(|e| e.name().to_lowercase() == normalized)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown endpoint: {}. Use: universal, offers-standard, offers-premium, \
                     catalog-standard, catalog-premium, summary",
                    s
                )
            })
    }
}
