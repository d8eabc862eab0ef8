//! Search refinement facets.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A refinement dimension (store, brand, category...) with its buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<FacetValue>,
}

/// One bucket of a facet and how many products fall into it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    /// Bucket id; numeric for stores/brands/categories, text otherwise
    pub id: Option<serde_json::Value>,
    pub name: Option<String>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FacetsRepr {
    List(Vec<Facet>),
    Keyed(BTreeMap<String, Vec<FacetValue>>),
}

/// Accepts facets as a list of `{name, values}`, as an object keyed by
/// facet name, or as `null`.
pub(crate) fn deserialize_facets<'de, D>(deserializer: D) -> Result<Vec<Facet>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<FacetsRepr>::deserialize(deserializer)?;
    Ok(match repr {
        None => Vec::new(),
        Some(FacetsRepr::List(facets)) => facets,
        Some(FacetsRepr::Keyed(map)) => {
            map.into_iter().map(|(name, values)| Facet { name, values }).collect()
        }
    })
}
