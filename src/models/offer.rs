//! Offers and the per-store records that group them.

use serde::{Deserialize, Serialize};

/// A single seller listing for a product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Brand as printed by the store
    pub brand_text: Option<String>,
    /// Store category trail, e.g. "Shoes > Running"
    pub bread_crumbs: Option<String>,
    /// Listing title at the store
    pub title: Option<String>,
    /// Category as printed by the store
    pub category_text: Option<String>,
    /// Current price
    pub sale_price: Option<f64>,
    /// Price before discount
    pub list_price: Option<f64>,
    pub currency: Option<String>,
    /// Stock status, e.g. "IN_STOCK"
    pub availability: Option<String>,
    pub seller: Option<String>,
    pub sku: Option<String>,
    pub url: Option<String>,
}

impl Offer {
    /// Returns true if the store reports the offer as in stock.
    pub fn is_in_stock(&self) -> bool {
        self.availability.as_deref().is_some_and(|a| a.eq_ignore_ascii_case("IN_STOCK"))
    }

    /// Returns discount percentage if on sale.
    pub fn discount_percent(&self) -> Option<u8> {
        match (self.sale_price, self.list_price) {
            (Some(sale), Some(list)) if list > 0.0 && sale < list => {
                let discount = ((list - sale) / list * 100.0).round() as u8;
                Some(discount.min(99))
            }
            _ => None,
        }
    }
}

/// Everything a product has at one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRecord {
    pub store_id: Option<u64>,
    pub store_name: Option<String>,
    /// Offers in the order the API returned them
    #[serde(default)]
    pub offers: Vec<Offer>,
}

impl StoreRecord {
    /// Returns the lowest-priced offer at this store.
    pub fn cheapest_offer(&self) -> Option<&Offer> {
        self.offers.iter().filter(|o| o.sale_price.is_some()).min_by(|a, b| {
            a.sale_price.partial_cmp(&b.sale_price).unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
