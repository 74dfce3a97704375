use serde::{Deserialize, Serialize};

/// A product card reshaped from a ShopRite category page for the deals API.
///
/// Field names serialize in camelCase to match the public response shape.
/// Every field is optional because the upstream dictionary is loosely shaped;
/// absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealProduct {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    /// Display price exactly as ShopRite renders it, e.g. `"$5.99"`.
    pub price: Option<String>,
    /// Per-unit price label, e.g. `"$0.37/oz"`.
    pub unit_price: Option<String>,
    /// Price before the current promotion, if any.
    pub was_price: Option<String>,
    pub price_label: Option<String>,
    pub is_discounted: Option<bool>,
    /// Thumbnail image URL (`image.cell`, falling back to `image.default`).
    pub image: Option<String>,
    pub image_zoom: Option<String>,
    pub available: Option<bool>,
    /// Unit the product is sold by, e.g. `"each"` or `"weight"`.
    pub sell_by: Option<String>,
    pub category: Option<String>,
}
