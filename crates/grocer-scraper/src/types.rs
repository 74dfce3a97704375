//! Product card types from ShopRite's `productCardDictionary`.
//!
//! ## Observed shape
//!
//! The dictionary maps a SKU string to a product card. Price fields are
//! preformatted display strings (`"$5.99"`, `"$0.37/oz"`) but occasionally
//! arrive as bare numbers, so every field is read leniently: strings pass
//! through, numbers are stringified, and a value of the wrong type becomes
//! `None` instead of failing the card.
//!
//! `image` carries several renditions; `cell` is the grid thumbnail and is
//! missing on some cards, in which case `default` is used.
//!
//! `defaultCategory` is an array whose first element names the card's
//! category; older cards use a flat `category` string instead.

use grocer_core::DealProduct;
use grocer_core::lenient;
use serde::Deserialize;

/// A single entry from `productCardDictionary`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    #[serde(default, deserialize_with = "lenient::string")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub unit_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub was_price: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub price_label: Option<String>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub is_discounted: Option<bool>,
    #[serde(default, deserialize_with = "lenient::nested")]
    pub image: Option<ProductImages>,
    #[serde(default, deserialize_with = "lenient::boolean")]
    pub available: Option<bool>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub sell_by: Option<String>,
    #[serde(default, deserialize_with = "lenient::nested")]
    pub default_category: Option<Vec<CategoryRef>>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
}

/// Image renditions for a product card.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductImages {
    #[serde(default, deserialize_with = "lenient::string")]
    pub cell: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub default: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub zoom: Option<String>,
}

/// One element of a card's `defaultCategory` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryRef {
    #[serde(default, deserialize_with = "lenient::string")]
    pub category: Option<String>,
}

impl From<ProductCard> for DealProduct {
    fn from(card: ProductCard) -> Self {
        let (image, image_zoom) = match card.image {
            Some(images) => (
                non_empty(images.cell).or_else(|| non_empty(images.default)),
                images.zoom,
            ),
            None => (None, None),
        };

        let category = card
            .default_category
            .and_then(|cats| cats.into_iter().next())
            .and_then(|c| non_empty(c.category))
            .or_else(|| non_empty(card.category));

        DealProduct {
            sku: card.sku,
            name: card.name,
            description: card.description,
            brand: card.brand,
            price: card.price,
            unit_price: card.unit_price,
            was_price: card.was_price,
            price_label: card.price_label,
            is_discounted: card.is_discounted,
            image,
            image_zoom,
            available: card.available,
            sell_by: card.sell_by,
            category,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
