//! Selection and reshaping of product cards from a parsed preloaded state.

use std::collections::HashSet;

use grocer_core::lenient::scalar_to_string;
use grocer_core::DealProduct;
use serde_json::Value;

use crate::types::ProductCard;

/// Number of products returned when the caller does not ask for a limit.
pub const DEFAULT_LIMIT: usize = 20;

/// The `departments.subCategory` object, passed through to API callers as
/// `categoryInfo`.
#[must_use]
pub fn category_info(state: &Value) -> Option<&Value> {
    state
        .get("departments")
        .and_then(|d| d.get("subCategory"))
        .filter(|v| !v.is_null())
}

/// Picks the SKUs to return, in first-seen order, without duplicates.
///
/// When `subcategory` names an entry of `departments.subCategory.subCategories`
/// only that entry's SKUs are used; otherwise (no filter, or an unknown name)
/// the SKUs of every subcategory are concatenated in document order.
/// De-duplication happens before the list is cut to `limit`.
#[must_use]
pub fn collect_skus(state: &Value, subcategory: Option<&str>, limit: usize) -> Vec<String> {
    let sub_categories = category_info(state)
        .and_then(|info| info.get("subCategories"))
        .and_then(Value::as_object);

    let Some(sub_categories) = sub_categories else {
        return Vec::new();
    };

    let selected = subcategory
        .filter(|name| !name.is_empty())
        .and_then(|name| sub_categories.get(name))
        .filter(|entry| !entry.is_null());

    let raw: Vec<&Value> = match selected {
        Some(entry) => sku_array(entry).collect(),
        None => sub_categories.values().flat_map(sku_array).collect(),
    };

    let mut seen = HashSet::new();
    raw.into_iter()
        .filter_map(scalar_to_string)
        .filter(|sku| seen.insert(sku.clone()))
        .take(limit)
        .collect()
}

/// Builds the product list for a category page.
///
/// SKUs are chosen by [`collect_skus`] and joined against
/// `productCardDictionary`. SKUs whose entry is absent or empty (`null`,
/// `false`, `0`, `""`) are left out of the result and counted in a warning.
/// Any other entry is always reshaped; fields of an unexpected type come out
/// as `None`.
#[must_use]
pub fn parse_products(state: &Value, subcategory: Option<&str>, limit: usize) -> Vec<DealProduct> {
    let skus = collect_skus(state, subcategory, limit);
    let dictionary = state
        .get("productCardDictionary")
        .and_then(Value::as_object);

    let mut missing = 0usize;
    let mut products = Vec::with_capacity(skus.len());

    for sku in &skus {
        match dictionary.and_then(|d| d.get(sku)).and_then(read_card) {
            Some(card) => products.push(DealProduct::from(card)),
            None => missing += 1,
        }
    }

    if missing > 0 {
        tracing::warn!(
            requested = skus.len(),
            missing,
            "skipped SKUs without a product card"
        );
    }

    products
}

/// `None` for an empty entry. Objects are read field by field; any other
/// present value yields a card with every field unset.
fn read_card(entry: &Value) -> Option<ProductCard> {
    let empty = match entry {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_u64() == Some(0) || n.as_i64() == Some(0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    };
    if empty {
        return None;
    }
    if !entry.is_object() {
        tracing::debug!("product card is not an object; reshaping as empty");
        return Some(ProductCard::default());
    }
    Some(serde_json::from_value(entry.clone()).unwrap_or_default())
}

fn sku_array(entry: &Value) -> impl Iterator<Item = &Value> {
    entry
        .get("products")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
