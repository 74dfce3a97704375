//! Response shapes for the RedPepper JSON endpoints.
//!
//! The API is a Drupal REST export. Listing rows are flat objects whose
//! values are usually strings but sometimes bare numbers; node documents wrap
//! every field in a `[{ "value": ... }]` array. Everything here is read
//! leniently and converted into the `grocer_core` models.

use grocer_core::lenient::{self, scalar_to_string};
use grocer_core::{CatalogueMetadata, CircularPage, ResolvedStore, StoreSummary};
use serde::Deserialize;
use serde_json::Value;

/// One row of the client's geo-location listing.
///
/// A store appears once per catalogue it carries; `field_version` names that
/// catalogue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoLocation {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_store_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_store_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_contact_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_zipcode: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_dma: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_version: Option<String>,
}

impl GeoLocation {
    /// Case-insensitive substring match on city or listing title.
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches_city(&self, needle: &str) -> bool {
        [&self.field_city, &self.title]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(needle))
    }

    #[must_use]
    pub fn to_summary(&self) -> StoreSummary {
        StoreSummary {
            store_id: text(self.field_store_id.as_deref()),
            store_name: text(self.field_store_name.as_deref()),
            city: text(self.field_city.as_deref()),
            state: text(self.field_state.as_deref()),
        }
    }

    #[must_use]
    pub fn to_resolved(&self, catalogue: &CatalogueMetadata) -> ResolvedStore {
        ResolvedStore {
            store_id: text(self.field_store_id.as_deref()),
            store_name: text(self.field_store_name.as_deref()),
            city: text(self.field_city.as_deref()),
            state: text(self.field_state.as_deref()),
            address: text(self.field_contact_address.as_deref()),
            zipcode: text(self.field_zipcode.as_deref()),
            phone: text(self.field_phone_number.as_deref()),
            dma: text(self.field_dma.as_deref()),
            catalogue_id: catalogue.id.clone(),
            catalogue_title: catalogue.title.clone(),
        }
    }
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

/// A `{ "value": ... }` wrapper from a Drupal node field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldItem {
    #[serde(default)]
    pub value: Value,
}

/// The catalogue node document (`/node/{id}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueNode {
    #[serde(default)]
    pub title: Option<Vec<FieldItem>>,
    #[serde(default)]
    pub field_catalogue_client_name: Option<Vec<FieldItem>>,
    #[serde(default)]
    pub field_catalogue_start_date: Option<Vec<FieldItem>>,
    #[serde(default)]
    pub field_catalogue_finish_date: Option<Vec<FieldItem>>,
    #[serde(default)]
    pub field_catalogue_pagecount: Option<Vec<FieldItem>>,
}

const UNKNOWN: &str = "Unknown";

impl CatalogueNode {
    /// Converts the node into metadata for catalogue `id`. Missing text
    /// fields become `"Unknown"` and a missing page count becomes `0`.
    #[must_use]
    pub fn into_metadata(self, id: &str) -> CatalogueMetadata {
        let field_text = |field: Option<&[FieldItem]>| {
            first_value(field)
                .and_then(scalar_to_string)
                .unwrap_or_else(|| UNKNOWN.to_owned())
        };

        let page_count = first_value(self.field_catalogue_pagecount.as_deref())
            .and_then(|v| match v {
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
                Value::String(s) => leading_int(s),
                _ => None,
            })
            .unwrap_or(0);

        CatalogueMetadata {
            id: id.to_owned(),
            title: field_text(self.title.as_deref()),
            client: field_text(self.field_catalogue_client_name.as_deref()),
            start_date: field_text(self.field_catalogue_start_date.as_deref()),
            end_date: field_text(self.field_catalogue_finish_date.as_deref()),
            page_count,
        }
    }
}

fn first_value(field: Option<&[FieldItem]>) -> Option<&Value> {
    field
        .and_then(<[FieldItem]>::first)
        .map(|item| &item.value)
        .filter(|v| !v.is_null())
}

/// One entry of the catalogue page-image listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageImage {
    #[serde(default, deserialize_with = "lenient::string")]
    pub page: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_page_image_original_width: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub field_page_image_original_height: Option<String>,
}

impl From<PageImage> for CircularPage {
    fn from(raw: PageImage) -> Self {
        Self {
            page_number: raw.page.as_deref().and_then(leading_int).unwrap_or(0),
            image_url: raw.image.unwrap_or_default().replace("\\/", "/"),
            width: raw.field_page_image_original_width.filter(|s| !s.is_empty()),
            height: raw.field_page_image_original_height.filter(|s| !s.is_empty()),
        }
    }
}

/// Parses the leading run of ASCII digits (after optional whitespace), so
/// `"12"` and `"12a"` both give `12`. `None` if there are no digits.
#[must_use]
pub fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn geo_location_accepts_numeric_fields() {
        let row: GeoLocation = serde_json::from_value(json!({
            "field_store_id": 630,
            "field_store_name": "ShopRite of Wall",
            "field_zipcode": "08736",
            "field_version": 222,
            "field_dma": null
        }))
        .expect("row should deserialize");

        assert_eq!(row.field_store_id.as_deref(), Some("630"));
        assert_eq!(row.field_version.as_deref(), Some("222"));
        assert_eq!(row.field_zipcode.as_deref(), Some("08736"));
        assert!(row.field_dma.is_none());
    }

    #[test]
    fn matches_city_checks_city_and_title() {
        let row = GeoLocation {
            title: Some("ShopRite of Manasquan".to_string()),
            field_city: Some("Wall Township".to_string()),
            ..GeoLocation::default()
        };
        assert!(row.matches_city("wall"));
        assert!(row.matches_city("manasquan"));
        assert!(!row.matches_city("hoboken"));
    }

    #[test]
    fn node_metadata_reads_wrapped_values() {
        let node: CatalogueNode = serde_json::from_value(json!({
            "title": [{ "value": "Week of 1/8" }],
            "field_catalogue_client_name": [{ "value": "ShopRite" }],
            "field_catalogue_start_date": [{ "value": "2025-01-08" }],
            "field_catalogue_finish_date": [{ "value": "2025-01-14" }],
            "field_catalogue_pagecount": [{ "value": 12 }]
        }))
        .expect("node should deserialize");

        let meta = node.into_metadata("222");
        assert_eq!(meta.id, "222");
        assert_eq!(meta.title, "Week of 1/8");
        assert_eq!(meta.client, "ShopRite");
        assert_eq!(meta.start_date, "2025-01-08");
        assert_eq!(meta.end_date, "2025-01-14");
        assert_eq!(meta.page_count, 12);
    }

    #[test]
    fn node_metadata_defaults_missing_fields() {
        let node: CatalogueNode =
            serde_json::from_value(json!({ "title": [], "field_catalogue_pagecount": null }))
                .expect("node should deserialize");

        let meta = node.into_metadata("9");
        assert_eq!(meta.title, "Unknown");
        assert_eq!(meta.client, "Unknown");
        assert_eq!(meta.start_date, "Unknown");
        assert_eq!(meta.end_date, "Unknown");
        assert_eq!(meta.page_count, 0);
    }

    #[test]
    fn string_page_count_is_parsed() {
        let node: CatalogueNode =
            serde_json::from_value(json!({ "field_catalogue_pagecount": [{ "value": "8" }] }))
                .expect("node should deserialize");
        assert_eq!(node.into_metadata("1").page_count, 8);
    }

    #[test]
    fn page_image_normalises_escaped_slashes() {
        let page: CircularPage = PageImage {
            page: Some("3".to_string()),
            image: Some("https:\\/\\/cdn.example.com\\/p3.jpg".to_string()),
            field_page_image_original_width: Some("1200".to_string()),
            field_page_image_original_height: Some(String::new()),
        }
        .into();

        assert_eq!(page.page_number, 3);
        assert_eq!(page.image_url, "https://cdn.example.com/p3.jpg");
        assert_eq!(page.width.as_deref(), Some("1200"));
        assert!(page.height.is_none());
    }

    #[test]
    fn missing_page_number_is_zero() {
        let page: CircularPage = PageImage::default().into();
        assert_eq!(page.page_number, 0);
        assert_eq!(page.image_url, "");
    }

    #[test]
    fn leading_int_parses_prefix() {
        assert_eq!(leading_int("12"), Some(12));
        assert_eq!(leading_int(" 7b"), Some(7));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
    }
}
