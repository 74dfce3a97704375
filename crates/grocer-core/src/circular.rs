//! Domain types for weekly circulars (catalogues) and the stores that carry them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which family of circular to select for a store.
///
/// A store is usually associated with several live catalogues at once: the
/// main weekly ad plus specialty circulars. Matching is done on the
/// catalogue title, case-insensitively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogueType {
    /// Main weekly ad; titles start with `"Week of"`.
    #[default]
    Weekly,
    Wellness,
    Hispanic,
    /// No title filter.
    All,
}

impl CatalogueType {
    /// Returns `true` if a catalogue with this title belongs to this type.
    #[must_use]
    pub fn matches_title(self, title: &str) -> bool {
        let lower = title.to_lowercase();
        match self {
            CatalogueType::Weekly => lower.starts_with("week of"),
            CatalogueType::Wellness => lower.contains("wellness"),
            CatalogueType::Hispanic => lower.contains("hispanic"),
            CatalogueType::All => true,
        }
    }
}

impl std::fmt::Display for CatalogueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogueType::Weekly => write!(f, "weekly"),
            CatalogueType::Wellness => write!(f, "wellness"),
            CatalogueType::Hispanic => write!(f, "hispanic"),
            CatalogueType::All => write!(f, "all"),
        }
    }
}

impl FromStr for CatalogueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(CatalogueType::Weekly),
            "wellness" => Ok(CatalogueType::Wellness),
            "hispanic" => Ok(CatalogueType::Hispanic),
            "all" => Ok(CatalogueType::All),
            other => Err(format!(
                "unknown circular type \"{other}\"; expected weekly, wellness, hispanic, or all"
            )),
        }
    }
}

/// One entry of the de-duplicated store list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store_id: String,
    pub store_name: String,
    pub city: String,
    pub state: String,
}

/// A store together with the catalogue chosen for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedStore {
    pub store_id: String,
    pub store_name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub zipcode: String,
    pub phone: String,
    /// Designated market area the store reports into.
    pub dma: String,
    pub catalogue_id: String,
    pub catalogue_title: String,
}

/// Descriptive metadata for one catalogue.
///
/// Text fields default to `"Unknown"` and `page_count` to `0` when the
/// upstream node omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueMetadata {
    pub id: String,
    pub title: String,
    pub client: String,
    pub start_date: String,
    pub end_date: String,
    pub page_count: u32,
}

/// A single page image of a circular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircularPage {
    pub page_number: u32,
    pub image_url: String,
    /// Original pixel width as reported upstream, if any.
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Everything known about a store's current circular.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circular {
    pub store: ResolvedStore,
    pub metadata: Option<CatalogueMetadata>,
    /// Ascending by `page_number`.
    pub pages: Vec<CircularPage>,
}

impl Circular {
    /// Image URL of the first page, if the circular has any pages.
    #[must_use]
    pub fn first_page_url(&self) -> Option<&str> {
        self.pages.first().map(|p| p.image_url.as_str())
    }
}
