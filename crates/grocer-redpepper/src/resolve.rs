//! Store and catalogue resolution on top of [`RedPepperClient`].
//!
//! A store carries several catalogues at once (the weekly circular plus
//! specialty ones). Resolution picks the newest catalogue of the requested
//! [`CatalogueType`] by comparing catalogue ids numerically.

use std::cmp::Reverse;
use std::collections::HashSet;

use futures::future::join_all;
use grocer_core::{CatalogueMetadata, CatalogueType, Circular, ResolvedStore, StoreSummary};

use crate::client::RedPepperClient;
use crate::error::RedPepperError;
use crate::types::GeoLocation;

/// Outcome of a city search.
#[derive(Debug, Clone)]
pub struct CityResolution {
    /// Every distinct store whose city or listing title matched, in listing
    /// order. The first one is the store that was resolved.
    pub matches: Vec<StoreSummary>,
    pub store: ResolvedStore,
}

/// Resolves `store_id` to its newest catalogue of type `catalogue_type`.
///
/// # Errors
///
/// - Any client error from fetching the store listing.
/// - [`RedPepperError::StoreNotFound`] if no listing row has `store_id`.
/// - [`RedPepperError::NoMatchingCatalogue`] if no catalogue of the store
///   both loaded and matched the type.
pub async fn find_store_and_catalogue(
    client: &RedPepperClient,
    store_id: &str,
    catalogue_type: CatalogueType,
) -> Result<ResolvedStore, RedPepperError> {
    let locations = client.get_store_locations().await?;
    resolve_in_listing(client, &locations, store_id, catalogue_type).await
}

/// Resolves the first store whose city or listing title contains `city`
/// (trimmed, case-insensitive). The listing is fetched once.
///
/// # Errors
///
/// - Any client error from fetching the store listing.
/// - [`RedPepperError::NoCityMatch`] if nothing matched.
/// - The errors of [`find_store_and_catalogue`] for the first match.
pub async fn find_store_by_city(
    client: &RedPepperClient,
    city: &str,
    catalogue_type: CatalogueType,
) -> Result<CityResolution, RedPepperError> {
    let locations = client.get_store_locations().await?;
    let needle = city.trim().to_lowercase();

    let matching = locations.iter().filter(|row| row.matches_city(&needle));
    let matches = distinct_stores(matching);

    let Some(first) = matches.first() else {
        tracing::warn!(city, "no stores matched city search");
        return Err(RedPepperError::NoCityMatch {
            city: city.to_owned(),
        });
    };

    if matches.len() > 1 {
        tracing::info!(
            city,
            matches = matches.len(),
            store_id = %first.store_id,
            "multiple stores matched; using the first"
        );
    }

    let store = resolve_in_listing(client, &locations, &first.store_id, catalogue_type).await?;
    Ok(CityResolution { matches, store })
}

/// One summary per distinct store id, sorted by store name.
///
/// # Errors
///
/// Any client error from fetching the store listing.
pub async fn list_all_stores(client: &RedPepperClient) -> Result<Vec<StoreSummary>, RedPepperError> {
    let locations = client.get_store_locations().await?;
    let mut stores = distinct_stores(locations.iter());
    stores.sort_by(|a, b| {
        a.store_name
            .to_lowercase()
            .cmp(&b.store_name.to_lowercase())
            .then_with(|| a.store_name.cmp(&b.store_name))
    });
    Ok(stores)
}

/// Fetches metadata and pages for a resolved store's catalogue concurrently.
///
/// A metadata failure is logged and leaves `metadata` empty.
///
/// # Errors
///
/// Any client error from fetching the page list.
pub async fn fetch_circular(
    client: &RedPepperClient,
    store: ResolvedStore,
) -> Result<Circular, RedPepperError> {
    let (metadata, pages) = tokio::join!(
        client.get_catalogue_metadata(&store.catalogue_id),
        client.get_circular_pages(&store.catalogue_id),
    );

    let metadata = match metadata {
        Ok(meta) => Some(meta),
        Err(e) => {
            tracing::warn!(catalogue_id = %store.catalogue_id, error = %e, "catalogue metadata unavailable");
            None
        }
    };

    Ok(Circular {
        store,
        metadata,
        pages: pages?,
    })
}

/// Resolves `store_id` and fetches its circular.
///
/// # Errors
///
/// The errors of [`find_store_and_catalogue`] and [`fetch_circular`].
pub async fn get_circular_for_store(
    client: &RedPepperClient,
    store_id: &str,
    catalogue_type: CatalogueType,
) -> Result<Circular, RedPepperError> {
    let store = find_store_and_catalogue(client, store_id, catalogue_type).await?;
    fetch_circular(client, store).await
}

/// Image URL of the first page of the store's current weekly circular, or
/// `None` if the circular has no pages.
///
/// # Errors
///
/// The errors of [`find_store_and_catalogue`], plus any client error from
/// fetching the page list.
pub async fn get_first_page_url(
    client: &RedPepperClient,
    store_id: &str,
) -> Result<Option<String>, RedPepperError> {
    let store = find_store_and_catalogue(client, store_id, CatalogueType::Weekly).await?;
    let pages = client.get_circular_pages(&store.catalogue_id).await?;
    Ok(pages.into_iter().next().map(|p| p.image_url))
}

/// Keeps the catalogues whose title matches `catalogue_type` and returns the
/// one with the highest numeric id. Non-numeric ids rank below every numeric
/// id; ties keep the earlier candidate.
#[must_use]
pub fn select_latest_catalogue(
    candidates: Vec<CatalogueMetadata>,
    catalogue_type: CatalogueType,
) -> Option<CatalogueMetadata> {
    let mut matching: Vec<CatalogueMetadata> = candidates
        .into_iter()
        .filter(|meta| catalogue_type.matches_title(&meta.title))
        .collect();
    matching.sort_by_key(|meta| Reverse(meta.id.trim().parse::<i64>().ok()));
    matching.into_iter().next()
}

async fn resolve_in_listing(
    client: &RedPepperClient,
    locations: &[GeoLocation],
    store_id: &str,
    catalogue_type: CatalogueType,
) -> Result<ResolvedStore, RedPepperError> {
    let rows: Vec<&GeoLocation> = locations
        .iter()
        .filter(|row| row.field_store_id.as_deref() == Some(store_id))
        .collect();

    let Some(&first_row) = rows.first() else {
        tracing::warn!(store_id, "store not found in listing");
        return Err(RedPepperError::StoreNotFound {
            store_id: store_id.to_owned(),
        });
    };

    let mut seen = HashSet::new();
    let catalogue_ids: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.field_version.as_deref())
        .filter(|id| seen.insert(*id))
        .collect();

    let fetched = join_all(catalogue_ids.iter().map(|id| async move {
        (*id, client.get_catalogue_metadata(id).await)
    }))
    .await;

    let candidates: Vec<CatalogueMetadata> = fetched
        .into_iter()
        .filter_map(|(id, result)| match result {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::warn!(store_id, catalogue_id = id, error = %e, "skipping catalogue without metadata");
                None
            }
        })
        .collect();

    let Some(chosen) = select_latest_catalogue(candidates, catalogue_type) else {
        tracing::warn!(store_id, %catalogue_type, "no matching catalogue");
        return Err(RedPepperError::NoMatchingCatalogue {
            store_id: store_id.to_owned(),
            catalogue_type,
        });
    };

    let row = rows
        .iter()
        .copied()
        .find(|row| row.field_version.as_deref() == Some(chosen.id.as_str()))
        .unwrap_or(first_row);

    tracing::info!(
        store_id,
        catalogue_id = %chosen.id,
        title = %chosen.title,
        "resolved store catalogue"
    );
    Ok(row.to_resolved(&chosen))
}

/// First row per store id, in listing order. Rows without a store id are
/// ignored.
fn distinct_stores<'a>(rows: impl Iterator<Item = &'a GeoLocation>) -> Vec<StoreSummary> {
    let mut seen = HashSet::new();
    rows.filter(|row| {
        row.field_store_id
            .as_deref()
            .is_some_and(|id| seen.insert(id.to_owned()))
    })
    .map(GeoLocation::to_summary)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str, title: &str) -> CatalogueMetadata {
        CatalogueMetadata {
            id: id.to_string(),
            title: title.to_string(),
            client: "ShopRite".to_string(),
            start_date: "Unknown".to_string(),
            end_date: "Unknown".to_string(),
            page_count: 0,
        }
    }

    fn row(store_id: Option<&str>, name: &str) -> GeoLocation {
        GeoLocation {
            field_store_id: store_id.map(str::to_string),
            field_store_name: Some(name.to_string()),
            ..GeoLocation::default()
        }
    }

    #[test]
    fn picks_highest_numeric_id() {
        let chosen = select_latest_catalogue(
            vec![meta("111", "Week of 1/1"), meta("222", "Week of 1/8")],
            CatalogueType::Weekly,
        )
        .expect("a catalogue");
        assert_eq!(chosen.id, "222");
    }

    #[test]
    fn weekly_never_picks_specialty_title() {
        let chosen = select_latest_catalogue(
            vec![meta("300", "Wellness Flyer"), meta("200", "WEEK OF 1/8")],
            CatalogueType::Weekly,
        )
        .expect("a catalogue");
        assert_eq!(chosen.id, "200");
    }

    #[test]
    fn compares_ids_numerically() {
        let chosen = select_latest_catalogue(
            vec![meta("99", "Week of 1/1"), meta("100", "Week of 1/8")],
            CatalogueType::Weekly,
        )
        .expect("a catalogue");
        assert_eq!(chosen.id, "100");
    }

    #[test]
    fn non_numeric_ids_rank_lowest() {
        let chosen = select_latest_catalogue(
            vec![meta("draft", "Hispanic Savings"), meta("5", "hispanic deals")],
            CatalogueType::Hispanic,
        )
        .expect("a catalogue");
        assert_eq!(chosen.id, "5");
    }

    #[test]
    fn all_keeps_every_title() {
        let chosen = select_latest_catalogue(
            vec![meta("1", "Week of 1/1"), meta("2", "Holiday Book")],
            CatalogueType::All,
        )
        .expect("a catalogue");
        assert_eq!(chosen.id, "2");
    }

    #[test]
    fn no_match_yields_none() {
        assert!(select_latest_catalogue(
            vec![meta("1", "Week of 1/1")],
            CatalogueType::Wellness
        )
        .is_none());
        assert!(select_latest_catalogue(vec![], CatalogueType::All).is_none());
    }

    #[test]
    fn distinct_stores_keeps_first_row_and_skips_missing_ids() {
        let rows = [
            row(Some("630"), "ShopRite of Wall"),
            row(None, "Orphan"),
            row(Some("630"), "Renamed Later"),
            row(Some("12"), "ShopRite of Hoboken"),
        ];
        let stores = distinct_stores(rows.iter());
        let names: Vec<_> = stores.iter().map(|s| s.store_name.as_str()).collect();
        assert_eq!(names, vec!["ShopRite of Wall", "ShopRite of Hoboken"]);
    }
}
