//! Client and resolver for the RedPepper digital-circular API.
//!
//! [`RedPepperClient`] wraps the three JSON endpoints (store geo-location
//! listing, catalogue node metadata, catalogue page images). The
//! [`resolve`] module builds store and circular lookups on top of it.

pub mod client;
pub mod error;
pub mod resolve;
pub mod types;

pub use client::RedPepperClient;
pub use error::RedPepperError;
pub use resolve::{
    fetch_circular, find_store_and_catalogue, find_store_by_city, get_circular_for_store,
    get_first_page_url, list_all_stores, select_latest_catalogue, CityResolution,
};
pub use types::{CatalogueNode, GeoLocation, PageImage};
