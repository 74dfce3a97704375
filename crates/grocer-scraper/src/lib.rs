pub mod cache;
pub mod client;
pub mod deals;
pub mod error;
pub mod extract;
pub mod products;
pub mod types;

pub use cache::{InMemoryPageCache, PageCache};
pub use client::ShopRiteClient;
pub use deals::{CategoryDeals, DealsExtractor};
pub use error::ScraperError;
pub use extract::extract_preloaded_state;
pub use products::{category_info, collect_skus, parse_products, DEFAULT_LIMIT};
pub use types::{CategoryRef, ProductCard, ProductImages};
