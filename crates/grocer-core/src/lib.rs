pub mod app_config;
pub mod circular;
pub mod config;
pub mod lenient;
pub mod products;

pub use app_config::{AppConfig, Environment};
pub use circular::{
    CatalogueMetadata, CatalogueType, Circular, CircularPage, ResolvedStore, StoreSummary,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::DealProduct;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
