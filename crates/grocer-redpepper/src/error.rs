use grocer_core::CatalogueType;
use thiserror::Error;

/// Errors returned by the RedPepper client and resolver.
#[derive(Debug, Error)]
pub enum RedPepperError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("store ID {store_id} not found")]
    StoreNotFound { store_id: String },

    #[error("no {catalogue_type} catalogues found for store {store_id}")]
    NoMatchingCatalogue {
        store_id: String,
        catalogue_type: CatalogueType,
    },

    #[error("no stores found matching \"{city}\"")]
    NoCityMatch { city: String },
}
