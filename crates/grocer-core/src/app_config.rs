use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub shoprite_base_url: String,
    pub shoprite_user_agent: String,
    /// How long a fetched category page stays in the page cache.
    pub page_cache_ttl_secs: u64,
    /// `max-age` advertised to callers of the deals endpoint.
    pub response_max_age_secs: u64,
    pub redpepper_base_url: String,
    pub redpepper_client_id: String,
    pub redpepper_user_agent: String,
    pub default_store_id: String,
}
