use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a working
/// configuration pointed at the production upstreams.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("GROCER_ENV", "development"))?;

    let bind_addr = parse("GROCER_BIND_ADDR", "0.0.0.0:8787")?;
    let log_level = or_default("GROCER_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("GROCER_REQUEST_TIMEOUT_SECS", "30")?;

    let shoprite_base_url = or_default("GROCER_SHOPRITE_BASE_URL", "https://www.shoprite.com");
    let shoprite_user_agent = or_default(
        "GROCER_SHOPRITE_USER_AGENT",
        "Mozilla/5.0 (compatible; ShopRite-Deals-API/1.0)",
    );
    let page_cache_ttl_secs = parse_u64("GROCER_PAGE_CACHE_TTL_SECS", "86400")?;
    let response_max_age_secs = parse_u64("GROCER_RESPONSE_MAX_AGE_SECS", "3600")?;

    let redpepper_base_url = or_default(
        "GROCER_REDPEPPER_BASE_URL",
        "https://app.redpepper.digital",
    );
    let redpepper_client_id = or_default("GROCER_REDPEPPER_CLIENT_ID", "4573");
    let redpepper_user_agent = or_default(
        "GROCER_REDPEPPER_USER_AGENT",
        "ShopRite-Circular-Fetcher/1.0",
    );
    let default_store_id = or_default("GROCER_DEFAULT_STORE_ID", "630");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        shoprite_base_url,
        shoprite_user_agent,
        page_cache_ttl_secs,
        response_max_age_secs,
        redpepper_base_url,
        redpepper_client_id,
        redpepper_user_agent,
        default_store_id,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "GROCER_ENV".to_string(),
            reason: format!("expected development, test, or production; got \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
