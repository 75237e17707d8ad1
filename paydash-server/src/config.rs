//! Server configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Base URL of the external auth/database service
    pub auth_url: String,

    /// Public (anon) API key for the external service
    pub auth_anon_key: String,

    /// Path to the merchant database
    pub database_path: String,

    /// Directory holding the static dashboard fixtures
    pub fixtures_dir: String,

    /// Upstream exchange-rate endpoint (USD base)
    pub rates_url: String,

    /// Login surface that confirmation redirects land on
    pub login_url: String,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `PAYDASH_AUTH_URL` and `PAYDASH_AUTH_ANON_KEY` are required; the
    /// service refuses to start without them. Everything else has a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth_url = require("PAYDASH_AUTH_URL")?;
        let auth_anon_key = require("PAYDASH_AUTH_ANON_KEY")?;

        let port = std::env::var("PAYDASH_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        Ok(Self {
            port,
            auth_url,
            auth_anon_key,
            database_path: optional("PAYDASH_DATABASE").unwrap_or_else(|| "paydash.db".to_string()),
            fixtures_dir: optional("PAYDASH_FIXTURES_DIR")
                .unwrap_or_else(|| "fixtures".to_string()),
            rates_url: optional("PAYDASH_RATES_URL")
                .unwrap_or_else(|| "https://open.er-api.com/v6/latest/USD".to_string()),
            login_url: optional("PAYDASH_LOGIN_URL").unwrap_or_else(|| "/login".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            auth_url: "http://localhost:54321".to_string(),
            auth_anon_key: "anon-key".to_string(),
            database_path: ":memory:".to_string(),
            fixtures_dir: "fixtures".to_string(),
            rates_url: "https://open.er-api.com/v6/latest/USD".to_string(),
            login_url: "/login".to_string(),
        }
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::MissingVar(key))
}

/// Get a non-empty env var
fn optional(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
