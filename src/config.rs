//! Configuration Module
//!
//! Handles loading server configuration from environment variables.

use std::env;

/// Default upstream URL for the match feed.
pub const DEFAULT_SOURCE_URL: &str = "https://lyfe05.github.io/highlight-api/matches.json";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The cache duration and fetch timeout are fixed constants in [`crate::cache`],
/// not configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Accepted API keys; an empty set disables the key check on /matches
    pub api_keys: Vec<String>,
    /// Upstream URL serving the match document
    pub source_url: String,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_KEYS` - Comma-separated accepted API keys (default: none, auth disabled)
    /// - `SOURCE_URL` - Upstream match feed URL (default: the hosted feed)
    /// - `PORT` - HTTP server port (default: 8000)
    pub fn from_env() -> Self {
        Self {
            api_keys: env::var("API_KEYS")
                .map(|v| parse_key_list(&v))
                .unwrap_or_default(),
            source_url: env::var("SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string()),
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        }
    }

    /// Returns true when the /matches endpoint requires an API key.
    pub fn auth_enabled(&self) -> bool {
        !self.api_keys.is_empty()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            server_port: 8000,
        }
    }
}

/// Splits a comma-separated key list, trimming whitespace and dropping empty entries.
fn parse_key_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
