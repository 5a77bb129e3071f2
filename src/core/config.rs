//! Configuration management for the MCP server.
//!
//! Configuration is assembled from defaults, environment variables (with
//! `.env` support) and, for the events API credentials, an optional JSON file
//! at `~/.api/config.json`.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable holding the events API base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Environment variable holding the events API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Remote events API endpoint and credentials.
    pub api: ApiConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Connection settings for the remote events API.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash.
    #[serde(rename = "baseURL", default)]
    pub base_url: String,

    /// API key sent as the `api-key` query parameter. Empty disables auth.
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &key)
            .finish()
    }
}

impl ApiConfig {
    /// Create an API config, trimming a trailing slash from the base URL.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            api_key: api_key.into(),
        }
    }

    /// Read an API config from a JSON file of the form
    /// `{"baseURL": "...", "apiKey": "..."}`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let parsed: ApiConfig = serde_json::from_str(&data)?;
        Ok(Self::new(parsed.base_url, parsed.api_key))
    }

    /// Default location of the credentials file (`~/.api/config.json`).
    pub fn default_file_path() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".api").join("config.json"))
    }

    /// Fill empty fields from `fallback`, keeping values already set.
    fn merge_missing(&mut self, fallback: ApiConfig) {
        if self.base_url.is_empty() {
            self.base_url = fallback.base_url;
        }
        if self.api_key.is_empty() {
            self.api_key = fallback.api_key;
        }
    }
}

fn normalize_base_url(url: String) -> String {
    match url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => url,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "events-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a default configuration pointing at the given API.
    pub fn with_api(api: ApiConfig) -> Self {
        Self {
            api,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`). API settings come from
    /// `API_BASE_URL` and `API_KEY`, falling back to `~/.api/config.json`
    /// for whichever of the two is unset.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        config.api = ApiConfig::new(
            std::env::var(BASE_URL_ENV).unwrap_or_default(),
            std::env::var(API_KEY_ENV).unwrap_or_default(),
        );

        if config.api.base_url.is_empty() || config.api.api_key.is_empty() {
            if let Some(path) = ApiConfig::default_file_path() {
                config.load_api_file(&path);
            }
        }

        if config.api.api_key.is_empty() {
            warn!("{} not set - requests will be sent without an api-key", API_KEY_ENV);
        }

        config
    }

    /// Merge API settings from a credentials file into unset fields.
    ///
    /// A missing or malformed file is logged and otherwise ignored.
    pub fn load_api_file(&mut self, path: &Path) {
        if !path.exists() {
            debug!("No API config file at {:?}", path);
            return;
        }
        match ApiConfig::from_file(path) {
            Ok(file_config) => {
                info!("Loaded API config from {:?}", path);
                self.api.merge_missing(file_config);
            }
            Err(e) => warn!("Ignoring unreadable API config file {:?}: {}", path, e),
        }
    }

    /// Check that the configuration can serve requests.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(Error::config(format!(
                "API base URL is not configured. Set {} or provide baseURL in ~/.api/config.json",
                BASE_URL_ENV
            )));
        }
        Ok(())
    }
}
