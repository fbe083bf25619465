//! Client configuration
//!
//! Defaults, environment overrides and path resolution for the backend
//! client. Every value can be overridden through a `LLANTERA_*` variable.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

/// Default backend location
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Default page size for list screens
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Quiet window for search input
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Session re-verification interval (5 minutes)
pub const DEFAULT_RENEW_SECS: u64 = 5 * 60;

/// Minimum renew interval accepted from configuration
pub const MIN_RENEW_SECS: u64 = 30;

/// Per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_URL: &str = "LLANTERA_API_URL";
pub const ENV_PAGE_SIZE: &str = "LLANTERA_PAGE_SIZE";
pub const ENV_DEBOUNCE_MS: &str = "LLANTERA_DEBOUNCE_MS";
pub const ENV_RENEW_SECS: &str = "LLANTERA_RENEW_SECS";
pub const ENV_TIMEOUT_SECS: &str = "LLANTERA_TIMEOUT_SECS";
pub const ENV_TOKEN_PATH: &str = "LLANTERA_TOKEN_PATH";

/// Effective client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Page size used by list screens
    pub page_size: u32,
    /// Search debounce window in milliseconds
    pub debounce_ms: u64,
    /// Session renew interval in seconds
    pub renew_secs: u64,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            renew_secs: DEFAULT_RENEW_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load defaults and apply `LLANTERA_*` environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.api_url = url;
            }
        }
        if let Some(size) = parse_env::<u32>(ENV_PAGE_SIZE)? {
            config.page_size = size;
        }
        if let Some(ms) = parse_env::<u64>(ENV_DEBOUNCE_MS)? {
            config.debounce_ms = ms;
        }
        if let Some(secs) = parse_env::<u64>(ENV_RENEW_SECS)? {
            config.renew_secs = secs;
        }
        if let Some(secs) = parse_env::<u64>(ENV_TIMEOUT_SECS)? {
            config.timeout_secs = secs;
        }

        Ok(config.validate())
    }

    /// Override the backend URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self.validate()
    }

    /// Validate and normalize the configuration
    pub fn validate(&self) -> Self {
        Self {
            api_url: self.api_url.trim().trim_end_matches('/').to_string(),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
            debounce_ms: self.debounce_ms,
            renew_secs: self.renew_secs.max(MIN_RENEW_SECS),
            timeout_secs: self.timeout_secs.max(1),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn renew_interval(&self) -> Duration {
        Duration::from_secs(self.renew_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::config(format!("{} must be a number, got '{}'", key, raw))),
        _ => Ok(None),
    }
}

/// Location of the persisted bearer token
pub fn get_token_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ENV_TOKEN_PATH) {
        return Ok(PathBuf::from(path));
    }

    let dirs = directories::ProjectDirs::from("com", "llantera", "Llantera")
        .ok_or_else(|| Error::config("Could not determine project directories"))?;

    Ok(dirs.config_dir().join("token"))
}
