//! Runtime configuration, read once from the environment (and an optional `.env`).

use std::{env, sync::OnceLock, time::Duration};

use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/search";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_URL_KEY: &str = "DEALHAWK_API_URL";
const TIMEOUT_KEY: &str = "DEALHAWK_REQUEST_TIMEOUT_SECS";
const REQUIRE_PLATFORM_KEY: &str = "DEALHAWK_REQUIRE_PLATFORM";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Aggregation endpoint, validated as an absolute URL when loaded.
    pub api_url: String,
    pub request_timeout: Duration,
    /// Block submissions with zero selected platforms.
    pub require_platform: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {source}")]
    InvalidUrl {
        key: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} must be a boolean flag, got {value:?}")]
    InvalidFlag { key: &'static str, value: String },
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            require_platform: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(API_URL_KEY) {
            let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
                key: API_URL_KEY,
                source,
            })?;
            config.api_url = url.to_string();
        }

        if let Some(raw) = get(TIMEOUT_KEY) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidTimeout {
                    key: TIMEOUT_KEY,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = get(REQUIRE_PLATFORM_KEY) {
            config.require_platform = parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                key: REQUIRE_PLATFORM_KEY,
                value: raw.clone(),
            })?;
        }

        Ok(config)
    }
}

/// Installs the process-wide config. Only the first call has an effect.
pub fn init(config: AppConfig) -> &'static AppConfig {
    CONFIG.get_or_init(|| config)
}

/// Process-wide config; falls back to defaults if [`init`] was never called.
pub fn get() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
