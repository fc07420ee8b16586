//! Client configuration, read from the environment.

use reqwest::Url;
use thiserror::Error;

use stockdesk_inventory::StockThresholds;

pub const API_URL_ENV: &str = "STOCKDESK_API_URL";
pub const AUTH_TOKEN_ENV: &str = "STOCKDESK_AUTH_TOKEN";
pub const LOW_STOCK_THRESHOLD_ENV: &str = "STOCKDESK_LOW_STOCK_THRESHOLD";
pub const PAGE_SIZE_ENV: &str = "STOCKDESK_PAGE_SIZE";

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("{key} must be a non-negative integer, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: Url,
    pub auth_token: Option<String>,
    pub thresholds: StockThresholds,
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            auth_token: None,
            thresholds: StockThresholds::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (environment, tests, ...).
    ///
    /// Unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = get(API_URL_ENV) {
            config.api_url = parse_url(API_URL_ENV, &raw)?;
        }

        config.auth_token = get(AUTH_TOKEN_ENV);

        if let Some(raw) = get(LOW_STOCK_THRESHOLD_ENV) {
            let low = parse_u64(LOW_STOCK_THRESHOLD_ENV, &raw)?;
            config.thresholds = StockThresholds::new(low);
        }

        if let Some(raw) = get(PAGE_SIZE_ENV) {
            let size = parse_u64(PAGE_SIZE_ENV, &raw)?;
            if !(1..=u64::from(MAX_PAGE_SIZE)).contains(&size) {
                return Err(ConfigError::OutOfRange {
                    key: PAGE_SIZE_ENV,
                    value: size,
                    min: 1,
                    max: u64::from(MAX_PAGE_SIZE),
                });
            }
            config.page_size = size as u32;
        }

        Ok(config)
    }
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            key,
            value: raw.to_string(),
            reason: "expected an http(s) base URL".to_string(),
        });
    }
    Ok(url)
}

fn parse_u64(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}
