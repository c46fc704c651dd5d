//! API client configuration

use std::env;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Default address of a local Hydrus client API
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:45869/";

/// Default timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable names read by [`ApiConfig::from_env`]
pub const ENV_API_URL: &str = "HYDRUS_API_URL";
pub const ENV_ACCESS_KEY: &str = "HYDRUS_ACCESS_KEY";
pub const ENV_TIMEOUT_SECS: &str = "HYDRUS_TIMEOUT_SECS";

/// Connection settings for the client API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, always ending in `/`
    pub base_url: Url,
    /// Sent as `Hydrus-Client-API-Access-Key` when set
    pub access_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            access_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Create a configuration for a base URL
    pub fn new(base_url: &str) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Set the access key
    pub fn with_access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = Some(key.into());
        self
    }

    /// Read settings from `HYDRUS_*` environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through a variable lookup; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_API_URL) {
            config.base_url = parse_base_url(&raw)
                .map_err(|e| ApiError::InvalidConfig(format!("{}: {}", ENV_API_URL, e)))?;
        }

        config.access_key = lookup(ENV_ACCESS_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|e| {
                ApiError::InvalidConfig(format!("{}='{}': {}", ENV_TIMEOUT_SECS, raw, e))
            })?;
        }

        Ok(config)
    }
}

/// Parse a base URL, adding the trailing slash `Url::join` needs
fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let raw = raw.trim();
    let url = if raw.ends_with('/') {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("{}/", raw))?
    };
    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidConfig(format!("'{}' cannot be a base URL", raw)));
    }
    Ok(url)
}
