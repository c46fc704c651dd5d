//! HTTP client implementation

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::RequestBuilder;
use url::Url;

use crate::error::{NetError, NetResult};
use crate::materialize::{FromExchange, HttpExchange, RequestSummary};

/// Default user agent string
const DEFAULT_USER_AGENT: &str = concat!("hydrus-client/", env!("CARGO_PKG_VERSION"));

/// Default timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of redirects to follow
const MAX_REDIRECTS: usize = 10;

/// HTTP client that hands every completed response to a [`FromExchange`] type
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> NetResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: ClientConfig) -> NetResult<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::try_from(config.user_agent.as_str())
            .map_err(|e| NetError::RequestFailed(format!("Invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| NetError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }

    /// Start a GET request
    pub fn get(&self, url: Url) -> RequestBuilder {
        self.client.get(url)
    }

    /// Send a request and build `T` from the completed exchange.
    ///
    /// Errors from sending or from `T::from_exchange` are returned unchanged.
    pub async fn execute<T: FromExchange>(&self, request: RequestBuilder) -> NetResult<T> {
        let request = request.build()?;
        let summary = RequestSummary {
            method: request.method().clone(),
            url: request.url().clone(),
        };

        info!("{} {}", summary.method, summary.url);

        let response = self.client.execute(request).await?;
        let status = response.status();

        debug!("Response status: {}", status.as_u16());
        if !status.is_success() {
            warn!("{} returned {}", summary.url, status);
        }

        T::from_exchange(HttpExchange::new(summary, response)).await
    }
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
