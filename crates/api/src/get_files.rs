//! `get_files` endpoints

use hydrus_net::{ClientConfig, FileResponse, HttpClient};
use log::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::ApiResult;
use crate::identifier::FileIdentifier;

/// Header carrying the client API access key
pub const ACCESS_KEY_HEADER: &str = "Hydrus-Client-API-Access-Key";

const FILE_PATH: &str = "get_files/file";
const THUMBNAIL_PATH: &str = "get_files/thumbnail";

/// Client for the `get_files` endpoints.
///
/// Responses come back fully buffered whatever their status; use
/// [`FileResponse::error_for_status`] to reject non-2xx answers.
#[derive(Clone)]
pub struct GetFilesApi {
    client: HttpClient,
    config: ApiConfig,
}

impl GetFilesApi {
    /// Create a client from a configuration
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = HttpClient::with_config(ClientConfig {
            timeout_secs: config.timeout_secs,
            ..ClientConfig::default()
        })?;
        Ok(Self { client, config })
    }

    /// Fetch a file's bytes.
    ///
    /// With `download` set the server is asked to send the file as an
    /// attachment.
    pub async fn file(&self, id: &FileIdentifier, download: bool) -> ApiResult<FileResponse> {
        let mut url = self.endpoint(FILE_PATH, id)?;
        if download {
            url.query_pairs_mut().append_pair("download", "true");
        }
        self.fetch(url).await
    }

    /// Fetch a file's thumbnail
    pub async fn thumbnail(&self, id: &FileIdentifier) -> ApiResult<FileResponse> {
        let url = self.endpoint(THUMBNAIL_PATH, id)?;
        self.fetch(url).await
    }

    fn endpoint(&self, path: &str, id: &FileIdentifier) -> ApiResult<Url> {
        let mut url = self.config.base_url.join(path)?;
        let (key, value) = id.query_pair();
        url.query_pairs_mut().append_pair(key, &value);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> ApiResult<FileResponse> {
        let mut request = self.client.get(url);
        if let Some(ref key) = self.config.access_key {
            request = request.header(ACCESS_KEY_HEADER, key.as_str());
        }

        let response: FileResponse = self.client.execute(request).await?;
        debug!(
            "Fetched {} bytes ({})",
            response.len(),
            response.content_type().unwrap_or("unknown type")
        );
        Ok(response)
    }
}
