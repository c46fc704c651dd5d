//! Materialized file response

use url::Url;

use crate::error::{NetError, NetResult};
use crate::headers::ContentHeaders;

/// A binary response read fully into memory.
///
/// Built by [`crate::materialize`] once the whole body has arrived, so the
/// body and headers are always populated together.
#[derive(Debug, Clone)]
pub struct FileResponse {
    /// Final URL after redirects
    pub url: Url,
    /// HTTP status code
    pub status: u16,
    /// Entity headers of the response (`Content-*`, `Expires`, ...)
    pub content_headers: ContentHeaders,
    /// Complete response body
    pub content_bytes: Vec<u8>,
}

impl FileResponse {
    pub(crate) fn new(
        url: Url,
        status: u16,
        content_headers: ContentHeaders,
        content_bytes: Vec<u8>,
    ) -> Self {
        Self {
            url,
            status,
            content_headers,
            content_bytes,
        }
    }

    /// Check if the response was successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error
    pub fn error_for_status(self) -> NetResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NetError::HttpError {
                status: self.status,
            })
        }
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.content_headers.content_type()
    }

    /// Get the Content-Length header
    pub fn content_length(&self) -> Option<u64> {
        self.content_headers.content_length()
    }

    /// Body size in bytes
    pub fn len(&self) -> usize {
        self.content_bytes.len()
    }

    /// Check whether the body is empty
    pub fn is_empty(&self) -> bool {
        self.content_bytes.is_empty()
    }

    /// Take the body, dropping everything else
    pub fn into_bytes(self) -> Vec<u8> {
        self.content_bytes
    }
}
