//! Post-response step that buffers a completed exchange into memory

use std::future::Future;

use log::debug;
use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::error::NetResult;
use crate::headers::ContentHeaders;
use crate::response::FileResponse;

/// A completed response whose body has not been read yet
pub trait ResponseSource: Send {
    /// HTTP status code
    fn status(&self) -> u16;

    /// Final URL after redirects
    fn url(&self) -> &Url;

    /// Response headers
    fn headers(&self) -> &HeaderMap;

    /// Read the whole body, consuming the response
    fn read_body(self) -> impl Future<Output = NetResult<Vec<u8>>> + Send;
}

impl ResponseSource for reqwest::Response {
    fn status(&self) -> u16 {
        reqwest::Response::status(self).as_u16()
    }

    fn url(&self) -> &Url {
        reqwest::Response::url(self)
    }

    fn headers(&self) -> &HeaderMap {
        reqwest::Response::headers(self)
    }

    fn read_body(self) -> impl Future<Output = NetResult<Vec<u8>>> + Send {
        async move { Ok(self.bytes().await?.to_vec()) }
    }
}

/// What was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    /// HTTP method
    pub method: Method,
    /// Request URL
    pub url: Url,
}

/// A request paired with its completed response
#[derive(Debug)]
pub struct HttpExchange<R> {
    pub request: RequestSummary,
    pub response: R,
}

impl<R: ResponseSource> HttpExchange<R> {
    pub fn new(request: RequestSummary, response: R) -> Self {
        Self { request, response }
    }
}

/// Response types built from a completed exchange.
///
/// [`crate::HttpClient::execute`] calls this once for every response it
/// receives.
pub trait FromExchange: Sized {
    fn from_exchange<R: ResponseSource>(
        exchange: HttpExchange<R>,
    ) -> impl Future<Output = NetResult<Self>> + Send;
}

impl FromExchange for FileResponse {
    fn from_exchange<R: ResponseSource>(
        exchange: HttpExchange<R>,
    ) -> impl Future<Output = NetResult<Self>> + Send {
        materialize(exchange)
    }
}

/// Read the full body and entity headers of an exchange into a
/// [`FileResponse`].
///
/// A body read failure is returned as-is and no response is built. The
/// exchange is consumed, so the same response cannot be read twice:
///
/// ```compile_fail
/// async fn twice<R: hydrus_net::ResponseSource>(exchange: hydrus_net::HttpExchange<R>) {
///     let _first = hydrus_net::materialize(exchange).await;
///     let _second = hydrus_net::materialize(exchange).await;
/// }
/// ```
pub async fn materialize<R: ResponseSource>(exchange: HttpExchange<R>) -> NetResult<FileResponse> {
    let HttpExchange { request, response } = exchange;

    let status = response.status();
    let url = response.url().clone();
    let content_headers = ContentHeaders::from_response(response.headers());

    let content_bytes = response.read_body().await?;

    debug!(
        "{} {} -> {} ({} bytes)",
        request.method,
        request.url,
        status,
        content_bytes.len()
    );

    Ok(FileResponse::new(url, status, content_headers, content_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetError;
    use reqwest::header::{HeaderName, HeaderValue};
    use std::io;

    /// In-memory response delivering its body in chunks
    struct CannedResponse {
        url: Url,
        status: u16,
        headers: HeaderMap,
        chunks: Vec<io::Result<Vec<u8>>>,
    }

    impl CannedResponse {
        fn new(status: u16, headers: &[(&str, &str)], chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            let mut map = HeaderMap::new();
            for (k, v) in headers {
                map.append(
                    HeaderName::try_from(*k).unwrap(),
                    HeaderValue::try_from(*v).unwrap(),
                );
            }
            Self {
                url: Url::parse("http://127.0.0.1:45869/get_files/file?file_id=7").unwrap(),
                status,
                headers: map,
                chunks,
            }
        }
    }

    impl ResponseSource for CannedResponse {
        fn status(&self) -> u16 {
            self.status
        }

        fn url(&self) -> &Url {
            &self.url
        }

        fn headers(&self) -> &HeaderMap {
            &self.headers
        }

        fn read_body(self) -> impl Future<Output = NetResult<Vec<u8>>> + Send {
            async move {
                let mut body = Vec::new();
                for chunk in self.chunks {
                    body.extend_from_slice(&chunk?);
                }
                Ok(body)
            }
        }
    }

    fn exchange(response: CannedResponse) -> HttpExchange<CannedResponse> {
        let request = RequestSummary {
            method: Method::GET,
            url: response.url.clone(),
        };
        HttpExchange::new(request, response)
    }

    #[tokio::test]
    async fn test_png_body_and_content_type() {
        let source = CannedResponse::new(
            200,
            &[("Content-Type", "image/png")],
            vec![Ok(vec![0x01, 0x02, 0x03])],
        );

        let resp = materialize(exchange(source)).await.unwrap();

        assert_eq!(resp.content_bytes, vec![0x01, 0x02, 0x03]);
        assert_eq!(resp.content_headers["Content-Type"], "image/png");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.url.path(), "/get_files/file");
    }

    #[tokio::test]
    async fn test_chunked_body_is_joined_in_order() {
        let body: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let chunks = body.chunks(777).map(|c| Ok(c.to_vec())).collect();
        let source = CannedResponse::new(200, &[], chunks);

        let resp = materialize(exchange(source)).await.unwrap();

        assert_eq!(resp.len(), 10_000);
        assert_eq!(resp.content_bytes, body);
    }

    #[tokio::test]
    async fn test_empty_body() {
        let source = CannedResponse::new(204, &[], vec![]);
        let resp = materialize(exchange(source)).await.unwrap();
        assert!(resp.is_empty());
    }

    #[tokio::test]
    async fn test_content_headers_copied_exactly() {
        let source = CannedResponse::new(
            200,
            &[
                ("content-type", "image/png"),
                ("content-language", "en"),
                ("content-language", "de"),
            ],
            vec![Ok(b"x".to_vec())],
        );

        let resp = materialize(exchange(source)).await.unwrap();

        let pairs: Vec<_> = resp
            .content_headers
            .iter()
            .map(|(k, v)| (k, v.to_str().unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("content-type", "image/png"),
                ("content-language", "en"),
                ("content-language", "de"),
            ]
        );
    }

    #[tokio::test]
    async fn test_non_content_headers_left_out() {
        let source = CannedResponse::new(
            200,
            &[
                ("Server", "hydrus/600"),
                ("Content-Type", "image/png"),
                ("Connection", "keep-alive"),
                ("Set-Cookie", "session=1"),
            ],
            vec![Ok(vec![1])],
        );

        let resp = materialize(exchange(source)).await.unwrap();

        assert_eq!(resp.content_headers.len(), 1);
        assert_eq!(resp.content_headers["Content-Type"], "image/png");
        assert!(!resp.content_headers.contains("Server"));
        assert!(!resp.content_headers.contains("Connection"));
        assert!(!resp.content_headers.contains("Set-Cookie"));
    }

    #[tokio::test]
    async fn test_truncated_body_fails() {
        let source = CannedResponse::new(
            200,
            &[("Content-Type", "image/png"), ("Content-Length", "6")],
            vec![
                Ok(vec![1, 2, 3]),
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset")),
            ],
        );

        let err = materialize(exchange(source)).await.unwrap_err();
        assert!(matches!(err, NetError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    }

    #[tokio::test]
    async fn test_from_exchange_materializes() {
        let source = CannedResponse::new(200, &[("Content-Type", "image/jpeg")], vec![Ok(vec![9])]);
        let resp = FileResponse::from_exchange(exchange(source)).await.unwrap();
        assert_eq!(resp.content_type(), Some("image/jpeg"));
        assert_eq!(resp.into_bytes(), vec![9]);
    }
}
