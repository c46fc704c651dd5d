//! Header collection captured from a completed response

use std::ops::Index;

use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ALLOW, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE,
    EXPIRES, LAST_MODIFIED,
};

/// Headers describing a response body.
///
/// Lookups are case-insensitive. A header that was sent more than once keeps
/// every value, in the order the server sent them. The `&str` accessors
/// (`get`, `get_all`, `content_type`, `filename`) skip values that are not
/// visible ASCII; `iter` and indexing return every value as a `HeaderValue`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentHeaders {
    map: HeaderMap,
}

impl ContentHeaders {
    /// Wrap an existing header map as-is
    pub fn new(map: HeaderMap) -> Self {
        Self { map }
    }

    /// Keep only the entity headers of a response: `Content-*`, `Expires`,
    /// `Last-Modified` and `Allow`
    pub fn from_response(headers: &HeaderMap) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            if is_content_header(name) {
                map.append(name.clone(), value.clone());
            }
        }
        Self { map }
    }

    /// First value of a header, if present and valid visible ASCII
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|v| v.to_str().ok())
    }

    /// All values of a header in received order
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.map
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Check whether a header is present
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of header values (a repeated header counts once per value)
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check whether no headers were kept
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate over every `(name, value)` pair in received order.
    ///
    /// Names are lowercase.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The underlying header map
    pub fn as_map(&self) -> &HeaderMap {
        &self.map
    }

    /// Get the Content-Type header
    pub fn content_type(&self) -> Option<&str> {
        self.map.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Get the Content-Length header as a number
    pub fn content_length(&self) -> Option<u64> {
        self.map
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
    }

    /// File name suggested by Content-Disposition, if any
    pub fn filename(&self) -> Option<String> {
        let disposition = self.map.get(CONTENT_DISPOSITION)?.to_str().ok()?;
        parse_disposition_filename(disposition)
    }
}

impl From<HeaderMap> for ContentHeaders {
    fn from(map: HeaderMap) -> Self {
        Self::new(map)
    }
}

impl Index<&str> for ContentHeaders {
    type Output = HeaderValue;

    /// Panics if the header is missing, like `HeaderMap` indexing
    fn index(&self, name: &str) -> &HeaderValue {
        &self.map[name]
    }
}

/// Entity headers, as opposed to connection or response metadata
fn is_content_header(name: &HeaderName) -> bool {
    name.as_str().starts_with("content-")
        || *name == EXPIRES
        || *name == LAST_MODIFIED
        || *name == ALLOW
}

/// Extract `filename` from a Content-Disposition value.
///
/// Handles quoted and bare forms. `filename*` (RFC 5987) is not decoded.
fn parse_disposition_filename(value: &str) -> Option<String> {
    for param in value.split(';').skip(1) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        if !key.trim().eq_ignore_ascii_case("filename") {
            continue;
        }
        let raw = raw.trim();
        let name = raw
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .unwrap_or(raw);
        if !name.is_empty() {
            return Some(name.to_string());
        }
    }
    None
}
