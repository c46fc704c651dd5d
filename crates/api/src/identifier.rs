//! File identifiers accepted by the get_files endpoints

use std::fmt;

use crate::error::{ApiError, ApiResult};

/// Length of a hex-encoded SHA-256 hash
const HASH_LEN: usize = 64;

/// Identifies a single file on the server
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileIdentifier {
    /// Numeric file id
    Id(u64),
    /// Lowercase hex SHA-256 hash
    Hash(String),
}

impl FileIdentifier {
    /// Build a hash identifier, checking it is 64 hex characters
    pub fn hash(hash: &str) -> ApiResult<Self> {
        if hash.len() == HASH_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(FileIdentifier::Hash(hash.to_ascii_lowercase()))
        } else {
            Err(ApiError::InvalidIdentifier(format!(
                "'{}' is not a {}-character hex SHA-256 hash",
                hash, HASH_LEN
            )))
        }
    }

    /// Parse a decimal file id or a SHA-256 hash
    pub fn parse(input: &str) -> ApiResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ApiError::InvalidIdentifier("empty identifier".to_string()));
        }
        if input.len() < HASH_LEN && input.bytes().all(|b| b.is_ascii_digit()) {
            return input
                .parse()
                .map(FileIdentifier::Id)
                .map_err(|e| ApiError::InvalidIdentifier(format!("'{}': {}", input, e)));
        }
        Self::hash(input)
    }

    /// Query parameter name and value for this identifier
    pub fn query_pair(&self) -> (&'static str, String) {
        match self {
            FileIdentifier::Id(id) => ("file_id", id.to_string()),
            FileIdentifier::Hash(hash) => ("hash", hash.clone()),
        }
    }
}

impl fmt::Display for FileIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileIdentifier::Id(id) => write!(f, "{}", id),
            FileIdentifier::Hash(hash) => write!(f, "{}", hash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "ad6d3599a6c489a575eb19c026face97a9cd6579e74728b0ce94a601d232f3c3";

    #[test]
    fn test_parse_id() {
        assert_eq!(FileIdentifier::parse("1234").unwrap(), FileIdentifier::Id(1234));
        assert_eq!(FileIdentifier::parse(" 7 ").unwrap(), FileIdentifier::Id(7));
    }

    #[test]
    fn test_parse_hash_lowercases() {
        let id = FileIdentifier::parse(&HASH.to_uppercase()).unwrap();
        assert_eq!(id, FileIdentifier::Hash(HASH.to_string()));
    }

    #[test]
    fn test_all_digit_hash_is_a_hash() {
        let digits = "1".repeat(64);
        assert_eq!(
            FileIdentifier::parse(&digits).unwrap(),
            FileIdentifier::Hash(digits.clone())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(FileIdentifier::parse(""), Err(ApiError::InvalidIdentifier(_))));
        assert!(matches!(FileIdentifier::parse("cat.png"), Err(ApiError::InvalidIdentifier(_))));
        assert!(matches!(FileIdentifier::parse("abc123"), Err(ApiError::InvalidIdentifier(_))));
        assert!(matches!(
            FileIdentifier::parse("99999999999999999999999"),
            Err(ApiError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_query_pair() {
        assert_eq!(FileIdentifier::Id(5).query_pair(), ("file_id", "5".to_string()));
        assert_eq!(
            FileIdentifier::hash(HASH).unwrap().query_pair(),
            ("hash", HASH.to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(FileIdentifier::Id(42).to_string(), "42");
        assert_eq!(FileIdentifier::hash(HASH).unwrap().to_string(), HASH);
    }
}
