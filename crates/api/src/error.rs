//! API error types

use hydrus_net::NetError;
use thiserror::Error;

/// API operation result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Net(#[from] NetError),

    #[error("Invalid file identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Net(err.into())
    }
}
