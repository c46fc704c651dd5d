//! Hydrus Client API
//!
//! Typed access to the `get_files` endpoints.

mod config;
mod error;
mod get_files;
mod identifier;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use get_files::GetFilesApi;
pub use identifier::FileIdentifier;

pub use hydrus_net::{ContentHeaders, FileResponse};
