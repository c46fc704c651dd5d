//! Hydrus Network Layer
//!
//! HTTP transport for the Hydrus client API, and the step that buffers a
//! completed response into a [`FileResponse`].

mod client;
mod error;
mod headers;
mod materialize;
mod response;

pub use client::{ClientConfig, HttpClient};
pub use error::{NetError, NetResult};
pub use headers::ContentHeaders;
pub use materialize::{materialize, FromExchange, HttpExchange, RequestSummary, ResponseSource};
pub use response::FileResponse;
