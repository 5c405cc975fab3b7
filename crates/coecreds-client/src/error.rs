//! Error types for the HTTP client.

use thiserror::Error;

/// Errors that can occur while constructing the client.
///
/// Request failures are reported as `coecreds_core::RemoteError`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL cannot be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// A configured header value is not valid in HTTP.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
