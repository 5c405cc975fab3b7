//! Errors reported by remote collaborators.

use thiserror::Error;

/// Errors surfaced by the cluster lookup and certificate authority collaborators.
///
/// Transports map their failures onto these variants; the bundle generator
/// passes them through to its caller unchanged.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The cluster is in a lifecycle state that does not allow the operation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The caller is not authenticated or not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other error response from the service.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The response carried a certificate that is not valid PEM.
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),
}
