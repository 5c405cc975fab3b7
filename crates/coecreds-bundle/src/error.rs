//! Bundle generation errors.

use thiserror::Error;

use coecreds_core::{ClusterId, RemoteError};

/// Errors that can occur while assembling a credentials bundle.
///
/// Every failure aborts the whole assembly; no partial bundle is returned.
#[derive(Debug, Error)]
pub enum BundleError {
    /// The bundle configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Key material is structurally incomplete or inconsistent.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Key pair generation failed.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The requested cluster does not exist.
    #[error("cluster not found: {0}")]
    ClusterNotFound(ClusterId),

    /// The cluster has no COE API address yet.
    #[error("cluster {0} has no COE endpoint")]
    MissingEndpoint(ClusterId),

    /// A collaborator reported an error.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// ASN.1, DER or PEM encoding failed.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// No script writer is registered for the orchestration engine.
    #[error("unsupported orchestration engine: {0}")]
    UnsupportedCoe(String),

    /// A script template failed to render.
    #[error("failed to render template '{name}': {message}")]
    Template { name: String, message: String },

    /// The authority answered for a different cluster than the one asked for.
    #[error("requested cluster {expected} but the response is for cluster {actual}")]
    ClusterMismatch { expected: ClusterId, actual: ClusterId },

    /// The issued certificate does not carry the generated public key.
    #[error("certificate issued for cluster {0} does not match the generated key")]
    KeyMismatch(ClusterId),
}

/// Coarse classification of [`BundleError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected before any network call.
    InvalidInput,
    /// Reported by the cluster lookup or certificate authority.
    Remote,
    /// Encoding or decoding of certificates, requests or keys.
    Encoding,
    /// Orchestration engine has no script writer.
    UnsupportedVariant,
    /// Returned material does not belong to the request.
    Integrity,
    /// Local failure unrelated to the inputs.
    Internal,
}

impl BundleError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig(_) | Self::InvalidKey(_) => ErrorKind::InvalidInput,
            Self::ClusterNotFound(_) | Self::MissingEndpoint(_) => ErrorKind::Remote,
            Self::Remote(RemoteError::Decode(_) | RemoteError::MalformedCertificate(_)) => {
                ErrorKind::Encoding
            }
            Self::Remote(_) => ErrorKind::Remote,
            Self::Encoding(_) => ErrorKind::Encoding,
            Self::UnsupportedCoe(_) => ErrorKind::UnsupportedVariant,
            Self::ClusterMismatch { .. } | Self::KeyMismatch(_) => ErrorKind::Integrity,
            Self::KeyGeneration(_) | Self::Template { .. } => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_certificate_is_encoding_kind() {
        let err = BundleError::from(RemoteError::MalformedCertificate("empty".into()));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_transport_error_is_remote_kind() {
        let err = BundleError::from(RemoteError::Transport("connection reset".into()));
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "transport error: connection reset");
    }

    #[test]
    fn test_missing_endpoint_is_remote_kind() {
        let err = BundleError::MissingEndpoint(ClusterId::new("c1"));
        assert_eq!(err.kind(), ErrorKind::Remote);
        assert_eq!(err.to_string(), "cluster c1 has no COE endpoint");
    }
}
