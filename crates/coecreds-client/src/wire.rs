//! Request and response bodies.

use serde::{Deserialize, Serialize};

// ============================================================================
// Certificate types
// ============================================================================

/// Request body for `POST /certificates`.
#[derive(Debug, Serialize)]
pub struct CreateCertificateRequest<'a> {
    /// Cluster the CSR is for.
    pub cluster_uuid: &'a str,

    /// Certificate Signing Request (PEM encoded).
    pub csr: &'a str,
}

/// Response body for `POST /certificates` and `GET /certificates/{cluster}`.
#[derive(Debug, Deserialize)]
pub struct CertificateResponse {
    /// Cluster the certificate belongs to.
    pub cluster_uuid: String,

    /// Certificate (PEM encoded).
    pub pem: String,
}

// ============================================================================
// Error types
// ============================================================================

/// Error envelope returned by the service on failure.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

/// A single error entry.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// Human-readable summary of the first error, preferring its detail.
    pub fn message(&self) -> Option<String> {
        let first = self.errors.first()?;
        first
            .detail
            .as_deref()
            .or(first.title.as_deref())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
