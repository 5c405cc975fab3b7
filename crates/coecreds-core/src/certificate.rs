//! Certificates returned by the cluster certificate authority.

use std::fmt;

use pem::{EncodeConfig, LineEnding, Pem};
use sha2::{Digest, Sha256};

use crate::{ClusterId, RemoteError};

/// PEM block type of an X.509 certificate.
pub const CERTIFICATE_PEM_TAG: &str = "CERTIFICATE";

/// A decoded certificate associated with a cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterCertificate {
    /// Cluster the certificate belongs to, as reported by the authority.
    pub cluster_id: ClusterId,

    /// Decoded PEM block.
    pub certificate: Pem,
}

impl ClusterCertificate {
    /// Decode a PEM certificate returned for `cluster_id`.
    ///
    /// Fails on an empty or malformed body, a block that is not a
    /// certificate, or a certificate block with no content.
    pub fn from_pem(cluster_id: impl Into<ClusterId>, pem_str: &str) -> Result<Self, RemoteError> {
        let cluster_id = cluster_id.into();
        let block = pem::parse(pem_str.as_bytes()).map_err(|e| {
            RemoteError::MalformedCertificate(format!("cluster {}: {}", cluster_id, e))
        })?;

        if block.tag() != CERTIFICATE_PEM_TAG {
            return Err(RemoteError::MalformedCertificate(format!(
                "cluster {}: expected PEM block '{}', got '{}'",
                cluster_id,
                CERTIFICATE_PEM_TAG,
                block.tag()
            )));
        }

        if block.contents().is_empty() {
            return Err(RemoteError::MalformedCertificate(format!(
                "cluster {}: certificate block is empty",
                cluster_id
            )));
        }

        Ok(Self {
            cluster_id,
            certificate: block,
        })
    }

    /// DER bytes of the certificate.
    pub fn der(&self) -> &[u8] {
        self.certificate.contents()
    }

    /// PEM encoding of the certificate.
    pub fn to_pem(&self) -> String {
        encode_pem(&self.certificate)
    }

    /// Lowercase hex SHA-256 fingerprint of the DER bytes.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.der())
    }
}

impl fmt::Display for ClusterCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pem())
    }
}

/// Encode a PEM block with Unix line endings.
pub fn encode_pem(block: &Pem) -> String {
    pem::encode_config(block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

/// Lowercase hex SHA-256 digest of `der`.
pub fn fingerprint(der: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(der);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "-----BEGIN CERTIFICATE-----\nMIIBszCCAVmgAwIBAgIUBeJQ\n-----END CERTIFICATE-----\n";

    #[test]
    fn test_decode_certificate() {
        let cert = ClusterCertificate::from_pem("c1", SAMPLE).unwrap();
        assert_eq!(cert.cluster_id.as_str(), "c1");
        assert_eq!(cert.certificate.tag(), CERTIFICATE_PEM_TAG);
        assert!(!cert.der().is_empty());
    }

    #[test]
    fn test_pem_round_trip_preserves_der() {
        let original = ClusterCertificate::from_pem("c1", SAMPLE).unwrap();
        let encoded = original.to_pem();
        let decoded = ClusterCertificate::from_pem("c1", &encoded).unwrap();
        assert_eq!(decoded.der(), original.der());
        assert!(encoded.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(!encoded.contains('\r'));
    }

    #[test]
    fn test_empty_body_is_decode_error() {
        let result = ClusterCertificate::from_pem("c1", "");
        assert!(matches!(result, Err(RemoteError::MalformedCertificate(_))));
    }

    #[test]
    fn test_wrong_block_type_is_decode_error() {
        let body = "-----BEGIN CERTIFICATE REQUEST-----\nMIIBszCC\n-----END CERTIFICATE REQUEST-----\n";
        let result = ClusterCertificate::from_pem("c1", body);
        assert!(matches!(result, Err(RemoteError::MalformedCertificate(_))));
    }

    #[test]
    fn test_fingerprint_is_sha256_hex() {
        let cert = ClusterCertificate::from_pem("c1", SAMPLE).unwrap();
        let fp = cert.fingerprint();
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, fingerprint(cert.der()));
    }
}
