//! Certificate signing request construction.

use rcgen::{CertificateParams, CustomExtension, DistinguishedName, DnType};
use tracing::debug;

use super::asn1::{client_auth_extension_value, CLIENT_AUTH_OID};
use super::keys::ClientKey;
use crate::BundleError;

/// PEM block type of a PKCS#10 certificate signing request.
pub const CSR_PEM_TAG: &str = "CERTIFICATE REQUEST";

/// A signed PKCS#10 certificate signing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pem: String,
    der: Vec<u8>,
}

impl SigningRequest {
    /// PEM encoding (block type `CERTIFICATE REQUEST`).
    pub fn pem(&self) -> &str {
        &self.pem
    }

    /// DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

/// Builds client-authentication CSRs.
#[derive(Debug, Clone)]
pub struct CsrBuilder {
    common_name: String,
}

impl CsrBuilder {
    /// Create a builder that puts `common_name` in the CSR subject.
    pub fn new(common_name: impl Into<String>) -> Self {
        Self {
            common_name: common_name.into(),
        }
    }

    /// Build and sign a CSR for `key`.
    ///
    /// The key is validated before anything is signed. The request carries the
    /// client-auth extension and is signed with SHA-256 RSA.
    pub fn build(&self, key: &ClientKey) -> Result<SigningRequest, BundleError> {
        key.validate()?;
        let signing_key = key.signing_key()?;

        let mut params = CertificateParams::default();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, self.common_name.clone());
        params.distinguished_name = dn;
        params.custom_extensions = vec![CustomExtension::from_oid_content(
            CLIENT_AUTH_OID,
            client_auth_extension_value(),
        )];

        let csr = params
            .serialize_request(&signing_key)
            .map_err(|e| BundleError::Encoding(format!("failed to create CSR: {}", e)))?;

        let pem = csr
            .pem()
            .map_err(|e| BundleError::Encoding(format!("failed to encode CSR as PEM: {}", e)))?;

        debug!(
            common_name = %self.common_name,
            key_bits = key.bits(),
            "Built certificate signing request"
        );

        Ok(SigningRequest {
            pem,
            der: csr.der().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::tests::shared_key;
    use rand::rngs::OsRng;
    use rsa::RsaPrivateKey;
    use x509_parser::oid_registry::OID_PKCS1_SHA256WITHRSA;
    use x509_parser::prelude::*;

    /// extnID OID 1.3.6.1.5.5.7.3.2 followed by extnValue OCTET STRING { 30 03 01 01 ff }.
    const CLIENT_AUTH_EXTENSION_DER: &[u8] = &[
        0x06, 0x08, 0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02, 0x04, 0x05, 0x30, 0x03, 0x01,
        0x01, 0xff,
    ];

    fn build() -> SigningRequest {
        CsrBuilder::new("coecreds").build(shared_key()).unwrap()
    }

    #[test]
    fn test_csr_pem_block_type() {
        let csr = build();
        assert!(csr
            .pem()
            .starts_with("-----BEGIN CERTIFICATE REQUEST-----"));
        let parsed = ::pem::parse(csr.pem()).unwrap();
        assert_eq!(parsed.tag(), CSR_PEM_TAG);
        assert_eq!(parsed.contents(), csr.der());
    }

    #[test]
    fn test_csr_signature_verifies_against_key() {
        let csr = build();
        let (_, parsed) = X509CertificationRequest::from_der(csr.der()).unwrap();

        parsed.verify_signature().unwrap();

        let spki = &parsed.certification_request_info.subject_pki;
        assert_eq!(
            &*spki.subject_public_key.data,
            shared_key().public_key_der().unwrap().as_slice()
        );
        assert_eq!(
            parsed.signature_algorithm.algorithm,
            OID_PKCS1_SHA256WITHRSA
        );
    }

    #[test]
    fn test_csr_subject() {
        let csr = build();
        let (_, parsed) = X509CertificationRequest::from_der(csr.der()).unwrap();
        let cn = parsed
            .certification_request_info
            .subject
            .iter_common_name()
            .next()
            .unwrap()
            .as_str()
            .unwrap();
        assert_eq!(cn, "coecreds");
    }

    #[test]
    fn test_csr_carries_client_auth_extension() {
        let csr = build();
        assert!(csr
            .der()
            .windows(CLIENT_AUTH_EXTENSION_DER.len())
            .any(|w| w == CLIENT_AUTH_EXTENSION_DER));
    }

    #[test]
    fn test_short_key_is_rejected_before_signing() {
        let key = ClientKey::from_rsa(RsaPrivateKey::new(&mut OsRng, 512).unwrap());

        let result = CsrBuilder::new("coecreds").build(&key);

        assert!(matches!(
            result,
            Err(BundleError::InvalidKey(msg)) if msg.starts_with("modulus must be at least")
        ));
    }
}
