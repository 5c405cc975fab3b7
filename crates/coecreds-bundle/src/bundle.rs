//! The credentials bundle and the key/certificate pairing it carries.

use std::collections::BTreeMap;
use std::fmt;

use ::pem::Pem;
use x509_parser::prelude::*;

use coecreds_core::{encode_pem, ClusterCertificate, ClusterId};

use crate::crypto::{ClientKey, SigningRequest};
use crate::scripts::Scripts;
use crate::BundleError;

/// File name of the cluster CA certificate inside a bundle.
pub const CA_CERT_FILE: &str = "ca.pem";

/// File name of the client certificate inside a bundle.
pub const CERT_FILE: &str = "cert.pem";

/// File name of the client private key inside a bundle.
pub const KEY_FILE: &str = "key.pem";

/// A client private key, the CSR built from it, and the certificate the
/// authority issued for that CSR.
///
/// Only constructible by checking that the certificate carries the key's
/// public component, so the three can never drift apart.
#[derive(Clone)]
pub struct IssuedCredential {
    private_key: Pem,
    csr: SigningRequest,
    certificate: ClusterCertificate,
}

impl IssuedCredential {
    /// Pair `certificate` with the key it was requested for.
    pub(crate) fn pair(
        key: &ClientKey,
        csr: SigningRequest,
        certificate: ClusterCertificate,
    ) -> Result<Self, BundleError> {
        let (_, issued) = X509Certificate::from_der(certificate.der()).map_err(|e| {
            BundleError::Encoding(format!("failed to parse issued certificate: {}", e))
        })?;

        let expected = key.public_key_der()?;
        if &*issued.public_key().subject_public_key.data != expected.as_slice() {
            return Err(BundleError::KeyMismatch(certificate.cluster_id.clone()));
        }

        Ok(Self {
            private_key: key.to_private_key_pem()?,
            csr,
            certificate,
        })
    }

    /// Client private key (`RSA PRIVATE KEY`).
    pub fn private_key(&self) -> &Pem {
        &self.private_key
    }

    /// CSR the certificate was issued for.
    pub fn csr(&self) -> &SigningRequest {
        &self.csr
    }

    /// Signed client certificate.
    pub fn certificate(&self) -> &ClusterCertificate {
        &self.certificate
    }
}

impl fmt::Debug for IssuedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedCredential")
            .field("private_key", &"<redacted>")
            .field("certificate", &self.certificate.fingerprint())
            .finish()
    }
}

/// Everything needed to authenticate to a cluster's COE endpoint.
///
/// Built in one piece by [`crate::BundleAssembler`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct CredentialsBundle {
    cluster_id: ClusterId,
    coe_endpoint: String,
    credential: IssuedCredential,
    ca_certificate: ClusterCertificate,
    scripts: Scripts,
}

impl CredentialsBundle {
    pub(crate) fn new(
        cluster_id: ClusterId,
        coe_endpoint: String,
        credential: IssuedCredential,
        ca_certificate: ClusterCertificate,
        scripts: Scripts,
    ) -> Self {
        Self {
            cluster_id,
            coe_endpoint,
            credential,
            ca_certificate,
            scripts,
        }
    }

    pub fn cluster_id(&self) -> &ClusterId {
        &self.cluster_id
    }

    pub fn coe_endpoint(&self) -> &str {
        &self.coe_endpoint
    }

    /// Signed client certificate.
    pub fn certificate(&self) -> &Pem {
        &self.credential.certificate.certificate
    }

    /// Client private key.
    pub fn private_key(&self) -> &Pem {
        &self.credential.private_key
    }

    /// Cluster CA certificate.
    pub fn ca_certificate(&self) -> &Pem {
        &self.ca_certificate.certificate
    }

    /// Connection scripts, keyed by file name.
    pub fn scripts(&self) -> &Scripts {
        &self.scripts
    }

    /// The key, CSR and certificate triple.
    pub fn credential(&self) -> &IssuedCredential {
        &self.credential
    }

    /// Every file of the bundle keyed by file name: the scripts plus
    /// [`CA_CERT_FILE`], [`CERT_FILE`] and [`KEY_FILE`].
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        let mut files = self.scripts.clone();
        files.insert(
            CA_CERT_FILE.to_string(),
            encode_pem(self.ca_certificate()).into_bytes(),
        );
        files.insert(
            CERT_FILE.to_string(),
            encode_pem(self.certificate()).into_bytes(),
        );
        files.insert(
            KEY_FILE.to_string(),
            encode_pem(self.private_key()).into_bytes(),
        );
        files
    }
}
