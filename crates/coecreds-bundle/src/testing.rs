//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use rcgen::{
    BasicConstraints, Certificate, CertificateParams, DistinguishedName, DnType,
    ExtendedKeyUsagePurpose, IsCa, KeyPair, RemoteKeyPair, SignatureAlgorithm, PKCS_RSA_SHA256,
};
use x509_parser::prelude::*;

use coecreds_core::{
    CertificateAuthority, Cluster, ClusterCertificate, ClusterId, ClusterLookup, ClusterTemplate,
    ClusterTemplateId, RemoteError,
};

/// Cluster lookup backed by maps.
#[derive(Default)]
pub struct FakeLookup {
    clusters: HashMap<ClusterId, Cluster>,
    templates: HashMap<ClusterTemplateId, ClusterTemplate>,
    pub lookups: AtomicUsize,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster running `coe`, with a template of its own.
    pub fn with_cluster(mut self, cluster: Cluster, coe: &str) -> Self {
        let template = ClusterTemplate::new(cluster.cluster_template_id.clone(), coe);
        self.templates.insert(template.id.clone(), template);
        self.clusters.insert(cluster.id.clone(), cluster);
        self
    }
}

#[async_trait]
impl ClusterLookup for FakeLookup {
    async fn get_cluster(&self, id: &ClusterId) -> Result<Cluster, RemoteError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.clusters
            .get(id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("cluster {}", id)))
    }

    async fn get_cluster_template(
        &self,
        id: &ClusterTemplateId,
    ) -> Result<ClusterTemplate, RemoteError> {
        self.templates
            .get(id)
            .cloned()
            .ok_or_else(|| RemoteError::NotFound(format!("cluster template {}", id)))
    }
}

/// Certificate authority that signs CSRs with a throwaway CA.
pub struct FakeAuthority {
    ca_cert: Certificate,
    ca_key: KeyPair,
    /// Fail CA fetches with a transport error.
    pub fail_fetch: Option<String>,
    /// Fail CSR submissions with a transport error.
    pub fail_submit: Option<String>,
    /// Report this cluster ID in responses instead of the requested one.
    pub answer_for: Option<ClusterId>,
    /// Issue certificates for an unrelated key instead of the CSR's.
    pub foreign_key: bool,
    /// Number of CSR submissions received.
    pub submissions: AtomicUsize,
    /// PEM of every certificate issued.
    pub issued: Mutex<Vec<String>>,
}

impl FakeAuthority {
    pub fn new() -> Self {
        let mut params = CertificateParams::default();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, "Test Cluster CA");
        params.distinguished_name = dn;
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);

        let ca_key = KeyPair::generate().unwrap();
        let ca_cert = params.self_signed(&ca_key).unwrap();

        Self {
            ca_cert,
            ca_key,
            fail_fetch: None,
            fail_submit: None,
            answer_for: None,
            foreign_key: false,
            submissions: AtomicUsize::new(0),
            issued: Mutex::new(Vec::new()),
        }
    }

    pub fn ca_pem(&self) -> String {
        self.ca_cert.pem()
    }

    fn reported(&self, requested: &ClusterId) -> ClusterId {
        self.answer_for.clone().unwrap_or_else(|| requested.clone())
    }

    fn sign(&self, csr_pem: &str) -> Result<String, RemoteError> {
        let der = ::pem::parse(csr_pem)
            .map_err(|e| RemoteError::Api {
                status: 400,
                message: e.to_string(),
            })?
            .into_contents();
        let (_, csr) = X509CertificationRequest::from_der(&der).map_err(|e| RemoteError::Api {
            status: 400,
            message: e.to_string(),
        })?;
        csr.verify_signature().map_err(|e| RemoteError::Api {
            status: 400,
            message: e.to_string(),
        })?;

        let subject_key = if self.foreign_key {
            KeyPair::generate().unwrap()
        } else {
            let public_key = csr
                .certification_request_info
                .subject_pki
                .subject_public_key
                .data
                .to_vec();
            KeyPair::from_remote(Box::new(CsrPublicKey(public_key))).unwrap()
        };

        let mut params = CertificateParams::default();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, "coecreds");
        params.distinguished_name = dn;
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ClientAuth];

        let cert = params
            .signed_by(&subject_key, &self.ca_cert, &self.ca_key)
            .unwrap();
        Ok(cert.pem())
    }
}

#[async_trait]
impl CertificateAuthority for FakeAuthority {
    async fn submit_csr(
        &self,
        cluster_id: &ClusterId,
        csr_pem: &str,
    ) -> Result<ClusterCertificate, RemoteError> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = &self.fail_submit {
            return Err(RemoteError::Transport(message.clone()));
        }

        let pem = self.sign(csr_pem)?;
        self.issued.lock().unwrap().push(pem.clone());
        ClusterCertificate::from_pem(self.reported(cluster_id), &pem)
    }

    async fn fetch_ca_certificate(
        &self,
        cluster_id: &ClusterId,
    ) -> Result<ClusterCertificate, RemoteError> {
        if let Some(message) = &self.fail_fetch {
            return Err(RemoteError::Transport(message.clone()));
        }
        ClusterCertificate::from_pem(self.reported(cluster_id), &self.ca_pem())
    }
}

/// Public half of a CSR's RSA key, enough for rcgen to issue a certificate.
struct CsrPublicKey(Vec<u8>);

impl RemoteKeyPair for CsrPublicKey {
    fn public_key(&self) -> &[u8] {
        &self.0
    }

    fn sign(&self, _msg: &[u8]) -> Result<Vec<u8>, rcgen::Error> {
        Err(rcgen::Error::RemoteKeyError)
    }

    fn algorithm(&self) -> &'static SignatureAlgorithm {
        &PKCS_RSA_SHA256
    }
}
