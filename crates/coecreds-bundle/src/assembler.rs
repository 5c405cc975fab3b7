//! Credentials bundle assembly.

use tracing::{debug, info, warn};

use coecreds_core::{
    CertificateAuthority, ClusterCertificate, ClusterId, ClusterLookup, RemoteError,
};

use crate::bundle::{CredentialsBundle, IssuedCredential};
use crate::config::BundleConfig;
use crate::crypto::{CsrBuilder, KeyPairGenerator};
use crate::scripts::ScriptRegistry;
use crate::BundleError;

/// Assembles credentials bundles from a cluster lookup and a certificate authority.
///
/// Independent bundles may be assembled concurrently; each call owns its key,
/// CSR and certificates until it returns them.
pub struct BundleAssembler<L, C> {
    lookup: L,
    authority: C,
    registry: ScriptRegistry,
    config: BundleConfig,
}

impl<L, C> BundleAssembler<L, C>
where
    L: ClusterLookup,
    C: CertificateAuthority,
{
    /// Create an assembler with the default configuration and script writers.
    pub fn new(lookup: L, authority: C) -> Self {
        Self {
            lookup,
            authority,
            registry: ScriptRegistry::with_defaults(),
            config: BundleConfig::default(),
        }
    }

    /// Builder method to set the configuration.
    pub fn with_config(mut self, config: BundleConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder method to replace the script writers.
    pub fn with_registry(mut self, registry: ScriptRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Generate a credentials bundle for `cluster_id`.
    ///
    /// Steps run strictly in order and the first failure is returned; nothing
    /// produced by earlier steps escapes on error.
    pub async fn assemble(&self, cluster_id: &ClusterId) -> Result<CredentialsBundle, BundleError> {
        self.config.validate()?;

        info!(cluster_id = %cluster_id, "Assembling credentials bundle");

        let cluster = self
            .lookup
            .get_cluster(cluster_id)
            .await
            .map_err(|e| match e {
                RemoteError::NotFound(_) => BundleError::ClusterNotFound(cluster_id.clone()),
                other => BundleError::Remote(other),
            })?;
        ensure_same_cluster(cluster_id, &cluster.id)?;

        if cluster.coe_endpoint.trim().is_empty() {
            warn!(cluster_id = %cluster.id, status = ?cluster.status, "Cluster has no COE endpoint");
            return Err(BundleError::MissingEndpoint(cluster.id));
        }

        debug!(
            cluster_id = %cluster.id,
            status = ?cluster.status,
            template_id = %cluster.cluster_template_id,
            "Cluster found"
        );

        let template = self
            .lookup
            .get_cluster_template(&cluster.cluster_template_id)
            .await?;

        let writer = self.registry.writer_for(&template.coe).map_err(|e| {
            warn!(cluster_id = %cluster.id, coe = %template.coe, "No script writer for orchestration engine");
            e
        })?;

        let credential = self.issue_credential(&cluster.id).await?;

        let ca_certificate = self.authority.fetch_ca_certificate(&cluster.id).await?;
        ensure_certificate_for(&cluster.id, &ca_certificate)?;

        let scripts = writer.render(&cluster)?;

        info!(
            cluster_id = %cluster.id,
            coe = %writer.coe(),
            certificate = %credential.certificate().fingerprint(),
            ca_certificate = %ca_certificate.fingerprint(),
            scripts = scripts.len(),
            "Credentials bundle assembled"
        );

        Ok(CredentialsBundle::new(
            cluster.id.clone(),
            cluster.coe_endpoint.clone(),
            credential,
            ca_certificate,
            scripts,
        ))
    }

    /// Generate a fresh key, have the authority sign a CSR for it, and pair the two.
    async fn issue_credential(&self, cluster_id: &ClusterId) -> Result<IssuedCredential, BundleError> {
        let generator = KeyPairGenerator::new(self.config.key_bits);
        debug!(key_bits = generator.bits(), "Generating client key");

        let key = tokio::task::spawn_blocking(move || generator.generate())
            .await
            .map_err(|e| BundleError::KeyGeneration(format!("key generation task failed: {}", e)))??;

        let csr = CsrBuilder::new(self.config.subject_common_name.as_str()).build(&key)?;

        let certificate = self.authority.submit_csr(cluster_id, csr.pem()).await?;
        ensure_certificate_for(cluster_id, &certificate)?;

        IssuedCredential::pair(&key, csr, certificate)
    }
}

fn ensure_same_cluster(expected: &ClusterId, actual: &ClusterId) -> Result<(), BundleError> {
    if expected != actual {
        warn!(expected = %expected, actual = %actual, "Response is for a different cluster");
        return Err(BundleError::ClusterMismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        });
    }
    Ok(())
}

fn ensure_certificate_for(
    cluster_id: &ClusterId,
    certificate: &ClusterCertificate,
) -> Result<(), BundleError> {
    ensure_same_cluster(cluster_id, &certificate.cluster_id)
}
