//! Collaborator contracts the bundle generator depends on.
//!
//! Both are scoped to a single remote container-infra service. Retries,
//! timeouts and authentication are the implementor's concern.

use async_trait::async_trait;

use crate::{Cluster, ClusterCertificate, ClusterId, ClusterTemplate, ClusterTemplateId, RemoteError};

/// Read-only access to cluster metadata.
#[async_trait]
pub trait ClusterLookup: Send + Sync {
    /// Fetch a cluster by ID.
    async fn get_cluster(&self, id: &ClusterId) -> Result<Cluster, RemoteError>;

    /// Fetch a cluster template by ID.
    async fn get_cluster_template(
        &self,
        id: &ClusterTemplateId,
    ) -> Result<ClusterTemplate, RemoteError>;
}

/// Certificate authority scoped to one cluster.
#[async_trait]
pub trait CertificateAuthority: Send + Sync {
    /// Submit a PEM-encoded CSR for `cluster_id` and return the signed certificate.
    async fn submit_csr(
        &self,
        cluster_id: &ClusterId,
        csr_pem: &str,
    ) -> Result<ClusterCertificate, RemoteError>;

    /// Fetch the root CA certificate of `cluster_id`.
    async fn fetch_ca_certificate(
        &self,
        cluster_id: &ClusterId,
    ) -> Result<ClusterCertificate, RemoteError>;
}
