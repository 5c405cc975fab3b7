//! Cluster and cluster template types.
//!
//! These are read-only inputs supplied by the cluster lookup collaborator.
//! Field names follow the container-infra REST representation.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ClusterId, ClusterStatus, ClusterTemplateId};

/// A container orchestration engine (COE) cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Cluster UUID.
    #[serde(rename = "uuid")]
    pub id: ClusterId,

    /// Human-readable name. Might not be unique.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Current lifecycle state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ClusterStatus,

    /// Additional information on the status, such as why the cluster failed.
    #[serde(default)]
    pub status_reason: Option<String>,

    /// Template the cluster was created from.
    #[serde(rename = "cluster_template_id", alias = "clustertemplate_id")]
    pub cluster_template_id: ClusterTemplateId,

    /// URL of the COE API.
    #[serde(rename = "api_address", default, deserialize_with = "null_as_default")]
    pub coe_endpoint: String,

    /// Number of master nodes.
    #[serde(rename = "master_count", default, deserialize_with = "null_as_default")]
    pub masters: u32,

    /// Number of worker nodes.
    #[serde(rename = "node_count", default, deserialize_with = "null_as_default")]
    pub nodes: u32,

    /// IP addresses of the master nodes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub master_addresses: Vec<String>,

    /// IP addresses of the worker nodes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub node_addresses: Vec<String>,

    /// Version of the Docker client compatible with the cluster.
    #[serde(default)]
    pub container_version: Option<String>,

    /// Version of the orchestration engine running on the cluster.
    #[serde(default)]
    pub coe_version: Option<String>,
}

impl Cluster {
    /// Create a cluster with the minimal fields needed to issue credentials.
    pub fn new(
        id: impl Into<ClusterId>,
        cluster_template_id: impl Into<ClusterTemplateId>,
        coe_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            status: ClusterStatus::default(),
            status_reason: None,
            cluster_template_id: cluster_template_id.into(),
            coe_endpoint: coe_endpoint.into(),
            masters: 0,
            nodes: 0,
            master_addresses: Vec::new(),
            node_addresses: Vec::new(),
            container_version: None,
            coe_version: None,
        }
    }

    /// Builder method to set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: ClusterStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to set the compatible container client version.
    pub fn with_container_version(mut self, version: impl Into<String>) -> Self {
        self.container_version = Some(version.into());
        self
    }

    /// Name to use when the cluster is referenced from client configuration.
    ///
    /// Falls back to the cluster ID when the cluster has no name.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }
}

/// Template describing how a cluster is built.
///
/// Only the fields needed to pick a script writer are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterTemplate {
    /// Template UUID.
    #[serde(rename = "uuid")]
    pub id: ClusterTemplateId,

    /// Human-readable name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Orchestration engine identifier (e.g., "kubernetes", "swarm").
    pub coe: String,
}

impl ClusterTemplate {
    /// Create a new ClusterTemplate.
    pub fn new(id: impl Into<ClusterTemplateId>, coe: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            coe: coe.into(),
        }
    }
}

/// Decode `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
