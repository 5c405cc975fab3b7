//! coecreds Core Domain Types
//!
//! This crate contains the domain types shared by the bundle generator and
//! its collaborators, with no dependencies on:
//! - Network/HTTP
//! - Cryptographic key generation
//! - Runtime specifics
//!
//! The collaborator contracts (`ClusterLookup`, `CertificateAuthority`) live
//! here so that transports can implement them without pulling in the
//! bundle machinery.

pub mod certificate;
pub mod cluster;
pub mod error;
pub mod ids;
pub mod service;
pub mod status;

// Re-export commonly used types
pub use certificate::{encode_pem, fingerprint, ClusterCertificate, CERTIFICATE_PEM_TAG};
pub use cluster::{Cluster, ClusterTemplate};
pub use error::RemoteError;
pub use ids::{ClusterId, ClusterTemplateId};
pub use service::{CertificateAuthority, ClusterLookup};
pub use status::ClusterStatus;
