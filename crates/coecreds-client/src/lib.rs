//! HTTP client for the container-infra REST API.
//!
//! Implements the `ClusterLookup` and `CertificateAuthority` contracts from
//! `coecreds-core` on top of `reqwest`.

pub mod config;
pub mod error;
pub mod http;
pub mod wire;

pub use config::ClientConfig;
pub use error::ClientError;
pub use http::ContainerInfraClient;
