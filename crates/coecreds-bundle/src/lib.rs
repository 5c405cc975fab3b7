//! Credentials bundle generation for COE clusters.
//!
//! Issues a client certificate for a cluster and packages it, together with
//! the client private key, the cluster CA certificate and engine-specific
//! connection scripts, into a single [`CredentialsBundle`].
//!
//! Pipeline (strictly sequential, fail-fast):
//! 1. Look up the cluster and its template.
//! 2. Generate a fresh RSA key pair and build a CSR from it.
//! 3. Submit the CSR to the cluster CA and fetch the CA certificate.
//! 4. Render connection scripts for the cluster's orchestration engine.

pub mod assembler;
pub mod bundle;
pub mod config;
pub mod crypto;
pub mod error;
pub mod scripts;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::BundleAssembler;
pub use bundle::{CredentialsBundle, IssuedCredential, CA_CERT_FILE, CERT_FILE, KEY_FILE};
pub use config::BundleConfig;
pub use crypto::{ClientKey, CsrBuilder, KeyPairGenerator, SigningRequest};
pub use error::{BundleError, ErrorKind};
pub use scripts::{ScriptRegistry, ScriptWriter, Scripts};
