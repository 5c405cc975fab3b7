//! Client key generation and certificate signing requests.

mod asn1;
mod csr;
mod keys;

pub use asn1::{client_auth_extension_value, encode_basic_constraints, CLIENT_AUTH_OID};
pub use csr::{CsrBuilder, SigningRequest, CSR_PEM_TAG};
pub use keys::{ClientKey, KeyPairGenerator, DEFAULT_KEY_BITS, RSA_PRIVATE_KEY_PEM_TAG};
