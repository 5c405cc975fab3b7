//! RSA client key generation.

use pem::Pem;
use rand::rngs::OsRng;
use rcgen::{KeyPair, PKCS_RSA_SHA256};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey};

use crate::config::MIN_KEY_BITS;
use crate::BundleError;

/// Modulus size used for long-lived client authentication keys.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// PEM block type of a PKCS#1 RSA private key.
pub const RSA_PRIVATE_KEY_PEM_TAG: &str = "RSA PRIVATE KEY";

/// Generates fresh client key pairs from the operating system RNG.
#[derive(Debug, Clone, Copy)]
pub struct KeyPairGenerator {
    bits: usize,
}

impl Default for KeyPairGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_BITS)
    }
}

impl KeyPairGenerator {
    /// Create a generator for `bits`-bit RSA keys.
    pub fn new(bits: usize) -> Self {
        Self { bits }
    }

    /// Modulus size of generated keys.
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Generate a new key pair.
    ///
    /// CPU bound; takes seconds for 4096-bit keys.
    pub fn generate(&self) -> Result<ClientKey, BundleError> {
        let key = RsaPrivateKey::new(&mut OsRng, self.bits)
            .map_err(|e| BundleError::KeyGeneration(e.to_string()))?;
        let key = ClientKey::from_rsa(key);
        key.validate()?;
        Ok(key)
    }
}

/// An RSA client key pair.
///
/// Never serialized except into the bundle it was generated for.
pub struct ClientKey {
    inner: RsaPrivateKey,
}

impl ClientKey {
    /// Wrap existing RSA key material.
    pub fn from_rsa(key: RsaPrivateKey) -> Self {
        Self { inner: key }
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.inner.n().bits()
    }

    /// Check that both the private exponent and the public modulus are populated,
    /// consistent with each other, and large enough for client authentication.
    pub fn validate(&self) -> Result<(), BundleError> {
        check_components(self.inner.n(), self.inner.d())?;
        if self.bits() < MIN_KEY_BITS {
            return Err(BundleError::InvalidKey(format!(
                "modulus must be at least {} bits, got {}",
                MIN_KEY_BITS,
                self.bits()
            )));
        }
        self.inner
            .validate()
            .map_err(|e| BundleError::InvalidKey(e.to_string()))
    }

    /// PKCS#1 DER encoding of the public key, as carried in a certificate's
    /// subject public key bit string.
    pub fn public_key_der(&self) -> Result<Vec<u8>, BundleError> {
        let doc = self
            .inner
            .to_public_key()
            .to_pkcs1_der()
            .map_err(|e| BundleError::Encoding(format!("failed to encode public key: {}", e)))?;
        Ok(doc.as_bytes().to_vec())
    }

    /// PKCS#1 private key as a PEM block of type `RSA PRIVATE KEY`.
    pub fn to_private_key_pem(&self) -> Result<Pem, BundleError> {
        let doc = self
            .inner
            .to_pkcs1_der()
            .map_err(|e| BundleError::Encoding(format!("failed to encode private key: {}", e)))?;
        Ok(Pem::new(RSA_PRIVATE_KEY_PEM_TAG, doc.as_bytes().to_vec()))
    }

    /// rcgen signing key backed by the same key material.
    pub(crate) fn signing_key(&self) -> Result<KeyPair, BundleError> {
        let pkcs8 = self
            .inner
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| BundleError::Encoding(format!("failed to encode private key: {}", e)))?;

        KeyPair::from_pem_and_sign_algo(&pkcs8, &PKCS_RSA_SHA256)
            .map_err(|e| BundleError::InvalidKey(format!("key rejected by signer: {}", e)))
    }
}

fn check_components(modulus: &BigUint, private_exponent: &BigUint) -> Result<(), BundleError> {
    if private_exponent.bits() == 0 {
        return Err(BundleError::InvalidKey(
            "private exponent is empty".to_string(),
        ));
    }

    if modulus.bits() == 0 {
        return Err(BundleError::InvalidKey("public modulus is empty".to_string()));
    }

    Ok(())
}
