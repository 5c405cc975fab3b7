//! Bundle generation configuration.

use crate::crypto::DEFAULT_KEY_BITS;
use crate::BundleError;

/// Smallest RSA modulus accepted for client keys.
pub const MIN_KEY_BITS: usize = 2048;

/// Largest RSA modulus accepted for client keys; the CSR signer refuses
/// anything bigger.
pub const MAX_KEY_BITS: usize = 4096;

/// Bundle generation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    /// RSA modulus size of generated client keys.
    pub key_bits: usize,

    /// Common name placed in the subject of every CSR.
    pub subject_common_name: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
            subject_common_name: "coecreds".to_string(),
        }
    }
}

impl BundleConfig {
    /// Check that the configuration cannot produce weak or anonymous credentials.
    pub fn validate(&self) -> Result<(), BundleError> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&self.key_bits) {
            return Err(BundleError::InvalidConfig(format!(
                "key_bits must be between {} and {}, got {}",
                MIN_KEY_BITS, MAX_KEY_BITS, self.key_bits
            )));
        }

        if self.subject_common_name.trim().is_empty() {
            return Err(BundleError::InvalidConfig(
                "subject_common_name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
