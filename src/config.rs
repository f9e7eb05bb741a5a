//! # Configuration
//!
//! Explicit configuration for key generation and envelope operations.
//!
//! There is no process-wide default: every call that generates a key takes a
//! [`CryptoConfig`] value, so behavior is reproducible without relying on
//! ambient state.

use crate::error::Result;
use crate::keys::{KeySpec, KeyUse, DEFAULT_SYMMETRIC_KEY_SIZE};

/// Algorithm and size defaults threaded into key generation and sealing
///
/// ## Defaults
///
/// | Setting | Default |
/// |---------|---------|
/// | `modulus_bits` | 2048 |
/// | `symmetric_key_bytes` | 32 (AES-256) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoConfig {
    /// RSA modulus size for generated keypairs (2048 or 4096)
    pub modulus_bits: usize,
    /// Symmetric key size in bytes for fresh per-message keys (16 or 32)
    pub symmetric_key_bytes: usize,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            modulus_bits: 2048,
            symmetric_key_bytes: DEFAULT_SYMMETRIC_KEY_SIZE,
        }
    }
}

impl CryptoConfig {
    /// The spec for a fresh exchange keypair under this config
    ///
    /// Fails with `UnsupportedAlgorithm` if `modulus_bits` has no variant.
    pub fn exchange_spec(&self) -> Result<KeySpec> {
        KeySpec::from_parts(KeyUse::Exchange, self.modulus_bits)
    }

    /// The spec for a fresh signing keypair under this config
    pub fn sign_spec(&self) -> Result<KeySpec> {
        KeySpec::from_parts(KeyUse::Sign, self.modulus_bits)
    }
}
