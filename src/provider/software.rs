//! In-process primitive provider.
//!
//! Backed by well-audited pure-Rust implementations:
//!
//! | Operation | Algorithm | Crate |
//! |-----------|-----------|-------|
//! | Key wrapping | RSA-OAEP-SHA256 | `rsa` |
//! | Signatures | RSA-PSS-SHA256 | `rsa` |
//! | Content encryption | AES-128/256-GCM | `aes-gcm` |
//! | Hashing | SHA-256 | `sha2` |
//! | Randomness | OS CSPRNG | `rand` |
//!
//! OAEP output (the wrapped-key block) and PSS signatures are always exactly
//! the modulus size of the key in use, which is what makes envelope buffer
//! boundaries unambiguous.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce as AesNonce};
use async_trait::async_trait;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pss::{BlindedSigningKey, Signature as PssSignature, VerifyingKey};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{Oaep, RsaPrivateKey};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::keys::{
    AsymmetricKeyPair, KeySpec, KeyUse, Nonce, PrivateKey, PublicKey, SymmetricKey,
    ACCEPTED_SYMMETRIC_KEY_SIZES,
};
use crate::provider::PrimitiveProvider;

/// Default in-process [`PrimitiveProvider`]
///
/// Stateless and `Send + Sync`; a single instance can serve any number of
/// concurrent operations.
#[derive(Debug, Clone, Default)]
pub struct SoftwareProvider;

impl SoftwareProvider {
    /// Create a new provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PrimitiveProvider for SoftwareProvider {
    async fn generate_keypair(&self, spec: KeySpec) -> Result<AsymmetricKeyPair> {
        let private = RsaPrivateKey::new(&mut OsRng, spec.modulus_bits())
            .map_err(|e| Error::ProviderFailure(format!("RSA key generation failed: {}", e)))?;
        let public = PublicKey::from_rsa(private.to_public_key(), spec)?;

        Ok(AsymmetricKeyPair {
            public,
            private: PrivateKey::from_rsa(private, spec),
        })
    }

    async fn generate_symmetric_key(&self, len_bytes: usize) -> Result<SymmetricKey> {
        if !ACCEPTED_SYMMETRIC_KEY_SIZES.contains(&len_bytes) {
            return Err(Error::InvalidKeyLength { got: len_bytes });
        }
        let mut bytes = vec![0u8; len_bytes];
        OsRng.fill_bytes(&mut bytes);
        SymmetricKey::from_bytes(&bytes)
    }

    async fn asymmetric_encrypt(&self, plaintext: &[u8], public: &PublicKey) -> Result<Vec<u8>> {
        if public.key_use() != KeyUse::Exchange {
            return Err(Error::UnsupportedPublicKeyFormat(
                "a Sign-usage key cannot be a wrap target".into(),
            ));
        }

        public
            .inner
            .encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
            .map_err(|e| Error::ProviderFailure(format!("OAEP encryption failed: {}", e)))
    }

    async fn asymmetric_decrypt(&self, ciphertext: &[u8], private: &PrivateKey) -> Result<Vec<u8>> {
        if private.spec().key_use() != KeyUse::Exchange {
            return Err(Error::UnsupportedKeyKind(
                "a Sign-usage key cannot unwrap".into(),
            ));
        }

        private
            .inner
            .decrypt(Oaep::new::<Sha256>(), ciphertext)
            .map_err(|_| Error::DecryptionFailed("key unwrap failed".into()))
    }

    async fn symmetric_encrypt(
        &self,
        plaintext: &[u8],
        key: &SymmetricKey,
        nonce: &Nonce,
    ) -> Result<Vec<u8>> {
        let nonce = AesNonce::from_slice(nonce.as_bytes());
        let result = match key.len() {
            16 => Aes128Gcm::new_from_slice(key.export())
                .map_err(|e| Error::ProviderFailure(format!("invalid AES key: {}", e)))?
                .encrypt(nonce, plaintext),
            _ => Aes256Gcm::new_from_slice(key.export())
                .map_err(|e| Error::ProviderFailure(format!("invalid AES key: {}", e)))?
                .encrypt(nonce, plaintext),
        };

        result.map_err(|e| Error::ProviderFailure(format!("AES-GCM encryption failed: {}", e)))
    }

    async fn symmetric_decrypt(
        &self,
        ciphertext: &[u8],
        key: &SymmetricKey,
        nonce: &Nonce,
    ) -> Result<Vec<u8>> {
        let nonce = AesNonce::from_slice(nonce.as_bytes());
        let result = match key.len() {
            16 => Aes128Gcm::new_from_slice(key.export())
                .map_err(|e| Error::ProviderFailure(format!("invalid AES key: {}", e)))?
                .decrypt(nonce, ciphertext),
            _ => Aes256Gcm::new_from_slice(key.export())
                .map_err(|e| Error::ProviderFailure(format!("invalid AES key: {}", e)))?
                .decrypt(nonce, ciphertext),
        };

        result.map_err(|_| Error::DecryptionFailed("authentication tag mismatch".into()))
    }

    async fn sign(&self, message: &[u8], private: &PrivateKey) -> Result<Vec<u8>> {
        if private.spec().key_use() != KeyUse::Sign {
            return Err(Error::UnsupportedKeyKind(
                "an Exchange-usage key cannot sign".into(),
            ));
        }

        let signing_key = BlindedSigningKey::<Sha256>::new(private.inner.clone());
        let signature = signing_key.sign_with_rng(&mut OsRng, message);
        Ok(signature.to_vec())
    }

    async fn verify(&self, message: &[u8], signature: &[u8], public: &PublicKey) -> Result<bool> {
        if public.key_use() != KeyUse::Sign {
            return Err(Error::UnsupportedKeyKind(
                "an Exchange-usage key cannot verify signatures".into(),
            ));
        }

        // A signature of the wrong shape is a failed verification, not a
        // provider failure
        let signature = match PssSignature::try_from(signature) {
            Ok(sig) => sig,
            Err(_) => return Ok(false),
        };

        let verifying_key = VerifyingKey::<Sha256>::new(public.inner.clone());
        Ok(verifying_key.verify(message, &signature).is_ok())
    }

    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>> {
        Ok(Sha256::digest(data).to_vec())
    }
}

// ============================================================================
// TESTS
// ============================================================================
