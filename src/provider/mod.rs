//! # Primitive Provider
//!
//! The capability interface the core uses for all cryptographic math.
//!
//! The core never implements a cipher, signature, or hash itself: it holds
//! key handles and asks a [`PrimitiveProvider`] to operate on them. Private
//! keys stay opaque — the provider is the only component that can exercise
//! them.
//!
//! Every operation is async from the caller's perspective; core functions
//! that call the provider are therefore suspension points that propagate the
//! provider's completion or failure upward. No timeouts or cancellation are
//! imposed at this layer.
//!
//! [`SoftwareProvider`] is the default in-process implementation, backed by
//! pure-Rust RSA, AES-GCM, and SHA-256.

mod software;

pub use software::SoftwareProvider;

use async_trait::async_trait;

use crate::error::Result;
use crate::keys::{AsymmetricKeyPair, KeySpec, Nonce, PrivateKey, PublicKey, SymmetricKey};

/// Capability set for primitive cryptographic operations
///
/// Implementations enforce key-use isolation: handing an Exchange key to
/// `sign`, or a Sign key to `asymmetric_encrypt`, fails deterministically.
#[async_trait]
pub trait PrimitiveProvider: Send + Sync {
    /// Generate a fresh asymmetric keypair for the given spec
    async fn generate_keypair(&self, spec: KeySpec) -> Result<AsymmetricKeyPair>;

    /// Generate a fresh random symmetric key of `len_bytes` bytes
    async fn generate_symmetric_key(&self, len_bytes: usize) -> Result<SymmetricKey>;

    /// Encrypt bytes to an Exchange-usage public key (key wrapping)
    async fn asymmetric_encrypt(&self, plaintext: &[u8], public: &PublicKey) -> Result<Vec<u8>>;

    /// Decrypt bytes with an Exchange-usage private key (key unwrapping)
    async fn asymmetric_decrypt(&self, ciphertext: &[u8], private: &PrivateKey) -> Result<Vec<u8>>;

    /// Authenticated symmetric encryption; returns ciphertext with auth tag
    async fn symmetric_encrypt(
        &self,
        plaintext: &[u8],
        key: &SymmetricKey,
        nonce: &Nonce,
    ) -> Result<Vec<u8>>;

    /// Authenticated symmetric decryption; fails on any tag mismatch
    async fn symmetric_decrypt(
        &self,
        ciphertext: &[u8],
        key: &SymmetricKey,
        nonce: &Nonce,
    ) -> Result<Vec<u8>>;

    /// Sign a message with a Sign-usage private key
    async fn sign(&self, message: &[u8], private: &PrivateKey) -> Result<Vec<u8>>;

    /// Verify a signature against a Sign-usage public key
    ///
    /// A well-formed but non-matching signature is `Ok(false)`; handing the
    /// wrong kind of key is an error.
    async fn verify(&self, message: &[u8], signature: &[u8], public: &PublicKey) -> Result<bool>;

    /// Cryptographic hash of the input
    async fn hash(&self, data: &[u8]) -> Result<Vec<u8>>;
}
