//! # Hybrid Envelope Protocol
//!
//! One-to-one hybrid encryption: content is encrypted under a per-message
//! symmetric key, and that key is wrapped to the recipient's public key, all
//! serialized into a single self-describing buffer.
//!
//! ## Envelope Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVELOPE LAYOUT                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────────┬────────────┬──────────────────────────────┐  │
//! │  │     wrapped key      │   nonce    │   ciphertext + auth tag      │  │
//! │  │  (modulus size, e.g. │ (12 bytes) │        (variable)            │  │
//! │  │  256 bytes at 2048)  │            │                              │  │
//! │  └──────────────────────┴────────────┴──────────────────────────────┘  │
//! │                                                                         │
//! │  The wrapped-key block is RSA-OAEP output, whose length equals the     │
//! │  recipient's modulus size exactly. Given the recipient's key spec,     │
//! │  the segment boundaries are therefore always unambiguous.              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Rationale
//!
//! Wrapping the symmetric key into the same buffer avoids a second round
//! trip or an external key-distribution channel per message, at the cost of
//! re-wrapping the key for every recipient. Fan-out is the caller's concern:
//! call [`seal_to`] once per recipient.

use tracing::debug;

use crate::config::CryptoConfig;
use crate::encoding;
use crate::error::{Error, Result};
use crate::keys::{AsymmetricKeyPair, KeyUse, Nonce, PublicKey, SymmetricKey, NONCE_SIZE};
use crate::provider::PrimitiveProvider;

/// A sealed message: `wrapped_key ∥ nonce ∥ ciphertext` in one buffer
///
/// Produced once per message, consumed once by the intended recipient.
/// The canonical text form is padded base64 of the whole buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Envelope {
    bytes: Vec<u8>,
}

impl Envelope {
    /// Wrap an already-serialized envelope buffer
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Decode an envelope from its padded-base64 text form
    pub fn from_base64(s: &str) -> Result<Self> {
        Ok(Self {
            bytes: encoding::from_base64(s)?,
        })
    }

    /// The serialized buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume into the serialized buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Encode as the canonical padded-base64 text form
    pub fn to_base64(&self) -> String {
        encoding::to_base64(&self.bytes)
    }

    /// Total serialized length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope").field("len", &self.bytes.len()).finish()
    }
}

/// Seal content to a recipient's public key
///
/// ## Flow
///
/// 1. Use the supplied symmetric key, or request a fresh one from the
///    provider at the config's default length (key reuse is the message
///    re-encryption use case).
/// 2. Encrypt the content under that key with a fresh random nonce.
/// 3. Export the key's raw bytes and wrap them to `recipient` (RSA-OAEP,
///    so the wrapped block length is fixed by the recipient's key size).
/// 4. Concatenate `wrapped ∥ nonce ∥ ciphertext`.
///
/// String content should be passed as its UTF-8 bytes (`str::as_bytes`).
///
/// ## Errors
///
/// `UnsupportedPublicKeyFormat` if `recipient` is not an Exchange-usage
/// key; provider failures propagate unchanged — encryption failures are
/// never transient, so there is no retry.
pub async fn seal_to<P: PrimitiveProvider + ?Sized>(
    provider: &P,
    config: &CryptoConfig,
    content: &[u8],
    recipient: &PublicKey,
    symmetric_key: Option<SymmetricKey>,
) -> Result<Envelope> {
    if recipient.key_use() != KeyUse::Exchange {
        return Err(Error::UnsupportedPublicKeyFormat(
            "recipient key must have Exchange usage".into(),
        ));
    }

    let key = match symmetric_key {
        Some(key) => key,
        None => {
            provider
                .generate_symmetric_key(config.symmetric_key_bytes)
                .await?
        }
    };

    let nonce = Nonce::random();
    let ciphertext = provider.symmetric_encrypt(content, &key, &nonce).await?;
    let wrapped = provider.asymmetric_encrypt(key.export(), recipient).await?;

    debug!(
        content_len = content.len(),
        wrapped_len = wrapped.len(),
        envelope_len = wrapped.len() + NONCE_SIZE + ciphertext.len(),
        "sealed envelope"
    );

    let mut bytes = Vec::with_capacity(wrapped.len() + NONCE_SIZE + ciphertext.len());
    bytes.extend_from_slice(&wrapped);
    bytes.extend_from_slice(nonce.as_bytes());
    bytes.extend_from_slice(&ciphertext);

    Ok(Envelope { bytes })
}

/// Open an envelope with the recipient's keypair
///
/// Splits the buffer at the wrapped-key length fixed by the keypair's
/// modulus size, unwraps the symmetric key, then performs authenticated
/// decryption of the remainder.
///
/// ## Errors
///
/// - `UnsupportedKeyKind` if the keypair is not Exchange-usage
/// - `InvalidEncoding` if the buffer is too short to hold a wrapped key
///   and nonce
/// - `DecryptionFailed` on unwrap or authentication failure; partial or
///   unauthenticated plaintext is never returned
pub async fn open_from<P: PrimitiveProvider + ?Sized>(
    provider: &P,
    envelope: &Envelope,
    recipient: &AsymmetricKeyPair,
) -> Result<Vec<u8>> {
    if recipient.key_use() != KeyUse::Exchange {
        return Err(Error::UnsupportedKeyKind(
            "envelopes are opened with an Exchange-usage keypair".into(),
        ));
    }

    let wrapped_len = recipient.spec().modulus_bytes();
    if envelope.len() < wrapped_len + NONCE_SIZE {
        return Err(Error::InvalidEncoding(format!(
            "envelope is {} bytes, need at least {} for this key size",
            envelope.len(),
            wrapped_len + NONCE_SIZE
        )));
    }

    let (wrapped, rest) = envelope.as_bytes().split_at(wrapped_len);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let key_bytes = provider.asymmetric_decrypt(wrapped, &recipient.private).await?;
    let key = SymmetricKey::from_bytes(&key_bytes)?;

    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(nonce_bytes);

    let content = provider
        .symmetric_decrypt(ciphertext, &key, &Nonce::from_bytes(nonce))
        .await?;

    debug!(content_len = content.len(), "opened envelope");

    Ok(content)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeySpec;
    use crate::provider::SoftwareProvider;

    async fn exchange_pair() -> AsymmetricKeyPair {
        SoftwareProvider::new()
            .generate_keypair(KeySpec::Exchange2048)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_seal_open_round_trip() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"hello", &pair.public, None)
            .await
            .unwrap();
        let content = open_from(&provider, &envelope, &pair).await.unwrap();

        assert_eq!(content, b"hello");
    }

    #[tokio::test]
    async fn test_seal_open_empty_content() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"", &pair.public, None)
            .await
            .unwrap();
        let content = open_from(&provider, &envelope, &pair).await.unwrap();

        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_wrapped_segment_length_is_fixed() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;
        let wrapped_len = pair.spec().modulus_bytes();

        // Tag adds 16 bytes to each ciphertext
        for content in [&b""[..], b"x", &[0u8; 1000][..]] {
            let envelope = seal_to(&provider, &config, content, &pair.public, None)
                .await
                .unwrap();
            assert_eq!(
                envelope.len(),
                wrapped_len + NONCE_SIZE + content.len() + 16
            );
        }
    }

    #[tokio::test]
    async fn test_tampered_ciphertext_fails() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"hello", &pair.public, None)
            .await
            .unwrap();

        // Flip one bit in the ciphertext segment
        let mut bytes = envelope.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;

        let result = open_from(&provider, &Envelope::from_bytes(bytes), &pair).await;
        assert!(matches!(result, Err(Error::DecryptionFailed(_))));
    }

    #[tokio::test]
    async fn test_tampered_wrapped_key_fails() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"hello", &pair.public, None)
            .await
            .unwrap();

        // Flip one bit in the wrapped-key segment
        let mut bytes = envelope.into_bytes();
        bytes[0] ^= 0x01;

        let result = open_from(&provider, &Envelope::from_bytes(bytes), &pair).await;
        assert!(matches!(result, Err(Error::DecryptionFailed(_))));
    }

    #[tokio::test]
    async fn test_wrong_recipient_fails() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let alice = exchange_pair().await;
        let bob = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"for alice", &alice.public, None)
            .await
            .unwrap();

        let result = open_from(&provider, &envelope, &bob).await;
        assert!(matches!(result, Err(Error::DecryptionFailed(_))));
    }

    #[tokio::test]
    async fn test_seal_to_sign_key_is_rejected() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let sign_pair = provider.generate_keypair(KeySpec::Sign2048).await.unwrap();

        let result = seal_to(&provider, &config, b"hello", &sign_pair.public, None).await;
        assert!(matches!(result, Err(Error::UnsupportedPublicKeyFormat(_))));
    }

    #[tokio::test]
    async fn test_open_with_sign_keypair_is_rejected() {
        let provider = SoftwareProvider::new();
        let sign_pair = provider.generate_keypair(KeySpec::Sign2048).await.unwrap();
        let envelope = Envelope::from_bytes(vec![0u8; 300]);

        let result = open_from(&provider, &envelope, &sign_pair).await;
        assert!(matches!(result, Err(Error::UnsupportedKeyKind(_))));
    }

    #[tokio::test]
    async fn test_short_buffer_is_rejected() {
        let provider = SoftwareProvider::new();
        let pair = exchange_pair().await;
        let envelope = Envelope::from_bytes(vec![0u8; 64]);

        let result = open_from(&provider, &envelope, &pair).await;
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_caller_supplied_key_is_used() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let key = SymmetricKey::from_bytes(&[9u8; 32]).unwrap();
        let envelope = seal_to(&provider, &config, b"reused key", &pair.public, Some(key))
            .await
            .unwrap();

        // The envelope still opens normally
        let content = open_from(&provider, &envelope, &pair).await.unwrap();
        assert_eq!(content, b"reused key");

        // And the wrapped segment decrypts to exactly the supplied key bytes
        let wrapped = &envelope.as_bytes()[..pair.spec().modulus_bytes()];
        let unwrapped = provider
            .asymmetric_decrypt(wrapped, &pair.private)
            .await
            .unwrap();
        assert_eq!(unwrapped, [9u8; 32]);
    }

    #[tokio::test]
    async fn test_base64_text_form_round_trip() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = exchange_pair().await;

        let envelope = seal_to(&provider, &config, b"hello", &pair.public, None)
            .await
            .unwrap();

        let text = envelope.to_base64();
        let restored = Envelope::from_base64(&text).unwrap();
        assert_eq!(restored, envelope);

        let content = open_from(&provider, &restored, &pair).await.unwrap();
        assert_eq!(content, b"hello");
    }
}
