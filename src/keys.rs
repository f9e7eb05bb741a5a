//! # Key Handles & Key Codec
//!
//! Key types for the Veil crypto core and the codec between in-memory
//! handles and portable byte/string forms.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  AsymmetricKeyPair ── one per identity per usage                        │
//! │  ├── PublicKey      exportable as SPKI DER, feeds the identifier codec  │
//! │  └── PrivateKey     opaque handle, never exportable                     │
//! │                                                                         │
//! │  SymmetricKey ────── fresh per message (or caller-supplied for reuse)   │
//! │                      exportable as raw bytes, no attached metadata      │
//! │                                                                         │
//! │  Nonce ───────────── 96-bit random, one per symmetric encryption        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage Isolation
//!
//! A keypair's [`KeyUse`] fixes which operations are legal: an Exchange key
//! may never sign, a Sign key may never wrap a symmetric key. The supported
//! algorithm×usage×size combinations form the closed [`KeySpec`] enum —
//! adding an algorithm means adding a variant, not patching branches.
//!
//! ## Exportability
//!
//! Only symmetric keys and public keys have byte accessors. [`PrivateKey`]
//! exposes none at all; the core holds it as a capability and can only ask
//! the primitive provider to decrypt or sign with it.

use rand::rngs::OsRng;
use rand::RngCore;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

use crate::encoding;
use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Symmetric key lengths the codec accepts, in bytes (AES-128 / AES-256)
pub const ACCEPTED_SYMMETRIC_KEY_SIZES: [usize; 2] = [16, 32];

/// Default symmetric key size in bytes (256 bits)
pub const DEFAULT_SYMMETRIC_KEY_SIZE: usize = 32;

// ============================================================================
// KEY USE & SPEC
// ============================================================================

/// What a keypair is for — key exchange (encryption) or signing, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyUse {
    /// RSA-OAEP key wrapping (hybrid encryption)
    Exchange,
    /// RSA-PSS signatures
    Sign,
}

impl std::fmt::Display for KeyUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyUse::Exchange => write!(f, "Exchange"),
            KeyUse::Sign => write!(f, "Sign"),
        }
    }
}

/// A supported algorithm×usage×size combination
///
/// Each variant carries a fixed identifier tag and exact byte-length
/// contracts (modulus size, SPKI length), so decoding an identifier can
/// validate the key material it declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySpec {
    /// RSA-OAEP-SHA256, 2048-bit modulus, key exchange
    Exchange2048,
    /// RSA-OAEP-SHA256, 4096-bit modulus, key exchange
    Exchange4096,
    /// RSA-PSS-SHA256, 2048-bit modulus, signing
    Sign2048,
    /// RSA-PSS-SHA256, 4096-bit modulus, signing
    Sign4096,
}

impl KeySpec {
    /// All supported specs, in tag-match order
    pub const ALL: [KeySpec; 4] = [
        KeySpec::Exchange2048,
        KeySpec::Exchange4096,
        KeySpec::Sign2048,
        KeySpec::Sign4096,
    ];

    /// The key usage this spec fixes
    pub const fn key_use(&self) -> KeyUse {
        match self {
            KeySpec::Exchange2048 | KeySpec::Exchange4096 => KeyUse::Exchange,
            KeySpec::Sign2048 | KeySpec::Sign4096 => KeyUse::Sign,
        }
    }

    /// Modulus size in bits
    pub const fn modulus_bits(&self) -> usize {
        match self {
            KeySpec::Exchange2048 | KeySpec::Sign2048 => 2048,
            KeySpec::Exchange4096 | KeySpec::Sign4096 => 4096,
        }
    }

    /// Modulus size in bytes
    ///
    /// This is also the exact length of an OAEP-wrapped key block and of a
    /// PSS signature under a key of this spec.
    pub const fn modulus_bytes(&self) -> usize {
        self.modulus_bits() / 8
    }

    /// Fixed ASCII tag prefixed to identifiers for this spec
    ///
    /// Tags are mutually prefix-free so identifier parsing is unambiguous.
    pub const fn tag(&self) -> &'static str {
        match self {
            KeySpec::Exchange2048 => "ex2",
            KeySpec::Exchange4096 => "ex4",
            KeySpec::Sign2048 => "sg2",
            KeySpec::Sign4096 => "sg4",
        }
    }

    /// Exact SPKI DER length for a public key of this spec
    ///
    /// Fixed because the provider always generates e = 65537 and the
    /// modulus of an n-bit key always has its top bit set.
    pub const fn spki_len(&self) -> usize {
        match self.modulus_bits() {
            2048 => 294,
            _ => 550,
        }
    }

    /// Look up the spec for an (usage, modulus bits) pair
    pub fn from_parts(key_use: KeyUse, modulus_bits: usize) -> Result<Self> {
        match (key_use, modulus_bits) {
            (KeyUse::Exchange, 2048) => Ok(KeySpec::Exchange2048),
            (KeyUse::Exchange, 4096) => Ok(KeySpec::Exchange4096),
            (KeyUse::Sign, 2048) => Ok(KeySpec::Sign2048),
            (KeyUse::Sign, 4096) => Ok(KeySpec::Sign4096),
            _ => Err(Error::UnsupportedAlgorithm(format!(
                "no supported combination for {} at {} bits",
                key_use, modulus_bits
            ))),
        }
    }
}

// ============================================================================
// ASYMMETRIC KEY HANDLES
// ============================================================================

/// A public key handle with its spec metadata
///
/// Holds both the provider-native key and its canonical SPKI DER encoding;
/// the DER form feeds the identifier codec and is what round-trips through
/// identifiers exactly.
#[derive(Clone)]
pub struct PublicKey {
    spec: KeySpec,
    der: Vec<u8>,
    pub(crate) inner: RsaPublicKey,
}

impl PublicKey {
    /// Wrap a freshly generated provider key
    pub(crate) fn from_rsa(inner: RsaPublicKey, spec: KeySpec) -> Result<Self> {
        let der = inner
            .to_public_key_der()
            .map_err(|e| Error::ProviderFailure(format!("SPKI export failed: {}", e)))?
            .as_bytes()
            .to_vec();
        Ok(Self { spec, der, inner })
    }

    /// Import a public key from its SPKI DER encoding
    ///
    /// Fails with `UnsupportedPublicKeyFormat` if the bytes do not parse as
    /// an RSA public key or the modulus size does not match `spec`.
    pub fn from_spki_der(der: &[u8], spec: KeySpec) -> Result<Self> {
        let inner = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| Error::UnsupportedPublicKeyFormat(format!("SPKI parse failed: {}", e)))?;

        if inner.size() != spec.modulus_bytes() {
            return Err(Error::UnsupportedPublicKeyFormat(format!(
                "modulus is {} bytes, expected {} for {:?}",
                inner.size(),
                spec.modulus_bytes(),
                spec
            )));
        }

        Ok(Self {
            spec,
            der: der.to_vec(),
            inner,
        })
    }

    /// The raw public key encoding (SPKI DER), suitable for identifier derivation
    pub fn to_spki_der(&self) -> &[u8] {
        &self.der
    }

    /// The spec this key was generated under
    pub fn spec(&self) -> KeySpec {
        self.spec
    }

    /// The key's usage
    pub fn key_use(&self) -> KeyUse {
        self.spec.key_use()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.spec == other.spec && self.der == other.der
    }
}

impl Eq for PublicKey {}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKey")
            .field("spec", &self.spec)
            .field("spki", &hex::encode(&self.der[..8.min(self.der.len())]))
            .finish()
    }
}

/// An opaque private key handle
///
/// Non-exportable by construction: there is no accessor for the underlying
/// key material. The core only ever passes this handle back to the
/// primitive provider to request a decrypt or sign operation.
pub struct PrivateKey {
    spec: KeySpec,
    pub(crate) inner: RsaPrivateKey,
}

impl PrivateKey {
    pub(crate) fn from_rsa(inner: RsaPrivateKey, spec: KeySpec) -> Self {
        Self { spec, inner }
    }

    /// The spec this key was generated under
    pub fn spec(&self) -> KeySpec {
        self.spec
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("PrivateKey").field("spec", &self.spec).finish()
    }
}

/// A public/private keypair of a single usage
///
/// Created once per identity per usage and never mutated.
pub struct AsymmetricKeyPair {
    /// The shareable half
    pub public: PublicKey,
    /// The opaque half
    pub private: PrivateKey,
}

impl AsymmetricKeyPair {
    /// The spec both halves were generated under
    pub fn spec(&self) -> KeySpec {
        self.public.spec()
    }

    /// The keypair's usage
    pub fn key_use(&self) -> KeyUse {
        self.public.key_use()
    }
}

// ============================================================================
// SYMMETRIC KEY & NONCE
// ============================================================================

/// An AES-GCM symmetric key
///
/// The exported form is the raw key bytes with no attached metadata.
/// Zeroized when dropped.
#[derive(ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Import a key from raw bytes
    ///
    /// Fails with `InvalidKeyLength` unless the length is an accepted
    /// symmetric key size (16 or 32 bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !ACCEPTED_SYMMETRIC_KEY_SIZES.contains(&bytes.len()) {
            return Err(Error::InvalidKeyLength { got: bytes.len() });
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Import a key from its base64 string form
    pub fn from_base64(s: &str) -> Result<Self> {
        let bytes = encoding::from_base64(s)?;
        Self::from_bytes(&bytes)
    }

    /// Export the raw key material
    pub fn export(&self) -> &[u8] {
        &self.bytes
    }

    /// Export as a padded base64 string
    pub fn to_base64(&self) -> String {
        encoding::to_base64(&self.bytes)
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the key is empty (never true for a constructed key)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material
        f.debug_struct("SymmetricKey").field("len", &self.bytes.len()).finish()
    }
}

/// A nonce (number used once) for AES-GCM encryption
///
/// ## Critical Security Requirement
///
/// **Never reuse a nonce with the same key.** Random 96-bit nonces are safe
/// for up to 2^32 messages per key (birthday bound).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a cryptographically random nonce
    pub fn random() -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from existing bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
