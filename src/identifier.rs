//! # Public-Key Identifiers
//!
//! Compact, self-describing textual identifiers for public keys.
//!
//! ## Identifier Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       IDENTIFIER FORMAT                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Example: ex2Rm9vQmFyQmF6UXV4...                                       │
//! │                                                                         │
//! │  ┌─────────┬──────────────────────────────────────────────────────┐    │
//! │  │   Tag   │           Base58btc-encoded public key               │    │
//! │  ├─────────┼──────────────────────────────────────────────────────┤    │
//! │  │  ex2    │  SPKI DER bytes of the key (294 bytes at 2048 bits)  │    │
//! │  └─────────┴──────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  Tag table (one tag per supported algorithm×usage pair):               │
//! │    ex2 — RSA-OAEP exchange, 2048-bit     sg2 — RSA-PSS sign, 2048-bit  │
//! │    ex4 — RSA-OAEP exchange, 4096-bit     sg4 — RSA-PSS sign, 4096-bit  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Encoding is deterministic and round-trips exactly: decoding always
//! recovers the encoded key bytes and metadata, or fails. Tags are mutually
//! prefix-free; parsing matches the longest known tag first.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::{KeySpec, KeyUse, PublicKey};

/// A public-key-derived textual identifier, self-describing its algorithm
/// and intended use
///
/// Immutable once produced; its lifetime equals the lifetime of the public
/// key it describes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier {
    value: String,
}

impl Identifier {
    /// Derive the identifier for a public key
    ///
    /// Deterministic: `tag(spec) ∥ base58btc(spki_der)`. Total over key
    /// handles, since every handle carries a supported [`KeySpec`].
    pub fn from_public_key(key: &PublicKey) -> Self {
        Self::encode(key.to_spki_der(), key.spec())
    }

    /// Encode raw public key bytes and their spec into an identifier
    pub fn encode(spki_der: &[u8], spec: KeySpec) -> Self {
        let value = format!("{}{}", spec.tag(), bs58::encode(spki_der).into_string());
        Self { value }
    }

    /// Parse an identifier string, validating tag, encoding, and key length
    pub fn parse(s: &str) -> Result<Self> {
        let id = Self {
            value: s.to_string(),
        };
        id.decode()?;
        Ok(id)
    }

    /// Decode this identifier back into its public key bytes and spec
    ///
    /// ## Errors
    ///
    /// - `MalformedIdentifier` if no known tag matches the start
    /// - `InvalidEncoding` if the remainder is not valid base58btc, or the
    ///   decoded bytes do not have the exact SPKI length the declared spec
    ///   requires
    pub fn decode(&self) -> Result<(Vec<u8>, KeySpec)> {
        let spec = self.spec()?;
        let encoded = &self.value[spec.tag().len()..];

        let spki = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| Error::InvalidEncoding(format!("invalid base58btc: {}", e)))?;

        if spki.len() != spec.spki_len() {
            return Err(Error::InvalidEncoding(format!(
                "decoded key is {} bytes, expected {} for tag '{}'",
                spki.len(),
                spec.spki_len(),
                spec.tag()
            )));
        }

        Ok((spki, spec))
    }

    /// The spec declared by this identifier's tag
    ///
    /// Longest-match first, so future variable-length tags stay unambiguous.
    pub fn spec(&self) -> Result<KeySpec> {
        let mut best: Option<KeySpec> = None;
        for spec in KeySpec::ALL {
            if self.value.starts_with(spec.tag())
                && best.map_or(true, |b| spec.tag().len() > b.tag().len())
            {
                best = Some(spec);
            }
        }
        best.ok_or_else(|| {
            Error::MalformedIdentifier(format!("no known tag at start of '{}'", self.value))
        })
    }

    /// Decode and import the identified key as a usable public key handle
    ///
    /// Fails with `KeyUseMismatch` if the declared usage differs from
    /// `expected_use`.
    pub fn resolve_public_key(&self, expected_use: KeyUse) -> Result<PublicKey> {
        let (spki, spec) = self.decode()?;

        if spec.key_use() != expected_use {
            return Err(Error::KeyUseMismatch {
                expected: expected_use,
                found: spec.key_use(),
            });
        }

        PublicKey::from_spki_der(&spki, spec)
    }

    /// The full identifier string
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl std::str::FromStr for Identifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CryptoConfig;
    use crate::provider::{PrimitiveProvider, SoftwareProvider};

    #[tokio::test]
    async fn test_identifier_round_trip() {
        let provider = SoftwareProvider::new();
        let config = CryptoConfig::default();
        let pair = provider
            .generate_keypair(config.exchange_spec().unwrap())
            .await
            .unwrap();

        let id = Identifier::from_public_key(&pair.public);
        assert!(id.as_str().starts_with("ex2"));

        let (spki, spec) = id.decode().unwrap();
        assert_eq!(spki, pair.public.to_spki_der());
        assert_eq!(spec, KeySpec::Exchange2048);

        // Parsing the string form yields the same identifier
        let parsed = Identifier::parse(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }

    #[tokio::test]
    async fn test_identifier_is_deterministic() {
        let provider = SoftwareProvider::new();
        let pair = provider
            .generate_keypair(KeySpec::Sign2048)
            .await
            .unwrap();

        let id1 = Identifier::from_public_key(&pair.public);
        let id2 = Identifier::from_public_key(&pair.public);
        assert_eq!(id1, id2);
        assert!(id1.as_str().starts_with("sg2"));
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let result = Identifier::parse("zz9AAAA");
        assert!(matches!(result, Err(Error::MalformedIdentifier(_))));
    }

    #[test]
    fn test_invalid_base58_is_rejected() {
        // '0' and 'l' are not in the base58btc alphabet
        let result = Identifier::parse("ex20l0l0l");
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        // Valid tag, valid base58, but far too few key bytes
        let short = format!("ex2{}", bs58::encode(&[1u8; 16]).into_string());
        let result = Identifier::parse(&short);
        assert!(matches!(result, Err(Error::InvalidEncoding(_))));
    }

    #[tokio::test]
    async fn test_resolve_checks_usage() {
        let provider = SoftwareProvider::new();
        let pair = provider
            .generate_keypair(KeySpec::Sign2048)
            .await
            .unwrap();
        let id = Identifier::from_public_key(&pair.public);

        // Matching usage resolves to the same key
        let resolved = id.resolve_public_key(KeyUse::Sign).unwrap();
        assert_eq!(resolved, pair.public);

        // Mismatched usage is rejected
        let result = id.resolve_public_key(KeyUse::Exchange);
        assert!(matches!(
            result,
            Err(Error::KeyUseMismatch {
                expected: KeyUse::Exchange,
                found: KeyUse::Sign,
            })
        ));
    }

    #[tokio::test]
    async fn test_identifier_serde_round_trip() {
        let provider = SoftwareProvider::new();
        let pair = provider
            .generate_keypair(KeySpec::Exchange2048)
            .await
            .unwrap();
        let id = Identifier::from_public_key(&pair.public);

        let json = serde_json::to_string(&id).unwrap();
        let restored: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, id);
    }
}
