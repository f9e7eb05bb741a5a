//! # Signature Service
//!
//! RSA-PSS message signing and identifier-based verification.
//!
//! ## Asymmetric Failure Contract
//!
//! Signing can fail loudly ([`sign`] returns a `Result`), but verification
//! never does: [`verify`] is a boolean security gate, and every failure on
//! the way to an answer — malformed identifier, wrong key usage, provider
//! rejection, signature mismatch — collapses to `false`. Callers branch on
//! the boolean; they never handle verification errors as control flow.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoding;
use crate::error::Result;
use crate::identifier::Identifier;
use crate::keys::{KeyUse, PrivateKey};
use crate::provider::PrimitiveProvider;

/// An RSA-PSS signature
///
/// Length equals the signer's modulus size (256 bytes at 2048 bits).
/// Serialized as a base64 string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_base64")] Vec<u8>);

impl Signature {
    /// Create from raw signature bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decode from a padded base64 string
    pub fn from_base64(s: &str) -> Result<Self> {
        Ok(Self(encoding::from_base64(s)?))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encode as a padded base64 string
    pub fn to_base64(&self) -> String {
        encoding::to_base64(&self.0)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign a message with a Sign-usage private key
///
/// Delegates directly to the provider; no additional framing. Fails with
/// `UnsupportedKeyKind` for an Exchange-usage key, and propagates provider
/// failures unchanged.
pub async fn sign<P: PrimitiveProvider + ?Sized>(
    provider: &P,
    message: &[u8],
    signing_key: &PrivateKey,
) -> Result<Signature> {
    let bytes = provider.sign(message, signing_key).await?;
    Ok(Signature::from_bytes(bytes))
}

/// Verify a signature against the signer's identifier
///
/// Resolves the identifier with expected usage `Sign`, then delegates to
/// the provider. Returns a boolean for every input — including malformed
/// identifiers and garbage signatures — and never an error. The absorbed
/// failure cause is logged at debug level.
pub async fn verify<P: PrimitiveProvider + ?Sized>(
    provider: &P,
    message: &[u8],
    signature: &Signature,
    signer: &str,
) -> bool {
    let public = match Identifier::parse(signer)
        .and_then(|id| id.resolve_public_key(KeyUse::Sign))
    {
        Ok(key) => key,
        Err(e) => {
            debug!(error = %e, "could not resolve signer identifier, verification is false");
            return false;
        }
    };

    match provider.verify(message, signature.as_bytes(), &public).await {
        Ok(valid) => valid,
        Err(e) => {
            debug!(error = %e, "provider rejected verification, result is false");
            false
        }
    }
}

/// Serde helper storing signature bytes as a base64 string
mod signature_base64 {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::encoding;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&encoding::to_base64(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        encoding::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
