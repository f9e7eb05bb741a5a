//! # Error Handling
//!
//! Error types for the Veil crypto core.
//!
//! ## Propagation Policy
//!
//! Cryptographic failures are never transient: every codec and envelope
//! error is surfaced immediately to the caller with no retry and no silent
//! fallback. The single deliberate exception is [`crate::signing::verify`],
//! which collapses every failure mode into a boolean `false` — verification
//! is a predicate used in security decisions, not an operation expected to
//! "succeed".
//!
//! ## Error Kinds
//!
//! | Kind | Raised by |
//! |------|-----------|
//! | `UnsupportedAlgorithm` | Key generation / config with an unknown algorithm×usage×size combination |
//! | `UnsupportedKeyKind` | Using a key handle of the wrong kind for an operation (e.g. signing with an exchange key) |
//! | `InvalidKeyLength` | Importing symmetric key material of an unaccepted length |
//! | `MalformedIdentifier` | Identifier with no known tag prefix |
//! | `InvalidEncoding` | Text/byte form that does not decode to the expected shape |
//! | `KeyUseMismatch` | Resolving an identifier whose declared usage differs from the expected one |
//! | `UnsupportedPublicKeyFormat` | Public key bytes that cannot be parsed, or a wrap target of the wrong usage |
//! | `DecryptionFailed` | Unwrap or authenticated-decryption failure; no partial plaintext is ever returned |
//! | `ProviderFailure` | Opaque passthrough from the primitive provider |

use thiserror::Error;

use crate::keys::KeyUse;

/// Result type alias for Veil core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Veil crypto core
#[derive(Error, Debug)]
pub enum Error {
    /// The requested algorithm×usage×size combination is not supported
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// A key handle of the wrong kind was used for an operation
    #[error("Unsupported key kind: {0}")]
    UnsupportedKeyKind(String),

    /// Symmetric key material has an unaccepted length
    #[error("Invalid key length: {got} bytes (accepted: 16 or 32)")]
    InvalidKeyLength {
        /// The length that was supplied
        got: usize,
    },

    /// The identifier does not start with any known tag
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// A text or byte form does not decode to the expected shape
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The identifier's declared key usage differs from the expected one
    #[error("Key use mismatch: expected {expected}, found {found}")]
    KeyUseMismatch {
        /// The usage the caller required
        expected: KeyUse,
        /// The usage the identifier declares
        found: KeyUse,
    },

    /// Public key bytes could not be parsed, or the wrap target has the wrong usage
    #[error("Unsupported public key format: {0}")]
    UnsupportedPublicKeyFormat(String),

    /// Unwrap or authenticated decryption failed
    ///
    /// Decryption either yields fully authenticated plaintext or fails
    /// entirely; tampered ciphertext always lands here.
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Opaque failure reported by the primitive provider
    #[error("Provider failure: {0}")]
    ProviderFailure(String),
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = Error::InvalidKeyLength { got: 7 };
        assert!(err.to_string().contains("7 bytes"));

        let err = Error::KeyUseMismatch {
            expected: KeyUse::Sign,
            found: KeyUse::Exchange,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected Sign"));
        assert!(msg.contains("found Exchange"));
    }
}
