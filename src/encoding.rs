//! Text-form helpers layered over the byte-oriented core.
//!
//! The cryptographic operations all speak canonical byte sequences;
//! converting to a text form is a separate, explicit step. Padded standard
//! base64 is the canonical text encoding for envelopes and symmetric keys.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{Error, Result};

/// Encode bytes as padded standard base64
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a padded standard base64 string
pub fn from_base64(s: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(s)
        .map_err(|e| Error::InvalidEncoding(format!("invalid base64: {}", e)))
}

/// Encode bytes as lowercase hex
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string
pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| Error::InvalidEncoding(format!("invalid hex: {}", e)))
}
