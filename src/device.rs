//! Device-name derivation.
//!
//! Turns an identifier into a short, stable display label: NFC-normalize,
//! hash through the provider, base32-encode, truncate to 32 characters.
//! One-way and non-secret; collisions are tolerable because the label is
//! never used in a security decision.

use data_encoding::BASE32_NOPAD;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::provider::PrimitiveProvider;

/// Length of a derived device name in characters
pub const DEVICE_NAME_LEN: usize = 32;

/// Derive a display label for a device from its identifier
pub async fn derive_device_name<P: PrimitiveProvider + ?Sized>(
    provider: &P,
    identifier: &str,
) -> Result<String> {
    let normalized: String = identifier.nfc().collect();
    let digest = provider.hash(normalized.as_bytes()).await?;

    let mut name = BASE32_NOPAD.encode(&digest);
    name.truncate(DEVICE_NAME_LEN);
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SoftwareProvider;

    #[tokio::test]
    async fn test_device_name_shape() {
        let provider = SoftwareProvider::new();
        let name = derive_device_name(&provider, "ex2SomeIdentifier").await.unwrap();

        assert_eq!(name.len(), DEVICE_NAME_LEN);
        // RFC 4648 base32 alphabet only
        assert!(name.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[tokio::test]
    async fn test_device_name_is_deterministic() {
        let provider = SoftwareProvider::new();
        let a = derive_device_name(&provider, "ex2Abc").await.unwrap();
        let b = derive_device_name(&provider, "ex2Abc").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_different_identifiers_differ() {
        let provider = SoftwareProvider::new();
        let a = derive_device_name(&provider, "ex2Abc").await.unwrap();
        let b = derive_device_name(&provider, "sg2Abc").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_unicode_forms_normalize_to_same_name() {
        let provider = SoftwareProvider::new();
        // "é" precomposed vs combining — NFC maps both to the same label
        let a = derive_device_name(&provider, "caf\u{e9}").await.unwrap();
        let b = derive_device_name(&provider, "cafe\u{301}").await.unwrap();
        assert_eq!(a, b);
    }
}
