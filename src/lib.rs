//! # Veil Core
//!
//! Identity-bound hybrid encryption and digital signatures for peer-to-peer
//! secure messaging. Each party holds two keypairs — one for key exchange,
//! one for signing — identified publicly by compact textual identifiers
//! derived from the public keys.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         VEIL CORE MODULES                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  caller                                                                 │
//! │    │                                                                    │
//! │    ├──► Envelope Protocol ── seal_to / open_from                        │
//! │    │        │        wrapped_key ∥ nonce ∥ ciphertext in one buffer     │
//! │    │        │                                                           │
//! │    ├──► Signature Service ── sign (loud) / verify (never errors)        │
//! │    │        │                                                           │
//! │    │        ▼                                                           │
//! │    │    Identifier Codec ── tag ∥ base58(spki), exact round-trip        │
//! │    │        │                                                           │
//! │    │        ▼                                                           │
//! │    │    Key Codec ── handles ↔ portable byte/string forms               │
//! │    │        │                                                           │
//! │    ▼        ▼                                                           │
//! │  Primitive Provider ── keygen, encrypt, decrypt, sign, verify, hash     │
//! │  (capability interface; the core implements no cipher math itself)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Explicit algorithm/size defaults, no ambient state
//! - [`keys`] - Key handles, key specs, and the key codec
//! - [`identifier`] - Self-describing public-key identifiers
//! - [`envelope`] - The hybrid envelope protocol
//! - [`signing`] - Signing and identifier-based verification
//! - [`device`] - Derived device display names
//! - [`encoding`] - Explicit text-form helpers (base64, hex)
//! - [`provider`] - The primitive-provider capability interface
//!
//! ## Concurrency Model
//!
//! All operations are single-shot and stateless with respect to each other;
//! the core holds no shared mutable state and defines no scheduler. Provider
//! calls may suspend, so core functions are suspension points. Key handles
//! are treated as read-only; any number of seal/open/sign/verify operations
//! may run concurrently without coordination.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod device;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod identifier;
pub mod keys;
pub mod provider;
pub mod signing;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::CryptoConfig;
pub use envelope::{open_from, seal_to, Envelope};
pub use error::{Error, Result};
pub use identifier::Identifier;
pub use keys::{
    AsymmetricKeyPair, KeySpec, KeyUse, Nonce, PrivateKey, PublicKey, SymmetricKey, NONCE_SIZE,
};
pub use provider::{PrimitiveProvider, SoftwareProvider};
pub use signing::{sign, verify, Signature};
