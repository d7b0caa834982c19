//! Cryptographic primitives for the bridge transaction builder.
//!
//! Provides domain-separated BLAKE3 hashing (network identifiers and
//! transaction signature payloads) and Ed25519 signing/verification.
//!
//! All crypto operations wrap established libraries.

pub mod hasher;
pub mod signer;

pub use hasher::ContentHasher;
pub use signer::{Signature, SignatureError, SignatureHint, SigningKey, VerifyingKey};
