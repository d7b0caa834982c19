use std::fmt;

use ed25519_dalek::{Signer as _, Verifier as _};
use serde::{Deserialize, Serialize};

/// Length in bytes of a secret seed.
pub const SEED_LEN: usize = 32;

/// A transaction signer, built from a 32-byte secret seed.
///
/// Seeds travel as 64 hex characters in build requests. The seed never
/// appears in `Debug` output, so requests holding keys are safe to log.
#[derive(Clone)]
pub struct SigningKey(ed25519_dalek::SigningKey);

/// Public half of a [`SigningKey`].
#[derive(Clone, PartialEq, Eq)]
pub struct VerifyingKey(ed25519_dalek::VerifyingKey);

/// Signature over a transaction payload.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde(with = "signature_bytes")] ed25519_dalek::Signature);

/// The last four bytes of a public key, used to match signatures to signers
/// without carrying the full key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureHint(pub [u8; 4]);

impl SigningKey {
    /// A fresh random key, as issued by `bridge keygen`.
    pub fn generate() -> Self {
        Self(ed25519_dalek::SigningKey::generate(&mut rand::thread_rng()))
    }

    pub fn from_bytes(seed: [u8; SEED_LEN]) -> Self {
        Self(ed25519_dalek::SigningKey::from_bytes(&seed))
    }

    /// Parse a request signer: exactly 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, SignatureError> {
        let seed: [u8; SEED_LEN] = hex::decode(s)
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .ok_or(SignatureError::InvalidSeed)?;
        Ok(Self::from_bytes(seed))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_bytes())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }

    pub fn sign(&self, payload: &[u8]) -> Signature {
        Signature(self.0.sign(payload))
    }
}

impl VerifyingKey {
    pub fn verify(&self, payload: &[u8], signature: &Signature) -> Result<(), SignatureError> {
        self.0
            .verify(payload, &signature.0)
            .map_err(|_| SignatureError::InvalidSignature)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    pub fn hint(&self) -> SignatureHint {
        let [.., a, b, c, d] = *self.0.as_bytes();
        SignatureHint([a, b, c, d])
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerifyingKey({})", self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}..)", hex::encode(&self.0.to_bytes()[..8]))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature does not verify")]
    InvalidSignature,
    #[error("secret seed must be 32 hex-encoded bytes")]
    InvalidSeed,
}

mod signature_bytes {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        sig: &ed25519_dalek::Signature,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&sig.to_bytes())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<ed25519_dalek::Signature, D::Error> {
        let bytes: [u8; 64] = Vec::<u8>::deserialize(deserializer)?
            .try_into()
            .map_err(|_| de::Error::custom("expected 64-byte signature"))?;
        Ok(ed25519_dalek::Signature::from_bytes(&bytes))
    }
}
