use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use bridge_crypto::{Signature, SignatureHint, SigningKey, VerifyingKey};

use crate::error::{CodecError, CodecResult};
use crate::transaction::Transaction;

/// A signature tagged with the hint of the key that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoratedSignature {
    pub hint: SignatureHint,
    pub signature: Signature,
}

/// A transaction plus the signatures applied to it, in signing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn unsigned(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    /// Sign `tx` with each key in order.
    pub fn sign(tx: Transaction, signers: &[SigningKey]) -> CodecResult<Self> {
        let mut envelope = Self::unsigned(tx);
        let payload = envelope.tx.signature_payload()?;
        for key in signers {
            envelope.signatures.push(DecoratedSignature {
                hint: key.verifying_key().hint(),
                signature: key.sign(&payload),
            });
        }
        Ok(envelope)
    }

    /// Returns `true` if some signature carrying `key`'s hint verifies.
    pub fn is_signed_by(&self, key: &VerifyingKey) -> bool {
        let Ok(payload) = self.tx.signature_payload() else {
            return false;
        };
        let hint = key.hint();
        self.signatures
            .iter()
            .filter(|s| s.hint == hint)
            .any(|s| key.verify(&payload, &s.signature).is_ok())
    }

    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> CodecResult<Self> {
        bincode::deserialize(data).map_err(|e| CodecError::Deserialization(e.to_string()))
    }

    /// Portable text form: standard base64 over the binary encoding.
    pub fn to_base64(&self) -> CodecResult<String> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }

    pub fn from_base64(encoded: &str) -> CodecResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CodecError::Base64(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}
