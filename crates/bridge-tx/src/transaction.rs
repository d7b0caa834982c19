use serde::{Deserialize, Serialize};

use bridge_crypto::ContentHasher;
use bridge_types::{AccountId, SequenceNumber};

use crate::error::{CodecError, CodecResult};
use crate::operation::Operation;

/// Fee charged per operation, in stroops.
pub const BASE_FEE: u32 = 100;
/// Maximum number of operations in one transaction.
pub const MAX_OPERATIONS: usize = 100;

/// A composed, unsigned transaction.
///
/// Only [`compose`](crate::compose) produces values of this type in normal
/// use; the fields are public so decoders and tests can inspect them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source: AccountId,
    pub fee: u32,
    pub sequence: SequenceNumber,
    /// BLAKE3 identifier of the network passphrase.
    pub network_id: [u8; 32],
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// Canonical binary encoding of the transaction.
    pub fn to_bytes(&self) -> CodecResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    /// The 32-byte payload every signer signs.
    pub fn signature_payload(&self) -> CodecResult<[u8; 32]> {
        Ok(ContentHasher::TRANSACTION.hash(&self.to_bytes()?))
    }

    /// Hex-encoded transaction hash.
    pub fn hash_hex(&self) -> CodecResult<String> {
        Ok(hex::encode(self.signature_payload()?))
    }
}
