//! Transaction model for the bridge transaction builder.
//!
//! A [`Transaction`] is never assembled field by field. Callers hand an
//! ordered list of [`TransactionMutator`]s to [`compose`], which folds them
//! into a transaction and checks the composition invariants (header present
//! exactly once, operation limit, no use of a merged account). The result is
//! signed into a [`TransactionEnvelope`] and encoded for transport.
//!
//! # Quick Start
//!
//! ```rust
//! use bridge_crypto::SigningKey;
//! use bridge_tx::{compose, Operation, OperationBody, TransactionEnvelope, TransactionMutator};
//! use bridge_types::{AccountId, Amount, NetworkPassphrase, SequenceNumber};
//!
//! let tx = compose([
//!     TransactionMutator::SourceAccount(AccountId::parse("GSOURCE").unwrap()),
//!     TransactionMutator::Sequence(SequenceNumber::new(5).unwrap()),
//!     TransactionMutator::Network(NetworkPassphrase::testnet()),
//!     TransactionMutator::Operation(Operation::new(OperationBody::CreateAccount {
//!         destination: AccountId::parse("GDEST").unwrap(),
//!         starting_balance: Amount::parse("10").unwrap(),
//!     })),
//! ])
//! .unwrap();
//!
//! let key = SigningKey::generate();
//! let envelope = TransactionEnvelope::sign(tx, &[key]).unwrap();
//! let encoded = envelope.to_base64().unwrap();
//! assert_eq!(TransactionEnvelope::from_base64(&encoded).unwrap(), envelope);
//! ```

pub mod compose;
pub mod envelope;
pub mod error;
pub mod operation;
pub mod transaction;

pub use compose::{compose, Mutator, TransactionDraft, TransactionMutator};
pub use envelope::{DecoratedSignature, TransactionEnvelope};
pub use error::{CodecError, CodecResult, ComposeError};
pub use operation::{
    Operation, OperationBody, SetOptions, SignerUpdate, AUTH_FLAGS_MASK, MAX_DATA_NAME_LEN,
    MAX_DATA_VALUE_LEN, MAX_HOME_DOMAIN_LEN, MAX_PATH_LEN,
};
pub use transaction::{Transaction, BASE_FEE, MAX_OPERATIONS};
