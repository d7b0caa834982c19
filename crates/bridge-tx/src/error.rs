use bridge_types::AccountId;
use thiserror::Error;

/// Errors raised while folding mutators into a transaction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("transaction is missing {0}")]
    MissingField(&'static str),

    #[error("{0} was set more than once")]
    DuplicateField(&'static str),

    #[error("transaction has no operations")]
    NoOperations,

    #[error("transaction exceeds {max} operations")]
    TooManyOperations { max: usize },

    #[error("operation {index} uses account {account} after it was merged")]
    OperationAfterMerge { index: usize, account: AccountId },

    #[error("operation {index} merges account {account} into itself")]
    MergeIntoSelf { index: usize, account: AccountId },

    #[error("unsupported operation: {0}")]
    InvalidOperation(String),
}

/// Errors from encoding or decoding envelopes.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid base64: {0}")]
    Base64(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
