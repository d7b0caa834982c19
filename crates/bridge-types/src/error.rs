use thiserror::Error;

/// Errors produced when parsing or constructing foundation types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount {0} has more than 7 decimal places")]
    TooPrecise(String),

    #[error("amount {0} is out of range")]
    AmountOverflow(String),

    #[error("invalid asset code: {0}")]
    InvalidAssetCode(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("sequence number must be greater than zero")]
    ZeroSequence,
}
