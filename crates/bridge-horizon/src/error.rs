use thiserror::Error;

/// Errors raised while loading ledger state.
#[derive(Debug, Error)]
pub enum HorizonError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The server answered with a non-success status other than 404.
    #[error("horizon returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid horizon url: {0}")]
    InvalidUrl(String),
}

pub type HorizonResult<T> = Result<T, HorizonError>;
