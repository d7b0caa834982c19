use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error codes carried in [`ErrorResponse::code`].
pub mod codes {
    pub const MALFORMED_REQUEST: &str = "malformed_request";
    pub const MISSING_PARAMETER: &str = "missing_parameter";
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    pub const INTERNAL_SERVER_ERROR: &str = "internal_server_error";
}

const MALFORMED_MESSAGE: &str = "Request body is not a valid JSON";
const INTERNAL_MESSAGE: &str = "Internal Server Error, please try again.";
/// Message of the sequence-resolution failure.
pub const SEQUENCE_INVALID_MESSAGE: &str = "Sequence number is invalid";

// ---------------------------------------------------------------------------
// RequestError
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestErrorKind {
    MissingParameter,
    InvalidParameter,
}

/// A normalization or validation failure attributable to one request field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message} (field: {field})")]
pub struct RequestError {
    kind: RequestErrorKind,
    field: String,
    value: String,
    message: String,
}

impl RequestError {
    pub fn missing(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: RequestErrorKind::MissingParameter,
            field: field.into(),
            value: String::new(),
            message: message.into(),
        }
    }

    pub fn invalid(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: RequestErrorKind::InvalidParameter,
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RequestErrorKind {
        self.kind
    }

    /// Dotted path of the offending field, e.g. `operations[1].body.amount`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The offending raw value. Empty for missing fields and secrets.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// BuildError
// ---------------------------------------------------------------------------

/// Every way a build request can fail.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The body could not be decoded into a request at all.
    #[error("malformed request: {0}")]
    MalformedInput(String),

    /// A field failed normalization or validation.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// A parameter was rejected after external state was consulted.
    #[error("invalid parameter {field}: {message}")]
    InvalidParameter {
        field: String,
        value: String,
        message: String,
    },

    /// Composition or encoding failed after the request was accepted.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BuildError {
    /// The failure raised when no positive sequence number can be resolved.
    pub fn invalid_sequence(raw: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: "sequence_number".into(),
            value: raw.into(),
            message: SEQUENCE_INVALID_MESSAGE.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// `true` when the caller supplied something wrong.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    /// Offending field and value, when the error names one.
    pub fn field_and_value(&self) -> Option<(&str, &str)> {
        match self {
            Self::Request(e) => Some((e.field(), e.value())),
            Self::InvalidParameter { field, value, .. } => Some((field.as_str(), value.as_str())),
            _ => None,
        }
    }

    /// Public response payload. Internal detail never leaves the process.
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::MalformedInput(_) => ErrorResponse {
                status: 400,
                code: codes::MALFORMED_REQUEST.into(),
                message: MALFORMED_MESSAGE.into(),
                data: None,
            },
            Self::Request(e) => ErrorResponse {
                status: 400,
                code: match e.kind() {
                    RequestErrorKind::MissingParameter => codes::MISSING_PARAMETER,
                    RequestErrorKind::InvalidParameter => codes::INVALID_PARAMETER,
                }
                .into(),
                message: e.message().into(),
                data: Some(ErrorData {
                    name: e.field().into(),
                    value: e.value().into(),
                }),
            },
            Self::InvalidParameter {
                field,
                value,
                message,
            } => ErrorResponse {
                status: 400,
                code: codes::INVALID_PARAMETER.into(),
                message: message.clone(),
                data: Some(ErrorData {
                    name: field.clone(),
                    value: value.clone(),
                }),
            },
            Self::Internal(_) => ErrorResponse {
                status: 500,
                code: codes::INTERNAL_SERVER_ERROR.into(),
                message: INTERNAL_MESSAGE.into(),
                data: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ErrorResponse
// ---------------------------------------------------------------------------

/// Structured error payload returned to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Suggested transport status; not part of the body.
    #[serde(skip)]
    pub status: u16,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub name: String,
    pub value: String,
}
