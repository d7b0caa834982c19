//! Request and response model for the bridge transaction builder.
//!
//! A build request moves through three typestates, each produced only by the
//! previous one:
//!
//! ```text
//! BuilderRequest --process()--> ProcessedRequest --validate()--> ValidatedRequest
//! ```
//!
//! `process` turns raw `{type, body}` operation pairs into typed
//! [`OperationDescriptor`]s and normalizes shorthand; `validate` enforces
//! field-level constraints. Both report failures as a [`RequestError`] that
//! names the offending field and value.

pub mod asset;
pub mod endpoint;
pub mod error;
pub mod operation;
pub mod request;
pub mod response;

pub use asset::AssetDescriptor;
pub use endpoint::{endpoints, HealthResponse};
pub use error::{codes, BuildError, ErrorData, ErrorResponse, RequestError, RequestErrorKind};
pub use operation::OperationDescriptor;
pub use request::{BuilderRequest, ProcessedRequest, RawOperation, ValidatedRequest};
pub use response::BuilderResponse;
