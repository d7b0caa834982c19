//! Transaction-assembly pipeline for the bridge.
//!
//! [`TransactionBuilder`] turns a JSON build request into a signed,
//! base64-encoded transaction envelope:
//!
//! ```text
//! decode -> process -> validate -> resolve sequence -> compose -> sign -> encode
//! ```
//!
//! Each step either hands a stronger type to the next or stops with a
//! [`BuildError`](bridge_protocol::BuildError). The only await point is the
//! account lookup made when the request leaves the sequence number empty.

pub mod config;
pub mod pipeline;
pub mod sequence;

pub use config::BuilderConfig;
pub use pipeline::{BuiltTransaction, TransactionBuilder};
pub use sequence::{resolve_sequence, SequenceSource};
