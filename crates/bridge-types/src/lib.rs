//! Foundation types for the bridge transaction builder.
//!
//! Every other bridge crate depends on `bridge-types`. The types here are
//! strict: each is produced by a `parse`/`new` constructor that rejects
//! malformed input, so a value that exists is a value that can be encoded.
//!
//! # Key Types
//!
//! - [`AccountId`]: Ledger account identifier
//! - [`Amount`]: Fixed-point amount in stroops (7 decimal places)
//! - [`Asset`]: Native asset or an issued credit
//! - [`Price`]: Rational price `n/d`
//! - [`NetworkPassphrase`]: Network the transaction is scoped to
//! - [`SequenceNumber`]: Non-zero account sequence number

pub mod account;
pub mod amount;
pub mod asset;
pub mod error;
pub mod network;
pub mod price;
pub mod sequence;

pub use account::AccountId;
pub use amount::{Amount, STROOPS_PER_UNIT};
pub use asset::{Asset, AssetCode};
pub use error::TypeError;
pub use network::NetworkPassphrase;
pub use price::Price;
pub use sequence::SequenceNumber;
