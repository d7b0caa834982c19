//! Ledger-state provider for the bridge transaction builder.
//!
//! The builder only needs one fact from the ledger: the current sequence
//! number of an account. [`AccountLoader`] is that seam. [`HorizonClient`]
//! asks a Horizon server over HTTP; [`StaticAccountLoader`] answers from a
//! fixed table for tests and offline use.

pub mod client;
pub mod error;
pub mod memory;
pub mod traits;

pub use client::HorizonClient;
pub use error::{HorizonError, HorizonResult};
pub use memory::StaticAccountLoader;
pub use traits::{AccountLoader, AccountResponse};
