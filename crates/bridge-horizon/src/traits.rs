use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bridge_types::AccountId;

use crate::error::HorizonResult;

/// The subset of a Horizon account record the builder consumes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    /// Current sequence number as reported, a decimal string.
    pub sequence: String,
}

/// Source of current account state.
///
/// Implementations must be shareable across concurrent build requests.
#[async_trait]
pub trait AccountLoader: Send + Sync {
    /// Load the account record for `account`.
    async fn load_account(&self, account: &AccountId) -> HorizonResult<AccountResponse>;
}
