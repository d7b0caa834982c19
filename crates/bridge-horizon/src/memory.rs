//! Fixed-table account loader.

use std::collections::HashMap;

use async_trait::async_trait;

use bridge_types::AccountId;

use crate::error::{HorizonError, HorizonResult};
use crate::traits::{AccountLoader, AccountResponse};

/// An [`AccountLoader`] that answers from an in-memory table.
///
/// Unknown accounts yield [`HorizonError::AccountNotFound`], the same as a
/// Horizon 404.
#[derive(Clone, Debug, Default)]
pub struct StaticAccountLoader {
    sequences: HashMap<AccountId, String>,
}

impl StaticAccountLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sequence` as the current sequence of `account`.
    pub fn with_account(mut self, account: AccountId, sequence: impl Into<String>) -> Self {
        self.sequences.insert(account, sequence.into());
        self
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[async_trait]
impl AccountLoader for StaticAccountLoader {
    async fn load_account(&self, account: &AccountId) -> HorizonResult<AccountResponse> {
        self.sequences
            .get(account)
            .map(|sequence| AccountResponse {
                id: account.to_string(),
                sequence: sequence.clone(),
            })
            .ok_or_else(|| HorizonError::AccountNotFound(account.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_account() {
        let account = AccountId::parse("GSOURCE").unwrap();
        let loader = StaticAccountLoader::new().with_account(account.clone(), "42");
        let resp = loader.load_account(&account).await.unwrap();
        assert_eq!(resp.id, "GSOURCE");
        assert_eq!(resp.sequence, "42");
        assert_eq!(loader.len(), 1);
    }

    #[tokio::test]
    async fn unknown_account() {
        let loader = StaticAccountLoader::new();
        assert!(loader.is_empty());
        let err = loader
            .load_account(&AccountId::parse("GMISSING").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, HorizonError::AccountNotFound(id) if id == "GMISSING"));
    }
}
