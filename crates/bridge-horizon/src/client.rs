//! HTTP account loader backed by a Horizon server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use bridge_types::AccountId;

use crate::error::{HorizonError, HorizonResult};
use crate::traits::{AccountLoader, AccountResponse};

/// Longest error body kept in [`HorizonError::Status`].
const MAX_ERROR_BODY: usize = 1024;

/// Loads accounts with `GET {base_url}/accounts/{id}`.
#[derive(Clone, Debug)]
pub struct HorizonClient {
    base_url: String,
    client: Client,
}

impl HorizonClient {
    /// Create a client for the Horizon server at `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> HorizonResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(HorizonError::InvalidUrl(base_url));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn account_url(&self, account: &AccountId) -> String {
        format!("{}/accounts/{account}", self.base_url)
    }
}

#[async_trait]
impl AccountLoader for HorizonClient {
    async fn load_account(&self, account: &AccountId) -> HorizonResult<AccountResponse> {
        let url = self.account_url(account);
        tracing::debug!(%url, "loading account");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json::<AccountResponse>().await?),
            StatusCode::NOT_FOUND => Err(HorizonError::AccountNotFound(account.to_string())),
            status => {
                let mut body = response.text().await.unwrap_or_default();
                if body.len() > MAX_ERROR_BODY {
                    let mut end = MAX_ERROR_BODY;
                    while !body.is_char_boundary(end) {
                        end -= 1;
                    }
                    body.truncate(end);
                }
                Err(HorizonError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
