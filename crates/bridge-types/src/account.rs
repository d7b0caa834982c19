use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maximum length of an encoded account identifier.
pub const MAX_ACCOUNT_ID_LEN: usize = 56;

/// Identifier of a ledger account.
///
/// Account identifiers are upper-case base32 strings (`A-Z`, `2-7`) of at most
/// [`MAX_ACCOUNT_ID_LEN`] characters. Deserialization goes through
/// [`AccountId::parse`], so a decoded envelope can never carry an invalid id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Parse and validate an account identifier.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::Empty("account id"));
        }
        if s.len() > MAX_ACCOUNT_ID_LEN {
            return Err(TypeError::InvalidAccountId(format!(
                "{} characters exceeds the maximum of {MAX_ACCOUNT_ID_LEN}",
                s.len()
            )));
        }
        if !s.bytes().all(is_base32) {
            return Err(TypeError::InvalidAccountId(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_base32(b: u8) -> bool {
    b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b)
}

impl TryFrom<String> for AccountId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
