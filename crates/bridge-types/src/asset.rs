use std::fmt;

use serde::{Deserialize, Serialize};

use crate::account::AccountId;
use crate::error::TypeError;

/// Code of an issued asset: 1 to 12 ASCII alphanumerics.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetCode(String);

impl AssetCode {
    pub const MAX_LEN: usize = 12;

    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::Empty("asset code"));
        }
        if s.len() > Self::MAX_LEN || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidAssetCode(s.to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Codes of four characters or fewer use the short credit encoding.
    pub fn is_alphanum4(&self) -> bool {
        self.0.len() <= 4
    }
}

impl TryFrom<String> for AssetCode {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> Self {
        code.0
    }
}

impl fmt::Debug for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetCode({})", self.0)
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An asset that can be held, sent, or traded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Asset {
    /// The network's native asset.
    Native,
    /// Issued asset with a 1-4 character code.
    CreditAlphanum4 { code: AssetCode, issuer: AccountId },
    /// Issued asset with a 5-12 character code.
    CreditAlphanum12 { code: AssetCode, issuer: AccountId },
}

impl Asset {
    /// Build an issued asset, picking the encoding from the code length.
    pub fn credit(code: &str, issuer: &str) -> Result<Self, TypeError> {
        let code = AssetCode::parse(code)?;
        let issuer = AccountId::parse(issuer)?;
        Ok(if code.is_alphanum4() {
            Self::CreditAlphanum4 { code, issuer }
        } else {
            Self::CreditAlphanum12 { code, issuer }
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::CreditAlphanum4 { code, issuer } | Self::CreditAlphanum12 { code, issuer } => {
                write!(f, "{code}:{issuer}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_picks_encoding_by_length() {
        let usd = Asset::credit("USD", "GISSUER").unwrap();
        assert!(matches!(usd, Asset::CreditAlphanum4 { .. }));

        let long = Asset::credit("LONGCODE", "GISSUER").unwrap();
        assert!(matches!(long, Asset::CreditAlphanum12 { .. }));
    }

    #[test]
    fn credit_rejects_bad_parts() {
        assert!(Asset::credit("", "GISSUER").is_err());
        assert!(Asset::credit("THIRTEENCHARS", "GISSUER").is_err());
        assert!(Asset::credit("US-D", "GISSUER").is_err());
        assert!(Asset::credit("USD", "").is_err());
    }

    #[test]
    fn native_flag() {
        assert!(!Asset::credit("USD", "GISSUER").unwrap().is_native());
        assert!(Asset::Native.is_native());
    }

    #[test]
    fn display() {
        assert_eq!(Asset::Native.to_string(), "native");
        assert_eq!(
            Asset::credit("EUR", "GBANK").unwrap().to_string(),
            "EUR:GBANK"
        );
    }
}
