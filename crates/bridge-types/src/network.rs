use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Passphrase identifying the network a transaction is valid on.
///
/// Signatures commit to a hash of the passphrase, so an envelope signed for
/// one network is meaningless on another.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NetworkPassphrase(String);

impl NetworkPassphrase {
    pub const PUBLIC: &'static str = "Public Global Stellar Network ; September 2015";
    pub const TESTNET: &'static str = "Test SDF Network ; September 2015";

    pub fn new(passphrase: impl Into<String>) -> Result<Self, TypeError> {
        let passphrase = passphrase.into();
        if passphrase.trim().is_empty() {
            return Err(TypeError::Empty("network passphrase"));
        }
        Ok(Self(passphrase))
    }

    pub fn public() -> Self {
        Self(Self::PUBLIC.to_owned())
    }

    pub fn testnet() -> Self {
        Self(Self::TESTNET.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NetworkPassphrase {
    fn default() -> Self {
        Self::testnet()
    }
}

impl TryFrom<String> for NetworkPassphrase {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NetworkPassphrase> for String {
    fn from(passphrase: NetworkPassphrase) -> Self {
        passphrase.0
    }
}

impl fmt::Debug for NetworkPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NetworkPassphrase({:?})", self.0)
    }
}

impl fmt::Display for NetworkPassphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank() {
        assert!(NetworkPassphrase::new("").is_err());
        assert!(NetworkPassphrase::new("   ").is_err());
    }

    #[test]
    fn default_is_testnet() {
        assert_eq!(NetworkPassphrase::default().as_str(), NetworkPassphrase::TESTNET);
        assert_ne!(NetworkPassphrase::public(), NetworkPassphrase::testnet());
    }

    #[test]
    fn custom_passphrase() {
        let p = NetworkPassphrase::new("Test SDF Network").unwrap();
        assert_eq!(p.to_string(), "Test SDF Network");
    }
}
