use serde::{Deserialize, Serialize};

use bridge_types::NetworkPassphrase;

/// Settings shared by every build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Network the built transactions are signed for.
    #[serde(default)]
    pub network_passphrase: NetworkPassphrase,
}

impl BuilderConfig {
    pub fn new(network_passphrase: NetworkPassphrase) -> Self {
        Self { network_passphrase }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_testnet() {
        assert_eq!(
            BuilderConfig::default().network_passphrase.as_str(),
            NetworkPassphrase::TESTNET
        );
    }

    #[test]
    fn deserializes_passphrase() {
        let config: BuilderConfig =
            serde_json::from_str(r#"{"network_passphrase": "Private Net"}"#).unwrap();
        assert_eq!(config.network_passphrase.as_str(), "Private Net");
        assert!(serde_json::from_str::<BuilderConfig>(r#"{"network_passphrase": " "}"#).is_err());
    }
}
