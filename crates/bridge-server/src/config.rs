use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use bridge_builder::BuilderConfig;
use bridge_types::NetworkPassphrase;

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub network_passphrase: NetworkPassphrase,
    /// Base URL of the Horizon server used for sequence lookups.
    pub horizon_url: String,
    /// Per-request deadline, also applied to Horizon calls.
    pub request_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8006)),
            network_passphrase: NetworkPassphrase::testnet(),
            horizon_url: DEFAULT_HORIZON_URL.into(),
            request_timeout_secs: 10,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load a TOML config file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        if config.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig::new(self.network_passphrase.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8006".parse::<SocketAddr>().unwrap());
        assert_eq!(c.network_passphrase.as_str(), NetworkPassphrase::TESTNET);
        assert_eq!(c.horizon_url, "https://horizon-testnet.stellar.org");
        assert_eq!(c.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bind_addr = "0.0.0.0:9000"
network_passphrase = "Public Global Stellar Network ; September 2015"
"#
        )
        .unwrap();

        let c = ServerConfig::load(file.path()).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert_eq!(c.builder_config().network_passphrase, NetworkPassphrase::public());
        assert_eq!(c.horizon_url, DEFAULT_HORIZON_URL);
        assert_eq!(c.request_timeout_secs, 10);
    }

    #[test]
    fn load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = 12").unwrap();
        assert!(matches!(
            ServerConfig::load(file.path()),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn load_rejects_zero_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();
        assert!(ServerConfig::load(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ServerConfig::load(dir.path().join("absent.toml")),
            Err(ServerError::Io(_))
        ));
    }
}
