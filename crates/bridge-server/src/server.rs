use std::sync::Arc;

use tokio::net::TcpListener;

use bridge_builder::TransactionBuilder;
use bridge_horizon::{AccountLoader, HorizonClient};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Bridge builder HTTP server.
pub struct BridgeServer {
    config: ServerConfig,
    builder: Arc<TransactionBuilder>,
}

impl BridgeServer {
    /// Create a server that looks sequences up on the configured Horizon.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let horizon = HorizonClient::new(config.horizon_url.clone(), config.request_timeout())?;
        Ok(Self::with_loader(config, Arc::new(horizon)))
    }

    pub fn with_loader(config: ServerConfig, loader: Arc<dyn AccountLoader>) -> Self {
        let builder = Arc::new(TransactionBuilder::new(config.builder_config(), loader));
        Self { config, builder }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.builder.clone(), &self.config)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            network = self.config.network_passphrase.as_str(),
            horizon = %self.config.horizon_url,
            "bridge server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
