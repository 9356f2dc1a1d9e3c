use std::sync::Arc;

use tokio::net::TcpListener;

use cg_sdk::WatchNet;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Cigilante HTTP server. Owns the one ledger instance it serves.
pub struct CigilanteServer {
    config: Arc<ServerConfig>,
    net: Arc<WatchNet>,
}

impl CigilanteServer {
    pub fn new(config: ServerConfig) -> Self {
        let net = Arc::new(WatchNet::new(config.watch_config()));
        Self::with_net(config, net)
    }

    /// Serve an existing ledger handle.
    pub fn with_net(config: ServerConfig, net: Arc<WatchNet>) -> Self {
        Self {
            config: Arc::new(config),
            net,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn net(&self) -> &Arc<WatchNet> {
        &self.net
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(AppState {
            net: Arc::clone(&self.net),
            config: Arc::clone(&self.config),
        })
    }

    /// Start serving requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            "Cigilante HTTP listening on {} ({})",
            self.config.bind_addr,
            cg_types::WATCH_CHAIN_REF
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
