//! HTTP server for the pgeforge online compiler.
//!
//! Accepts a single C++ source file over `POST /compile`, drives the
//! pgeforge-core build pipeline, and translates each outcome onto the wire
//! contract the web front end consumes. Static front-end assets are served
//! from a configured directory; everything stateful lives in the core crate.

pub mod error;
pub mod protocol;
pub mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use pgeforge_core::BuildPipeline;

pub use error::{ServerError, ServerResult};
pub use routes::{AppState, create_router};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory of static front-end assets served at `/`.
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_dir: PathBuf::from("public_html"),
        }
    }
}

/// Start the pgeforge server.
pub async fn serve(pipeline: Arc<BuildPipeline>, config: ServerConfig) -> ServerResult<()> {
    let state = Arc::new(AppState { pipeline });
    let app = create_router(state, &config.public_dir);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| {
            ServerError::InvalidAddress(format!("{}:{}", config.host, config.port))
        })?;

    tracing::info!("pgeforge server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Ctrl+C for graceful shutdown
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("server shutdown complete");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, PathBuf::from("public_html"));
    }
}
