use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::{Dispatcher, ItemStore, StoreError};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::errors::StartupError;
use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {}:{}: {e}", server.host, server.port)))
}

/// Router wired to an already-open backend.
pub fn build_app(store: Arc<dyn ItemStore>) -> Router {
    let state = AppState { dispatcher: Dispatcher::new(store) };
    routes::build_router(state, build_cors())
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(event = "shutdown_signal", "shutdown signal received");
}

/// Open the configured backend, serve HTTP until a shutdown signal, then close the backend
/// so durable state is flushed before the process exits.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let store = service::storage::open(&cfg).await?;
    let app = build_app(Arc::clone(&store));

    let addr = bind_addr(&cfg.server)?;
    let listener = TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, "todo server listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from);
    if let Err(e) = &served {
        error!(error = %e, "http server stopped with an error");
    }

    info!("closing storage backend");
    let closed = store.close().await;
    shutdown_outcome(served, closed)
}

/// A serve failure takes precedence; a close failure alongside it is logged, not lost.
fn shutdown_outcome(served: anyhow::Result<()>, closed: Result<(), StoreError>) -> Result<(), StartupError> {
    match (served, closed) {
        (Err(serve_err), Err(close_err)) => {
            error!(error = %close_err, "storage close failed after server error");
            Err(serve_err.into())
        }
        (Err(serve_err), Ok(())) => Err(serve_err.into()),
        (Ok(()), closed) => closed.map_err(StartupError::from),
    }
}
