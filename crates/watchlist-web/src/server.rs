//! HTTP Server
//!
//! Axum-based server for the watch-list pages.

use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::create_router;
use crate::state::AppState;

pub struct HttpServer {
    addr: SocketAddr,
    state: AppState,
}

impl HttpServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        Self { addr, state }
    }

    /// Serve until `shutdown` resolves, then finish in-flight requests
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = create_router(self.state);

        let listener = TcpListener::bind(&self.addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to {}", self.addr))?;

        info!(
            operation = "server_started",
            addr = %self.addr,
            "Watchlist listening on http://{}",
            self.addr
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown.await;
                info!(operation = "server_shutdown", "HTTP server shutting down");
            })
            .await
            .context("HTTP server error")?;

        Ok(())
    }
}
