use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tokio::signal;
use tracing::info;
use watchlist_config::Config;
use watchlist_web::{AppState, HttpServer};

pub async fn run_serve(mut config: Config, listen: Option<String>, output: &Output) -> Result<()> {
    if let Some(listen) = listen {
        config.server.listen_addr = listen;
    }
    config.validate().map_err(|e| eyre!("Invalid configuration: {}", e))?;

    let addr = config.listen_addr().map_err(|e| eyre!("{}", e))?;
    let state = AppState::from_config(&config)
        .map_err(|e| eyre!("Failed to set up clients: {}", e))?;

    info!(
        operation = "serve",
        tmdb = %config.tmdb.base_url,
        database = %config.database.name,
        "Starting watchlist server"
    );
    output.info(format!("Serving on http://{}", addr));

    HttpServer::new(addr, state)
        .run(shutdown_signal())
        .await
        .map_err(|e| eyre!("{:#}", e))?;

    output.success("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = wait_for_sigterm() => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(unix)]
async fn wait_for_sigterm() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::warn!("Failed to register SIGTERM handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_sigterm() {
    std::future::pending::<()>().await
}
