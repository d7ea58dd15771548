use anyhow::{Context, Result};
use solar_core::{Config, provider::provider_from_config};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use crate::{routes, state::AppState};

async fn bind_listener(addr: SocketAddr) -> Result<TcpListener> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Failed to bind solar-dashboard on {addr}: port already in use. Re-run with --port to choose another port."
            );
        }
        Err(err) => Err(err).with_context(|| format!("failed to bind solar-dashboard on {addr}")),
    }
}

pub async fn run(config: Config) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let provider = provider_from_config(&config)?;
    let app = routes::router(AppState::new(Arc::from(provider)));

    let listener = bind_listener(addr).await?;
    tracing::info!("Solar RD dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("Shutdown signal received, stopping");
}
