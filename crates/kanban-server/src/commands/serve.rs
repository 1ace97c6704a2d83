use anyhow::{Context, Result};
use kanban_core::rollover::RolloverScheduler;
use kanban_server::api::{self, AppState};
use kanban_server::config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::cli::ServeCommand;

pub async fn serve(mut config: Config, command: ServeCommand) -> Result<()> {
    if let Some(host) = command.host {
        config.host = host;
    }
    if let Some(port) = command.port {
        config.port = port;
    }

    let board = Arc::new(kanban_server::open_board(&config).await?);
    tracing::info!(
        database = %config.database_path,
        open_day = %board.open_day().await,
        "board opened"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = if config.scheduler_enabled && !command.no_scheduler {
        Some(RolloverScheduler::new(board.clone(), config.schedule()).spawn(shutdown_rx))
    } else {
        tracing::warn!("rollover scheduler disabled");
        None
    };

    let app = api::router(AppState::new(board.clone()));
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Some(handle) = scheduler {
        let _ = handle.await;
    }

    // Last chance for state a failed flush left behind.
    if board.is_dirty().await {
        if let Err(err) = board.flush().await {
            tracing::error!(error = ?err, "unsaved board state lost on shutdown");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
