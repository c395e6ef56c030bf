use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use ragask_dev_server::logging::setup_logging;
use ragask_dev_server::{build_app, AppState, DevServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DevServerConfig::parse();

    // Initialize logging before anything else can fail
    if let Err(e) = setup_logging(config.log_dir.clone()) {
        eprintln!("Warning: Failed to setup logging: {e}");
    }

    let state = AppState::from_config(&config).context("invalid proxy configuration")?;
    if !state.dist.join("index.html").is_file() {
        tracing::warn!(
            "No index.html in {:?}; build the client first (e.g. `trunk build`)",
            state.dist
        );
    }

    tracing::info!(
        target = %state.target,
        prefixes = ?state.prefixes,
        "Forwarding API paths to backend"
    );

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Dev server listening on http://{addr}");

    axum::serve(listener, build_app(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("Dev server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
