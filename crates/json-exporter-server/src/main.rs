//! json-exporter
//!
//! Polls one JSON endpoint and exports the configured values:
//! - `json-exporter <ENDPOINT> <CONFIG_PATH> [--listen ADDR]`
//! - `/metrics`, `/healthz`, `/readyz`
//! - Ctrl-C drains: readiness flips to 503, poller and server stop.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use json_exporter_core::error::{JsonExporterError, Result};
use json_exporter_server::{app_state::AppState, cli::Cli, config, poller::Poller, router, source::HttpSource};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error=%e, "json-exporter failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_from_file(&cli.config)?;
    if let Some(listen) = cli.listen {
        cfg.exporter.listen = listen;
    }
    let listen: SocketAddr = cfg.exporter.listen.parse().map_err(|e| {
        JsonExporterError::BadConfig(format!("exporter.listen must be a valid SocketAddr: {e}"))
    })?;

    let source = HttpSource::new(cli.endpoint.clone(), cfg.exporter.timeout())?;
    let state = AppState::new(cfg)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = Poller::new(state.clone(), Arc::new(source));
    let poll_task = tokio::spawn(poller.run(shutdown_rx));

    let app = router::build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| JsonExporterError::Internal(format!("failed to bind {listen}: {e}")))?;

    tracing::info!(%listen, endpoint=%cli.endpoint, metrics=state.scrapers().len(), "json-exporter starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state, shutdown_tx))
        .await
        .map_err(|e| JsonExporterError::Internal(format!("server failed: {e}")))?;

    let _ = poll_task.await;
    Ok(())
}

async fn shutdown_signal(state: AppState, shutdown_tx: watch::Sender<bool>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error=%e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("draining");
    state.set_draining();
    let _ = shutdown_tx.send(true);
}
