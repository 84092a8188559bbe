//! Reference background service.
//!
//! Listens on the configured endpoint and serves `GetStatus`, `Start` and
//! `Stop`, emitting `StatusChanged` after every successful transition. Runs
//! until Ctrl-C or SIGTERM.

use clap::Parser;
use firebox::ServiceConfig;
use firebox::service::{Endpoint, LifecycleHandler, Listener, ServiceServer};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// FireBox background service.
#[derive(Parser)]
#[command(name = "firebox-service", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint to listen on (`unix:<path>` or `tcp:<host:port>`).
    #[arg(long)]
    endpoint: Option<String>,

    /// Begin in the stopped state instead of running.
    #[arg(long)]
    stopped: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("firebox=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::load_or_default()?,
    };
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let endpoint = Endpoint::parse(&config.endpoint)?;
    let listener = Listener::bind(&endpoint).await?;
    tracing::info!(
        endpoint = %listener.local_endpoint()?,
        service = %config.service_name,
        running = !cli.stopped,
        "service listening"
    );

    let server = ServiceServer::new(LifecycleHandler::new(!cli.stopped), config.event_capacity);
    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_shutdown(shutdown.clone()));

    server.run(listener, shutdown).await?;
    tracing::info!("service stopped");
    Ok(())
}

async fn wait_for_shutdown(token: CancellationToken) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => tracing::info!("received Ctrl-C"),
                    _ = sigterm.recv() => tracing::info!("received SIGTERM"),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot install SIGTERM handler; Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received Ctrl-C");
    }
    token.cancel();
}
