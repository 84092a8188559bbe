//! Command-line front end for the service client.

use anyhow::Context;
use clap::{Parser, Subcommand};
use firebox::service::client::CallResult;
use firebox::{PendingCall, ServiceClient, ServiceConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Query and control the FireBox background service.
#[derive(Parser)]
#[command(name = "firebox-ctl", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the service endpoint (`unix:<path>` or `tcp:<host:port>`).
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the service status.
    Status,

    /// Ask the service to start.
    Start,

    /// Ask the service to stop.
    Stop,

    /// Print every status change until interrupted.
    Watch,
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

    let client = ServiceClient::connect(&config).await?;
    match cli.command.unwrap_or(Command::Status) {
        Command::Status => {
            let status = finish(client.get_status_async()).await?;
            println!("{status}");
        }
        Command::Start => report("start", finish(client.start_async()).await?),
        Command::Stop => report("stop", finish(client.stop_async()).await?),
        Command::Watch => watch(&client).await?,
    }
    Ok(())
}

/// Wait for `call`, naming the method and request id if it fails.
async fn finish<T: CallResult>(mut call: PendingCall<T>) -> anyhow::Result<T> {
    let outcome = call.result().await;
    outcome.with_context(|| {
        format!(
            "{} request {} did not complete",
            call.method().as_str(),
            call.request_id()
        )
    })
}

fn report(action: &str, success: bool) {
    if success {
        println!("{action}: ok");
    } else {
        println!("{action}: refused (already in that state)");
    }
}

async fn watch(client: &ServiceClient) -> anyhow::Result<()> {
    let status = finish(client.get_status_async()).await?;
    println!("{status}");

    let _subscription = client.subscribe_status_changed(|event| println!("{}", event.status));
    tokio::select! {
        result = tokio::signal::ctrl_c() => result?,
        () = client.closed() => {
            anyhow::bail!("service closed the connection");
        }
    }
    Ok(())
}
