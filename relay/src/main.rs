//! Relay entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use registrar::LiveRegistrar;
use shared::logging::{self, log_error, log_shutdown, log_success};
use shared::{Component, RelayConfig, component_info};
use tokio::signal;

use relay::Relay;

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Relay between intake forms and Zoom webinar registration")]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port for the HTTP server
    #[arg(long, default_value = "8000")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = RelayConfig::from_env().context("Loading Zoom configuration")?;
    component_info!(
        Component::Relay,
        api_base = %config.api_base,
        workers = config.registration.workers,
        max_retries = config.registration.max_retries,
        "Configuration loaded"
    );

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", args.host, args.port))?;

    let registrar = LiveRegistrar::from_config(&config).context("Building Zoom client")?;
    let relay = Relay::new(Arc::new(registrar));

    relay.run(addr, shutdown_signal()).await?;

    log_success(Component::Relay, "Relay stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log_shutdown(Component::Relay, "Received Ctrl+C signal"),
        Err(err) => log_error(Component::Relay, "Signal handling", &err),
    }
}
