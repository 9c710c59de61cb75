//! Edge router (v1)
//!
//! Two static file origins behind a path-prefix reverse proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────┐
//!                      │              EDGE ROUTER             │
//!   Client Request     │  ┌──────────┐   ┌────────────────┐   │
//!   ───────────────────┼─▶│ http     │──▶│ routing        │   │
//!                      │  │ server   │   │ /server1* → A  │   │
//!                      │  └──────────┘   │ else      → B  │   │
//!                      │                 └───────┬────────┘   │
//!   Client Response    │  ┌──────────┐           │            │
//!   ◀──────────────────┼──│ relay    │◀──────────┘            │
//!                      │  └──────────┘   hyper-util client    │
//!                      └────────┬─────────────────┬───────────┘
//!                               ▼                 ▼
//!                     ┌───────────────┐  ┌───────────────┐
//!                     │ Server1 :6000 │  │ Server2 :4000 │
//!                     │ ./public      │  │ ./public2     │
//!                     └───────────────┘  └───────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use edge_router::config::{load_config, ProxyConfig};
use edge_router::lifecycle::{launch, signals, Component, Shutdown};
use edge_router::observability::logging;
use edge_router::origin::TracingAccessLog;

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Path-prefix edge router in front of two static file origins", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run both origins and the edge router (default)
    All,
    /// Run only Server1 (port 6000, ./public)
    Server1,
    /// Run only Server2 (port 4000, ./public2)
    Server2,
    /// Run only the edge router
    Router,
}

impl From<Commands> for Component {
    fn from(command: Commands) -> Self {
        match command {
            Commands::All => Component::All,
            Commands::Server1 => Component::Server1,
            Commands::Server2 => Component::Server2,
            Commands::Router => Component::Router,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!("edge-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        router = %config.listener.bind_address,
        server1 = %config.origins.server1.bind_address,
        server2 = %config.origins.server2.bind_address,
        connect_timeout_secs = config.timeouts.connect_secs,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::forward_signals(shutdown.clone());

    let component = cli.command.unwrap_or(Commands::All).into();
    launch(&config, component, Arc::new(TracingAccessLog), &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
