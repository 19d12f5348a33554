//! HTTP server command
//!
//! Opens the database session once, then serves the user routes until
//! Ctrl+C / SIGTERM. A failed connection is fatal.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use users_admin_server::db::open;
use users_admin_server::{run_server, AppConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (overrides config; default: 127.0.0.1:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let config = AppConfig::load(config_path).context("Failed to load configuration")?;

    let mut server = ServerConfig::from(&config.server);
    if let Some(bind) = args.bind {
        server.bind_addr = bind;
    }
    server.cors_permissive |= args.cors_permissive;

    tracing::info!("Starting users-admin server on {}", server.bind_addr);

    let pool = open(&config.database)
        .await
        .context("Failed to open database session")?;

    // Run server (blocks until shutdown)
    run_server(pool, server).await.context("Server error")?;

    Ok(())
}
