//! users-admin CLI - HTTP CRUD service for the users table
//!
//! - `serve`: run the HTTP server
//! - `config show`: print the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod env;
mod tracing_setup;

use commands::{ConfigCommands, ServeArgs};
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "users-admin",
    author,
    version,
    about = "Minimal CRUD HTTP service for a PostgreSQL users table"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Path to the TOML config file (default: ./users-admin.toml if present)
    #[arg(long, short = 'c', global = true, env = "USERS_ADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so USERS_ADMIN_CONFIG can come from .env
    let dotenv_sources = env::load_dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    for source in &dotenv_sources {
        debug!("Loaded .env from {}", source.display());
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(cli.config.as_deref(), args).await?,
        Commands::Config(command) => commands::run_config(cli.config.as_deref(), command)?,
    }

    Ok(())
}
