//! Configuration inspection

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use users_admin_server::AppConfig;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration (file + environment), password masked
    Show,
}

pub fn run_config(config_path: Option<&Path>, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = AppConfig::load(config_path).context("Failed to load configuration")?;
            print!("{}", config.to_redacted_toml()?);
        }
    }
    Ok(())
}
