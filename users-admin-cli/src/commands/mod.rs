//! Subcommand implementations

pub mod config;
pub mod serve;

pub use config::{run_config, ConfigCommands};
pub use serve::{run_serve, ServeArgs};
