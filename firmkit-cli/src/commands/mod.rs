//! Commands module
//!
//! Defines the CLI commands and their handlers.

mod flash;
mod setup;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Set up the pinned firmware development environment
    Setup,
    /// Provision a device identity and flash the firmware
    Flash {
        /// Serial port the device is attached to (e.g. /dev/ttyUSB0 or COM3)
        port: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Setup => setup::handle_setup(config),
        Commands::Flash { port } => flash::handle_flash(&port, config).await,
    }
}
