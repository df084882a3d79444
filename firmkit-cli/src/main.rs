//! Firmkit CLI
//!
//! Command-line interface for bootstrapping the pinned firmware build
//! toolchain and provisioning device identities.

mod commands;
mod config;
mod exec;
mod gitrepo;
mod toolchain;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "firmkit")]
#[command(about = "Firmware toolchain bootstrap and device provisioning", long_about = None)]
struct Cli {
    /// Device issuance endpoint
    #[arg(long, env = "FIRMKIT_PROVISION_URL")]
    provision_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firmkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.provision_url {
        config.provision_url = url;
    }
    config.validate()?;

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_requires_a_serial_port() {
        let parsed = Cli::try_parse_from(["firmkit", "flash"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_flash_accepts_a_serial_port() {
        let parsed = Cli::try_parse_from(["firmkit", "flash", "/dev/ttyUSB0"]).unwrap();
        match parsed.command {
            Commands::Flash { port } => assert_eq!(port, "/dev/ttyUSB0"),
            _ => panic!("expected flash command"),
        }
    }

    #[test]
    fn test_setup_takes_no_positional_arguments() {
        assert!(Cli::try_parse_from(["firmkit", "setup"]).is_ok());
        assert!(Cli::try_parse_from(["firmkit", "setup", "extra"]).is_err());
    }

    #[test]
    fn test_provision_url_flag_overrides_config() {
        let parsed = Cli::try_parse_from([
            "firmkit",
            "--provision-url",
            "https://staging.example.com/create-device",
            "setup",
        ])
        .unwrap();
        assert_eq!(
            parsed.provision_url.as_deref(),
            Some("https://staging.example.com/create-device")
        );
    }
}
