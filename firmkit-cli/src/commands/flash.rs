//! Flash command handler
//!
//! Provisions a fresh device identity against the issuance service,
//! persists it for the firmware build, and builds and flashes the
//! firmware over the given serial port. Strictly ordered: the API key
//! is loaded before the service is contacted, and both credential
//! files are written before any build tool runs.

use anyhow::{Context, Result};
use colored::*;

use crate::config::Config;
use crate::exec::CommandExecutor;
use firmkit_client::{ProvisioningClient, secrets};
use firmkit_core::HostOs;

/// Handle the flash command
pub async fn handle_flash(port: &str, config: &Config) -> Result<()> {
    // Pre-flight: resolve the platform before touching secrets or network
    let host = HostOs::detect()?;

    let api_key = secrets::load_api_key(&config.secrets_path)?;

    let client = ProvisioningClient::new(&config.provision_url);
    let bundle = client.issue_credential(&api_key).await?;
    println!("{} {}", "Issued device id:".bold(), bundle.device_id);

    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "could not create data directory {}",
            config.data_dir.display()
        )
    })?;
    let (id_path, cert_path) = bundle.persist(&config.data_dir)?;
    println!(
        "  {} {} and {}",
        "Updated".green(),
        id_path.display(),
        cert_path.display()
    );

    let exec = CommandExecutor::new(host);
    exec.run(&["idf.py", "build", "flash", "-p", port], None)
        .context("Error building and flashing firmware")?;

    println!("{}", format!("✓ Flashed new device on {port}").green().bold());
    Ok(())
}
