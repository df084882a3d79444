//! Setup command handler
//!
//! Builds and runs the environment bootstrap pipeline: clone the outer
//! framework, pin both frameworks to their exact commits, resolve
//! submodules, and install the toolchain. The pipeline is strictly
//! linear and fail-fast; a failed run is re-invoked from the start
//! after the operator removes the clone directory.

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::config::Config;
use crate::exec::CommandExecutor;
use crate::gitrepo::RepositoryBootstrapper;
use crate::toolchain::ToolchainInstaller;
use firmkit_core::{HostOs, Pipeline, Step};

/// Handle the setup command
///
/// The host OS check runs first so an unsupported platform terminates
/// before any clone, network call, or write.
pub fn handle_setup(config: &Config) -> Result<()> {
    let host = HostOs::detect()?;
    println!("Setting up development environment ({host})");

    bootstrap_pipeline(config, host).run()?;

    println!(
        "{}",
        "✓ Development environment set up successfully"
            .green()
            .bold()
    );
    Ok(())
}

/// Build the ordered bootstrap step list
///
/// Submodule resolution is asymmetric on purpose: the outer framework
/// is initialized non-recursively because the inner framework manages
/// its own nested dependency tree, which is resolved recursively in
/// its own step. The outer install script drives the inner framework's
/// installer, so one toolchain install step covers both.
fn bootstrap_pipeline(config: &Config, host: HostOs) -> Pipeline {
    let exec = CommandExecutor::new(host);
    let repo = RepositoryBootstrapper::new(exec);
    let installer = ToolchainInstaller::new(exec);

    let origin = config.framework_origin.clone();
    let outer: PathBuf = config.framework_dir.clone();
    let inner: PathBuf = outer.join(&config.inner_dir);
    let outer_pin = config.outer_pin.clone();
    let inner_pin = config.inner_pin.clone();

    let steps = vec![
        Step::new(
            format!("Clone {} repository", outer_pin.repository),
            format!("Error cloning {} repository", outer_pin.repository),
            {
                let outer = outer.clone();
                move || repo.clone_repo(&origin, &outer)
            },
        ),
        Step::new(
            format!("Register {} clone as a trusted git directory", outer_pin.repository),
            "Error registering outer clone as a trusted git directory",
            {
                let outer = outer.clone();
                move || repo.trust(&outer)
            },
        ),
        Step::new(
            format!("Check out pinned revision {outer_pin}"),
            format!("Error checking out pinned {} revision", outer_pin.repository),
            {
                let outer = outer.clone();
                let pin = outer_pin.clone();
                move || repo.checkout(&outer, &pin)
            },
        ),
        Step::new(
            format!("Initialize {} submodules", outer_pin.repository),
            format!("Error initializing {} submodules", outer_pin.repository),
            {
                let outer = outer.clone();
                move || repo.init_submodules(&outer, false)
            },
        ),
        Step::new(
            format!("Register {} clone as a trusted git directory", inner_pin.repository),
            "Error registering inner clone as a trusted git directory",
            {
                let inner = inner.clone();
                move || repo.trust(&inner)
            },
        ),
        Step::new(
            format!("Check out pinned revision {inner_pin}"),
            format!("Error checking out pinned {} revision", inner_pin.repository),
            {
                let inner = inner.clone();
                let pin = inner_pin.clone();
                move || repo.checkout(&inner, &pin)
            },
        ),
        Step::new(
            format!("Initialize {} submodules recursively", inner_pin.repository),
            format!("Error initializing {} submodules", inner_pin.repository),
            {
                let inner = inner.clone();
                move || repo.init_submodules(&inner, true)
            },
        ),
        Step::new(
            "Install toolchain dependencies",
            "Error installing toolchain dependencies",
            move || installer.install(&outer),
        ),
    ];

    Pipeline::new("bootstrap", steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_step_order() {
        let pipeline = bootstrap_pipeline(&Config::default(), HostOs::Linux);
        let descriptions = pipeline.descriptions();

        assert_eq!(descriptions.len(), 8);
        assert!(descriptions[0].starts_with("Clone esp-adf"));
        assert!(descriptions[1].contains("trusted git directory"));
        assert!(descriptions[2].contains("esp-adf@"));
        assert!(descriptions[3].contains("esp-adf submodules"));
        assert!(descriptions[4].contains("esp-idf"));
        assert!(descriptions[5].contains("esp-idf@"));
        assert!(descriptions[6].contains("recursively"));
        assert_eq!(descriptions[7], "Install toolchain dependencies");
    }

    #[test]
    fn test_trust_precedes_every_repo_operation() {
        let pipeline = bootstrap_pipeline(&Config::default(), HostOs::Linux);
        let descriptions = pipeline.descriptions();

        let outer_trust = descriptions
            .iter()
            .position(|d| d.contains("esp-adf clone as a trusted"))
            .unwrap();
        let outer_checkout = descriptions
            .iter()
            .position(|d| d.contains("esp-adf@"))
            .unwrap();
        let inner_trust = descriptions
            .iter()
            .position(|d| d.contains("esp-idf clone as a trusted"))
            .unwrap();
        let inner_checkout = descriptions
            .iter()
            .position(|d| d.contains("esp-idf@"))
            .unwrap();

        assert!(outer_trust < outer_checkout);
        assert!(inner_trust < inner_checkout);
    }

    #[test]
    fn test_only_inner_submodules_are_recursive() {
        let pipeline = bootstrap_pipeline(&Config::default(), HostOs::Linux);
        let recursive: Vec<_> = pipeline
            .descriptions()
            .into_iter()
            .filter(|d| d.contains("recursively"))
            .collect();

        assert_eq!(recursive.len(), 1);
        assert!(recursive[0].contains("esp-idf"));
    }
}
