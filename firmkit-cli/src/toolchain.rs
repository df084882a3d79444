//! Toolchain installation
//!
//! Runs the OS-appropriate install script shipped at a framework
//! repository's root. The script name is resolved from the host OS
//! that was detected once at startup.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::exec::CommandExecutor;

/// Installs a framework's toolchain via its bundled install script
#[derive(Debug, Clone, Copy)]
pub struct ToolchainInstaller {
    exec: CommandExecutor,
}

impl ToolchainInstaller {
    pub fn new(exec: CommandExecutor) -> Self {
        Self { exec }
    }

    /// Run the install script at `repo_dir`'s root
    pub fn install(&self, repo_dir: &Path) -> Result<()> {
        let script = self.exec.host().install_script();
        self.exec.run(&[script], Some(repo_dir))?;
        info!("Installed toolchain from {}", repo_dir.display());
        Ok(())
    }
}
