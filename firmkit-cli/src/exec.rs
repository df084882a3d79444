//! External command execution
//!
//! One executor per run, carrying the invocation strategy resolved
//! from the detected host OS. Commands inherit the parent's stdio so
//! operators see tool output as it happens; a non-zero exit or spawn
//! failure is an error and there is no retry.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

use firmkit_core::HostOs;

/// Runs external processes with the platform-appropriate invocation
#[derive(Debug, Clone, Copy)]
pub struct CommandExecutor {
    host: HostOs,
}

impl CommandExecutor {
    pub fn new(host: HostOs) -> Self {
        Self { host }
    }

    /// The host OS this executor was resolved for
    pub fn host(&self) -> HostOs {
        self.host
    }

    /// Run a command to completion in an explicit working directory
    ///
    /// `cwd` of `None` runs in the process's current directory. The
    /// directory is passed to the child directly; the parent process's
    /// working directory is never mutated.
    pub fn run(&self, argv: &[&str], cwd: Option<&Path>) -> Result<()> {
        let argv_owned: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
        let (program, args) = self
            .host
            .invocation(&argv_owned)
            .ok_or_else(|| anyhow::anyhow!("cannot run an empty command"))?;

        debug!("Executing: {} {:?} (cwd: {:?})", program, args, cwd);

        let mut command = Command::new(&program);
        command.args(&args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .with_context(|| format!("failed to spawn '{}'", argv.join(" ")))?;

        if !status.success() {
            anyhow::bail!(
                "command '{}' failed with {}",
                argv.join(" "),
                status
                    .code()
                    .map(|c| format!("exit code {c}"))
                    .unwrap_or_else(|| "no exit code".to_string())
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let exec = CommandExecutor::new(HostOs::Linux);
        assert!(exec.run(&["true"], None).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_an_error_with_diagnostic() {
        let exec = CommandExecutor::new(HostOs::Linux);
        let err = exec.run(&["false"], None).unwrap_err();
        assert!(err.to_string().contains("false"));
        assert!(err.to_string().contains("exit code 1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unspawnable_command_is_an_error() {
        let exec = CommandExecutor::new(HostOs::Linux);
        let err = exec
            .run(&["firmkit-definitely-not-a-real-tool"], None)
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to spawn"));
    }

    #[test]
    fn test_empty_argv_is_rejected() {
        let exec = CommandExecutor::new(HostOs::Linux);
        assert!(exec.run(&[], None).is_err());
    }
}
