//! Dependency repository bootstrapping
//!
//! Wraps the git operations the setup pipeline needs: clone, trust
//! registration, pinned checkout, and submodule resolution. Every
//! operation receives its repository directory explicitly so no step
//! depends on the process-wide working directory.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::exec::CommandExecutor;
use firmkit_core::PinnedRevision;

/// Clones and pins dependency repositories
#[derive(Debug, Clone, Copy)]
pub struct RepositoryBootstrapper {
    exec: CommandExecutor,
}

impl RepositoryBootstrapper {
    pub fn new(exec: CommandExecutor) -> Self {
        Self { exec }
    }

    /// Clone `origin` into `dest`
    ///
    /// Fails if `dest` already exists; removing a previous run's clone
    /// is the caller's responsibility.
    pub fn clone_repo(&self, origin: &str, dest: &Path) -> Result<()> {
        let dest_str = dest.display().to_string();
        self.exec.run(&["git", "clone", origin, &dest_str], None)?;
        info!("Cloned {} into {}", origin, dest_str);
        Ok(())
    }

    /// Register a cloned directory as safe for git to operate on
    ///
    /// Fresh clones made by another user (CI containers, mounted
    /// volumes) are refused by git with a dubious-ownership error
    /// until their absolute path is added to `safe.directory`. The
    /// registration is global and idempotent.
    pub fn trust(&self, repo_dir: &Path) -> Result<()> {
        let absolute = std::fs::canonicalize(repo_dir)
            .with_context(|| format!("cannot resolve repository path {}", repo_dir.display()))?;
        let absolute_str = absolute.display().to_string();

        self.exec.run(
            &[
                "git",
                "config",
                "--global",
                "--add",
                "safe.directory",
                &absolute_str,
            ],
            None,
        )?;
        info!("Registered {} as a trusted git directory", absolute_str);
        Ok(())
    }

    /// Check the repository out to its pinned revision
    pub fn checkout(&self, repo_dir: &Path, pin: &PinnedRevision) -> Result<()> {
        self.exec
            .run(&["git", "checkout", &pin.commit], Some(repo_dir))?;
        info!("Checked out {}", pin);
        Ok(())
    }

    /// Initialize and update the repository's submodules
    ///
    /// `recursive` resolves nested submodule trees as well; pass
    /// `false` when the repository's own tooling manages those.
    pub fn init_submodules(&self, repo_dir: &Path, recursive: bool) -> Result<()> {
        let mut argv = vec!["git", "submodule", "update", "--init"];
        if recursive {
            argv.push("--recursive");
        }

        self.exec.run(&argv, Some(repo_dir))?;
        info!(
            "Initialized submodules in {} (recursive: {})",
            repo_dir.display(),
            recursive
        );
        Ok(())
    }
}
