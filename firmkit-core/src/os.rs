//! Host OS detection and subprocess invocation strategy
//!
//! The supported platform set is resolved exactly once, before any
//! network or filesystem mutation. Everything downstream consumes the
//! resolved [`HostOs`] value instead of re-branching on the platform.

use thiserror::Error;

/// Raised when the host platform is outside the supported set
#[derive(Debug, Error)]
#[error("unsupported OS '{0}': only linux and windows are supported")]
pub struct UnsupportedOs(pub String);

/// A supported host operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Linux,
    Windows,
}

impl HostOs {
    /// Detect the host OS, rejecting anything outside the supported set
    ///
    /// This is the pre-flight check: callers must run it before any
    /// clone, network call, or write.
    pub fn detect() -> Result<Self, UnsupportedOs> {
        match std::env::consts::OS {
            "linux" => Ok(HostOs::Linux),
            "windows" => Ok(HostOs::Windows),
            other => Err(UnsupportedOs(other.to_string())),
        }
    }

    /// Name of the toolchain install script at a repository root
    pub fn install_script(&self) -> &'static str {
        match self {
            HostOs::Linux => "./install.sh",
            HostOs::Windows => "install.bat",
        }
    }

    /// Resolve the invocation for an argv on this platform
    ///
    /// Windows commands run through `cmd /C` so batch scripts and
    /// PATHEXT-resolved tools (`idf.py`, `install.bat`) work; Linux
    /// commands are spawned directly.
    ///
    /// # Returns
    /// `(program, args)` ready for process spawning, or `None` for an
    /// empty argv
    pub fn invocation(&self, argv: &[String]) -> Option<(String, Vec<String>)> {
        let (program, rest) = argv.split_first()?;
        Some(match self {
            HostOs::Linux => (program.clone(), rest.to_vec()),
            HostOs::Windows => {
                let mut args = vec!["/C".to_string()];
                args.extend(argv.iter().cloned());
                ("cmd".to_string(), args)
            }
        })
    }
}

impl std::fmt::Display for HostOs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostOs::Linux => write!(f, "linux"),
            HostOs::Windows => write!(f, "windows"),
        }
    }
}
