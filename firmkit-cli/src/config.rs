//! CLI configuration
//!
//! Defines every external location the pipelines touch: the framework
//! origin, the pinned revisions, the issuance endpoint, and the local
//! secret and data paths. Values come from built-in defaults with
//! `FIRMKIT_*` environment overrides.

use std::path::PathBuf;

use firmkit_core::PinnedRevision;

/// Upstream origin of the outer audio framework
const DEFAULT_FRAMEWORK_ORIGIN: &str = "https://github.com/espressif/esp-adf.git";
/// Directory the outer framework is cloned into
const DEFAULT_FRAMEWORK_DIR: &str = "ADF";
/// Subdirectory of the outer clone holding the inner framework
const DEFAULT_INNER_DIR: &str = "esp-idf";
/// Pinned outer framework commit
const DEFAULT_ADF_REVISION: &str = "8a3b56a9b65af796164ebffc4e4bc45f144760b3";
/// Pinned inner framework commit
const DEFAULT_IDF_REVISION: &str = "6568f8c553f89c01c101da4d6c735379b8221858";
/// Device issuance endpoint
const DEFAULT_PROVISION_URL: &str =
    "https://b1rklukfdi.execute-api.eu-central-1.amazonaws.com/setup/provision/create-device";
/// Local file holding the pre-shared API key
const DEFAULT_SECRETS_PATH: &str = "scripts/secrets.txt";
/// Directory the firmware build reads credentials from
const DEFAULT_DATA_DIR: &str = "data";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Clone origin of the outer framework
    pub framework_origin: String,

    /// Destination directory for the outer framework clone
    pub framework_dir: PathBuf,

    /// Name of the inner framework directory inside the outer clone
    pub inner_dir: String,

    /// Commit the outer framework is pinned to
    pub outer_pin: PinnedRevision,

    /// Commit the inner framework is pinned to
    pub inner_pin: PinnedRevision,

    /// Device issuance endpoint URL
    pub provision_url: String,

    /// Path of the API key secret file
    pub secrets_path: PathBuf,

    /// Directory `device_id.txt` and `cert.txt` are written to
    pub data_dir: PathBuf,
}

impl Config {
    /// Creates configuration from `FIRMKIT_*` environment variables,
    /// falling back to the built-in defaults for anything unset
    pub fn from_env() -> Self {
        let var = |name: &str, default: &str| {
            std::env::var(name).unwrap_or_else(|_| default.to_string())
        };

        Self {
            framework_origin: var("FIRMKIT_FRAMEWORK_ORIGIN", DEFAULT_FRAMEWORK_ORIGIN),
            framework_dir: var("FIRMKIT_FRAMEWORK_DIR", DEFAULT_FRAMEWORK_DIR).into(),
            inner_dir: var("FIRMKIT_INNER_DIR", DEFAULT_INNER_DIR),
            outer_pin: PinnedRevision::new(
                "esp-adf",
                var("FIRMKIT_ADF_REVISION", DEFAULT_ADF_REVISION),
            ),
            inner_pin: PinnedRevision::new(
                "esp-idf",
                var("FIRMKIT_IDF_REVISION", DEFAULT_IDF_REVISION),
            ),
            provision_url: var("FIRMKIT_PROVISION_URL", DEFAULT_PROVISION_URL),
            secrets_path: var("FIRMKIT_SECRETS_PATH", DEFAULT_SECRETS_PATH).into(),
            data_dir: var("FIRMKIT_DATA_DIR", DEFAULT_DATA_DIR).into(),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.framework_origin.is_empty() {
            anyhow::bail!("framework origin cannot be empty");
        }

        if !self.provision_url.starts_with("http://") && !self.provision_url.starts_with("https://")
        {
            anyhow::bail!("provision url must start with http:// or https://");
        }

        if self.outer_pin.commit.is_empty() || self.inner_pin.commit.is_empty() {
            anyhow::bail!("pinned revisions cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framework_origin: DEFAULT_FRAMEWORK_ORIGIN.to_string(),
            framework_dir: DEFAULT_FRAMEWORK_DIR.into(),
            inner_dir: DEFAULT_INNER_DIR.to_string(),
            outer_pin: PinnedRevision::new("esp-adf", DEFAULT_ADF_REVISION),
            inner_pin: PinnedRevision::new("esp-idf", DEFAULT_IDF_REVISION),
            provision_url: DEFAULT_PROVISION_URL.to_string(),
            secrets_path: DEFAULT_SECRETS_PATH.into(),
            data_dir: DEFAULT_DATA_DIR.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.inner_pin.repository, "esp-idf");
    }

    #[test]
    fn test_validation_rejects_bad_url() {
        let mut config = Config::default();
        config.provision_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_pin() {
        let mut config = Config::default();
        config.inner_pin.commit = String::new();
        assert!(config.validate().is_err());
    }
}
