//! Pre-shared API key loading
//!
//! The issuance service authenticates callers with a pre-shared key
//! kept in a local plain-text file outside version control. Loading it
//! is the first step of every provisioning run, so an unreachable
//! service can never mask a missing key.

use std::fs;
use std::path::Path;

use crate::error::{ClientError, Result};

/// Read and trim the API key from a secret file
///
/// A missing or unreadable file, or a file holding only whitespace,
/// is fatal with a message pointing at the setup documentation.
pub fn load_api_key(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path).map_err(|source| ClientError::ApiKeyUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let key = raw.trim();
    if key.is_empty() {
        return Err(ClientError::ApiKeyEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(tag: &str, contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("firmkit-secret-{tag}-{}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_trims_surrounding_whitespace() {
        let path = temp_file("trim", "  sk-test-key \n");
        assert_eq!(load_api_key(&path).unwrap(), "sk-test-key");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_points_at_documentation() {
        let path = std::env::temp_dir().join("firmkit-secret-does-not-exist");
        let err = load_api_key(&path).unwrap_err();
        assert!(matches!(err, ClientError::ApiKeyUnreadable { .. }));

        let message = err.to_string();
        assert!(message.contains("could not read api key"));
        assert!(message.contains("README"));
    }

    #[test]
    fn test_whitespace_only_file_is_rejected() {
        let path = temp_file("empty", "  \n\t\n");
        let err = load_api_key(&path).unwrap_err();
        assert!(matches!(err, ClientError::ApiKeyEmpty { .. }));
        fs::remove_file(&path).unwrap();
    }
}
