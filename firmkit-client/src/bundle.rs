//! Device credential bundle and persistence
//!
//! The downstream firmware build reads `device_id.txt` and `cert.txt`
//! as compile-time constants, so both files must always reflect the
//! same issuance response. Each file is written atomically (temp file
//! then rename) so a crashed run never leaves a half-written file at
//! the final path.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ClientError, Result};
use firmkit_core::sanitize_certificate;

/// File the raw device identifier is persisted to
pub const DEVICE_ID_FILE: &str = "device_id.txt";
/// File the sanitized certificate is persisted to
pub const CERT_FILE: &str = "cert.txt";

/// A device identity issued by the provisioning service
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DeviceCredentialBundle {
    /// Opaque fleet-unique device identifier
    pub device_id: String,
    /// PEM-encoded device certificate as returned by the service
    #[serde(rename = "X-Certificate-Pem")]
    pub certificate_pem: String,
}

impl DeviceCredentialBundle {
    /// The certificate with the PEM envelope and all newlines stripped
    pub fn sanitized_certificate(&self) -> String {
        sanitize_certificate(&self.certificate_pem)
    }

    /// Persist the device id and sanitized certificate under `data_dir`
    ///
    /// Writes `device_id.txt` then `cert.txt`. Each write is atomic and
    /// independently fallible; the matching error variant names the file
    /// that could not be written.
    pub fn persist(&self, data_dir: &Path) -> Result<(PathBuf, PathBuf)> {
        let id_path = data_dir.join(DEVICE_ID_FILE);
        write_atomic(&id_path, &self.device_id).map_err(|source| ClientError::DeviceIdWrite {
            path: id_path.clone(),
            source,
        })?;
        info!("Updated device id at {}", id_path.display());

        let cert_path = data_dir.join(CERT_FILE);
        write_atomic(&cert_path, &self.sanitized_certificate()).map_err(|source| {
            ClientError::CertificateWrite {
                path: cert_path.clone(),
                source,
            }
        })?;
        info!("Updated certificate at {}", cert_path.display());

        Ok((id_path, cert_path))
    }
}

/// Write `contents` to `path` via a temp file in the same directory
///
/// The rename is atomic on the platforms we support, so readers only
/// ever observe the old file or the complete new one.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("firmkit-bundle-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample_bundle() -> DeviceCredentialBundle {
        DeviceCredentialBundle {
            device_id: "abc123".to_string(),
            certificate_pem: "-----BEGIN CERTIFICATE-----\nXYZ\n-----END CERTIFICATE-----\n"
                .to_string(),
        }
    }

    #[test]
    fn test_parse_issuance_response_shape() {
        let body = r#"{"device_id": "abc123", "X-Certificate-Pem": "-----BEGIN CERTIFICATE-----\nXYZ\n-----END CERTIFICATE-----\n"}"#;
        let bundle: DeviceCredentialBundle = serde_json::from_str(body).unwrap();
        assert_eq!(bundle, sample_bundle());
    }

    #[test]
    fn test_parse_rejects_missing_certificate_field() {
        let body = r#"{"device_id": "abc123"}"#;
        assert!(serde_json::from_str::<DeviceCredentialBundle>(body).is_err());
    }

    #[test]
    fn test_persist_writes_both_files() {
        let dir = temp_dir("persist");
        let (id_path, cert_path) = sample_bundle().persist(&dir).unwrap();

        assert_eq!(fs::read_to_string(id_path).unwrap(), "abc123");
        assert_eq!(fs::read_to_string(cert_path).unwrap(), "XYZ");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_persist_overwrites_previous_run() {
        let dir = temp_dir("overwrite");
        sample_bundle().persist(&dir).unwrap();

        let next = DeviceCredentialBundle {
            device_id: "def456".to_string(),
            certificate_pem: "-----BEGIN CERTIFICATE-----\nQRS\n-----END CERTIFICATE-----\n"
                .to_string(),
        };
        next.persist(&dir).unwrap();

        assert_eq!(
            fs::read_to_string(dir.join(DEVICE_ID_FILE)).unwrap(),
            "def456"
        );
        assert_eq!(fs::read_to_string(dir.join(CERT_FILE)).unwrap(), "QRS");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_persist_into_missing_dir_reports_device_id_write() {
        let missing = std::env::temp_dir()
            .join(format!("firmkit-missing-{}", std::process::id()))
            .join("nope");

        let err = sample_bundle().persist(&missing).unwrap_err();
        assert!(matches!(err, ClientError::DeviceIdWrite { .. }));
        assert!(err.to_string().contains("device id"));
    }

    #[test]
    fn test_persist_leaves_no_temp_files() {
        let dir = temp_dir("tmpfiles");
        sample_bundle().persist(&dir).unwrap();

        let leftovers: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }
}
