//! Error types for the provisioning client

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while provisioning a device
///
/// Each variant maps to one failure domain: the local secret file, the
/// issuance service, or the persisted credential files. The variants
/// keep their messages distinct so an operator can tell "could not
/// read api key" apart from "could not reach service".
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API key secret file could not be read
    #[error(
        "could not read api key from {path}: {source} \
         (see the provisioning section of the README for how to add an api key)"
    )]
    ApiKeyUnreadable {
        /// Path of the secret file
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// The API key secret file exists but holds no key
    #[error(
        "api key file {path} is empty \
         (see the provisioning section of the README for how to add an api key)"
    )]
    ApiKeyEmpty {
        /// Path of the secret file
        path: PathBuf,
    },

    /// The issuance service could not be reached
    #[error("could not reach provisioning service: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The issuance service answered with an error status
    #[error("provisioning service error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body from the service
        message: String,
    },

    /// The issuance response did not match the expected shape
    #[error("malformed provisioning response: {0}")]
    ParseError(String),

    /// Writing the device identifier file failed
    #[error("could not write device id to {path}: {source}")]
    DeviceIdWrite {
        /// Destination path of `device_id.txt`
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// Writing the certificate file failed
    #[error("could not write certificate to {path}: {source}")]
    CertificateWrite {
        /// Destination path of `cert.txt`
        path: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }
}
