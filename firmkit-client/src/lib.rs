//! Firmkit provisioning client
//!
//! HTTP client for the device issuance service. One authenticated call
//! yields a [`DeviceCredentialBundle`] (device id + PEM certificate);
//! the bundle sanitizes its certificate and persists both values to
//! the fixed files the firmware build reads.
//!
//! # Example
//!
//! ```no_run
//! use firmkit_client::{ProvisioningClient, secrets};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), firmkit_client::ClientError> {
//!     let api_key = secrets::load_api_key(Path::new("scripts/secrets.txt"))?;
//!     let client = ProvisioningClient::new("https://provisioning.example.com/create-device");
//!     let bundle = client.issue_credential(&api_key).await?;
//!     bundle.persist(Path::new("data"))?;
//!     Ok(())
//! }
//! ```

mod bundle;
pub mod error;
pub mod secrets;

pub use bundle::{CERT_FILE, DEVICE_ID_FILE, DeviceCredentialBundle};
pub use error::{ClientError, Result};

use reqwest::Client;
use tracing::{debug, info};

/// Request header carrying the pre-shared API key
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the device issuance service
#[derive(Debug, Clone)]
pub struct ProvisioningClient {
    /// Full URL of the create-device endpoint
    endpoint: String,
    /// HTTP client instance
    client: Client,
}

impl ProvisioningClient {
    /// Create a new client for the given issuance endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }

    /// Create a client with a custom `reqwest` client
    ///
    /// Lets callers configure proxies or TLS settings; the pipeline
    /// itself imposes no timeout.
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    /// The issuance endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a fresh device identity from the issuance service
    ///
    /// Posts to the endpoint with the API key in the `x-api-key`
    /// header. A transport failure, non-2xx status, or a body missing
    /// either expected field is an error; there is no retry.
    pub async fn issue_credential(&self, api_key: &str) -> Result<DeviceCredentialBundle> {
        debug!("Requesting device credential from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), message));
        }

        let bundle: DeviceCredentialBundle = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("expected device_id and X-Certificate-Pem: {e}"))
        })?;

        info!("Issued credential for device {}", bundle.device_id);
        Ok(bundle)
    }
}
