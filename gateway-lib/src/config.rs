//! Gateway configuration

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::client::{DEFAULT_BASE_URL, GatewayClient};
use crate::error::UploadError;
use crate::policy::UploadPolicy;

/// Serializable settings for a [`GatewayClient`].
///
/// Every field has a default, so a partial (or empty) document is valid.
///
/// # Example
///
/// ```
/// use gateway_lib::GatewayConfig;
///
/// let config = GatewayConfig::from_json(r#"{
///     "base_url": "http://127.0.0.1:9000",
///     "policy": { "max_size": 1048576 }
/// }"#).unwrap();
///
/// assert_eq!(config.policy.max_size, 1_048_576);
/// assert!(config.policy.allows("application/pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Gateway base URL.
    pub base_url: String,
    /// Whole-request timeout in seconds. `None` leaves the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Connection timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    /// Which files may be uploaded.
    pub policy: UploadPolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
            policy: UploadPolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds a client from these settings.
    pub fn client(&self) -> Result<GatewayClient, UploadError> {
        let mut builder = GatewayClient::builder()
            .base_url(&self.base_url)
            .policy(self.policy.clone());
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}
