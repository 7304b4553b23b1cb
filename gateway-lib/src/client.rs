//! Main GatewayClient

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::error::UploadError;
use crate::file::UploadFile;
use crate::options::UploadOptions;
use crate::policy::{UploadPolicy, Validation};

/// Base URL of the local gateway.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upload endpoint path, relative to the base URL.
pub const UPLOAD_PATH: &str = "/gateway/upload";

/// Client for the upload gateway.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use gateway_lib::{GatewayClient, UploadFile, UploadOptions};
///
/// let client = GatewayClient::builder()
///     .base_url("http://localhost:8000")
///     .build()?;
///
/// let file = UploadFile::from_path("notes.md").await?;
/// let body = client
///     .upload_file(&file, &UploadOptions::new().user_id("alice"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct GatewayClient {
    inner: Arc<GatewayClientInner>,
}

struct GatewayClientInner {
    endpoint: Url,
    policy: UploadPolicy,
    http_client: Client,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("policy", &self.inner.policy)
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl GatewayClient {
    /// Creates a new builder with default settings.
    pub fn builder() -> GatewayClientBuilder {
        GatewayClientBuilder::new()
    }

    /// Returns the full upload URL.
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }

    /// Returns the policy applied before every upload.
    pub fn policy(&self) -> &UploadPolicy {
        &self.inner.policy
    }

    /// Validates a file against this client's policy without sending it.
    pub fn validate(&self, file: &UploadFile) -> Validation {
        self.inner.policy.validate(&file.info())
    }

    /// Uploads a single file.
    ///
    /// The file is checked against the client's policy first; a rejected file
    /// never reaches the network. On a 2xx answer the JSON body is returned
    /// as-is. Other statuses become [`UploadError::Gateway`] carrying the
    /// server's `detail` message. Transport failures are returned unchanged
    /// as [`UploadError::Transport`].
    pub async fn upload_file(
        &self,
        file: &UploadFile,
        options: &UploadOptions,
    ) -> Result<serde_json::Value, UploadError> {
        if let Validation::Invalid(failure) = self.validate(file) {
            debug!("refusing to upload {}: {failure}", file.name);
            return Err(UploadError::Rejected(failure));
        }

        let form = build_form(file, options)?;

        debug!(
            "uploading {} ({} bytes, {}) to {}",
            file.name,
            file.size(),
            file.mime_type,
            self.inner.endpoint
        );

        let mut request = self
            .inner
            .http_client
            .post(self.inner.endpoint.clone())
            .multipart(form);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body: serde_json::Value = response.json().await?;
            debug!("upload of {} accepted ({})", file.name, status.as_u16());
            Ok(body)
        } else {
            let body = response.text().await.unwrap_or_default();
            let err = UploadError::from_response_body(status.as_u16(), &body);
            warn!("upload of {} rejected by gateway: {err}", file.name);
            Err(err)
        }
    }
}

fn build_form(file: &UploadFile, options: &UploadOptions) -> Result<Form, UploadError> {
    let mut part = Part::bytes(file.data.clone()).file_name(file.name.clone());
    if !file.mime_type.is_empty() {
        part = part.mime_str(&file.mime_type)?;
    }

    let mut form = Form::new().part("file", part);
    for (name, value) in options.form_fields() {
        form = form.text(name, value);
    }
    Ok(form)
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for constructing a [`GatewayClient`].
///
/// Every setting has a default: the local gateway URL, the default
/// [`UploadPolicy`], and no request timeout.
pub struct GatewayClientBuilder {
    base_url: String,
    policy: UploadPolicy,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl GatewayClientBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            policy: UploadPolicy::default(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the gateway base URL. Trailing slashes are ignored.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the upload policy.
    pub fn policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, UploadError> {
        let endpoint = Url::parse(&format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            UPLOAD_PATH
        ))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(GatewayClient {
            inner: Arc::new(GatewayClientInner {
                endpoint,
                policy: self.policy,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for GatewayClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
