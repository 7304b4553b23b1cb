//! Error types

use crate::policy::ValidationFailure;

/// Message used when the gateway rejects an upload without a `detail` string.
pub const FALLBACK_DETAIL: &str = "Upload failed";

/// Errors that can occur while uploading.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The file failed the client's policy; nothing was sent.
    #[error("{0}")]
    Rejected(ValidationFailure),

    /// The gateway answered with a non-success status.
    #[error("{detail}")]
    Gateway {
        /// HTTP status code.
        status: u16,
        /// The server's `detail` message, or [`FALLBACK_DETAIL`].
        detail: String,
    },

    /// Transport failure, passed through as-is.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The configured base URL is not a valid URL.
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl UploadError {
    /// Creates a gateway error from a status code and the raw response body.
    ///
    /// The message is taken from a top-level JSON `detail` string when present.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or_else(|| FALLBACK_DETAIL.to_string());
        Self::Gateway { status, detail }
    }

    /// Returns the HTTP status code if the gateway answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never reached the gateway.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
