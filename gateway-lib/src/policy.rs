//! Upload policy and client-side validation

use serde::Deserialize;
use serde::Serialize;

use crate::file::FileInfo;
use crate::format::format_file_size;

/// MIME types accepted by default.
pub const DEFAULT_ALLOWED_TYPES: &[&str] = &[
    "text/plain",
    "text/markdown",
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/gif",
    "image/webp",
    "application/json",
];

/// Default upload ceiling: 10 MiB.
pub const DEFAULT_MAX_SIZE: u64 = 10 * 1024 * 1024;

/// Which files may be uploaded.
///
/// Passed explicitly to validation and to the [`GatewayClient`](crate::GatewayClient)
/// so each deployment can carry its own limits.
///
/// # Example
///
/// ```
/// use gateway_lib::{FileInfo, UploadPolicy};
///
/// let policy = UploadPolicy::default().with_max_size(1024);
/// let file = FileInfo::new("notes.txt", "text/plain", 4096);
/// assert!(!policy.validate(&file).is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Accepted MIME types, compared exactly.
    pub allowed_types: Vec<String>,
    /// Maximum file size in bytes (inclusive).
    pub max_size: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl UploadPolicy {
    /// Sets the maximum file size in bytes.
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Adds a MIME type to the allow-list.
    pub fn allow(mut self, mime_type: impl Into<String>) -> Self {
        let mime_type = mime_type.into();
        if !self.allows(&mime_type) {
            self.allowed_types.push(mime_type);
        }
        self
    }

    /// Returns `true` if the MIME type is on the allow-list.
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }

    /// Checks a file against this policy. The type is checked before the size.
    pub fn validate(&self, file: &FileInfo) -> Validation {
        if !self.allows(&file.mime_type) {
            return Validation::Invalid(ValidationFailure::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }
        if file.size > self.max_size {
            return Validation::Invalid(ValidationFailure::TooLarge {
                size: file.size,
                max_size: self.max_size,
            });
        }
        Validation::Valid
    }
}

/// Validates a file against the default policy.
pub fn validate_file(file: &FileInfo) -> Validation {
    UploadPolicy::default().validate(file)
}

/// Outcome of validating a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(ValidationFailure),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Valid => None,
            Self::Invalid(failure) => Some(failure),
        }
    }

    /// Human-readable reason for an invalid file.
    pub fn reason(&self) -> Option<String> {
        self.failure().map(ToString::to_string)
    }

    /// Converts into a `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<(), ValidationFailure> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(failure) => Err(failure),
        }
    }
}

/// Why a file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    UnsupportedType { mime_type: String },
    TooLarge { size: u64, max_size: u64 },
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedType { mime_type } if mime_type.is_empty() => {
                write!(f, "File type not supported")
            }
            Self::UnsupportedType { mime_type } => {
                write!(f, "File type not supported: {mime_type}")
            }
            Self::TooLarge { size, max_size } => write!(
                f,
                "File size {} exceeds the maximum of {}",
                format_file_size(*size),
                format_file_size(*max_size)
            ),
        }
    }
}

impl std::error::Error for ValidationFailure {}
