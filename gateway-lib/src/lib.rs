//! Upload gateway client library
//!
//! Client-side validation and a single multipart upload call for the local
//! file gateway (`POST /gateway/upload`).

pub mod config;
pub mod error;
pub mod file;
pub mod format;
pub mod options;
pub mod policy;

mod client;

pub use client::*;
pub use config::GatewayConfig;
pub use error::UploadError;
pub use file::{FileInfo, UploadFile, mime_from_path};
pub use format::{file_type_label, format_file_size};
pub use options::UploadOptions;
pub use policy::{UploadPolicy, Validation, ValidationFailure, validate_file};
