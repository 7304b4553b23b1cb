//! File descriptions and payloads

use std::path::Path;

/// MIME type used when the extension is unknown.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Name, declared type and size of a file, without its contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileInfo {
    /// The file name sent to the gateway.
    pub name: String,
    /// The declared MIME type.
    pub mime_type: String,
    /// The file size in bytes.
    pub size: u64,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// A file ready to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Reads a file from disk, deriving the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime_type: mime_from_path(path).to_string(),
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn info(&self) -> FileInfo {
        FileInfo::new(&self.name, &self.mime_type, self.size())
    }
}

/// Guesses a MIME type from the file extension (case-insensitive).
pub fn mime_from_path(path: impl AsRef<Path>) -> &'static str {
    let ext = path
        .as_ref()
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" | "text" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "json" => "application/json",
        _ => FALLBACK_MIME_TYPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path("notes.md"), "text/markdown");
        assert_eq!(mime_from_path("Photo.JPG"), "image/jpeg");
        assert_eq!(mime_from_path("/tmp/data.json"), "application/json");
        assert_eq!(mime_from_path("archive.tar.gz"), FALLBACK_MIME_TYPE);
        assert_eq!(mime_from_path("README"), FALLBACK_MIME_TYPE);
    }

    #[test]
    fn test_info_reports_size() {
        let file = UploadFile::new("a.txt", "text/plain", b"hello".to_vec());
        assert_eq!(file.info(), FileInfo::new("a.txt", "text/plain", 5));
    }

    #[tokio::test]
    async fn test_from_path_reads_contents() {
        let path = std::env::temp_dir().join(format!("gateway-lib-{}.md", std::process::id()));
        tokio::fs::write(&path, b"# Title").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(file.mime_type, "text/markdown");
        assert_eq!(file.data, b"# Title");
        assert!(file.name.ends_with(".md"));
    }
}
