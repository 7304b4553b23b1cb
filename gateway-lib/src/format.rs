//! Human-readable formatting for sizes and MIME types

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Formats a byte count for display.
///
/// Bytes are shown as integers, kilobytes with one decimal, and megabytes or
/// gigabytes with two.
///
/// # Example
///
/// ```
/// use gateway_lib::format_file_size;
///
/// assert_eq!(format_file_size(500), "500 B");
/// assert_eq!(format_file_size(2048), "2.0 KB");
/// assert_eq!(format_file_size(5_242_880), "5.00 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    }
}

/// Returns a short label for a MIME type, or `"File"` for unknown types.
pub fn file_type_label(mime_type: &str) -> &'static str {
    match mime_type {
        "text/plain" => "Text",
        "text/markdown" => "Markdown",
        "application/pdf" => "PDF",
        "image/png" => "PNG Image",
        "image/jpeg" => "JPEG Image",
        "image/gif" => "GIF Image",
        "image/webp" => "WebP Image",
        "application/json" => "JSON",
        _ => "File",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(500), "500 B");
        assert_eq!(format_file_size(1023), "1023 B");
    }

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_megabytes_and_up() {
        assert_eq!(format_file_size(5_242_880), "5.00 MB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(file_type_label("application/pdf"), "PDF");
        assert_eq!(file_type_label("image/webp"), "WebP Image");
        assert_eq!(file_type_label("text/markdown"), "Markdown");
        assert_eq!(file_type_label("application/x-exe"), "File");
    }
}
