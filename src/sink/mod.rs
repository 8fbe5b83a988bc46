//! Output sinks for the assembled document
//!
//! Two destinations: a Markdown file with a sanitized, dated name, and the
//! system clipboard. Both receive a fully materialized document; delivery
//! failures surface as [`ExportError::SinkFailed`](crate::error::ExportError).

pub mod clipboard;
pub mod download;

pub use clipboard::copy_to_clipboard;
pub use download::{sanitize_filename, DownloadPayload, MEDIA_TYPE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_export() {
        let payload = DownloadPayload::new("t", "x");
        assert!(payload.filename.ends_with(".md"));
    }

    #[test]
    fn test_media_type_export() {
        assert_eq!(MEDIA_TYPE, "text/markdown; charset=utf-8");
    }
}
