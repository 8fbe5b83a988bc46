//! File download sink: a sanitized, dated filename plus the document bytes.

use crate::error::{ExportError, Result};
use chrono::Local;
use log::info;
use std::path::{Path, PathBuf};

/// Media type of the produced payload
pub const MEDIA_TYPE: &str = "text/markdown; charset=utf-8";

/// Fallback filename stem when the title sanitizes to nothing
const DEFAULT_STEM: &str = "conversation";

/// Replace filesystem-hostile characters and trim the result
pub fn sanitize_filename(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();

    let sanitized = sanitized.trim().to_string();
    if sanitized.is_empty() {
        DEFAULT_STEM.to_string()
    } else {
        sanitized
    }
}

/// A fully materialized download: filename, media type, and bytes
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadPayload {
    /// Sanitized title plus the current date, suffixed `.md`
    pub filename: String,

    /// Always [`MEDIA_TYPE`]
    pub media_type: &'static str,

    /// Document bytes (UTF-8 Markdown)
    pub bytes: Vec<u8>,
}

impl DownloadPayload {
    /// Build a payload for the given title and document content
    ///
    /// The filename carries the current local date in `YYYY-MM-DD` form.
    pub fn new(title: &str, content: &str) -> Self {
        let date = Local::now().format("%Y-%m-%d");
        Self {
            filename: format!("{}-{}.md", sanitize_filename(title), date),
            media_type: MEDIA_TYPE,
            bytes: content.as_bytes().to_vec(),
        }
    }

    /// Write the payload into `dir`, returning the full path
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.bytes)
            .map_err(|e| ExportError::sink("download", format!("{}: {}", path.display(), e)))?;
        info!("wrote {} bytes to {}", self.bytes.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Plan A"), "Plan A");
        assert_eq!(sanitize_filename("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_filename("what? \"why\" <how>"), "what_ _why_ _how_");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "conversation");
        assert_eq!(sanitize_filename("   "), "conversation");
    }

    #[test]
    fn test_payload_filename_shape() {
        let payload = DownloadPayload::new("Plan A", "# Plan A\n");

        assert!(payload.filename.starts_with("Plan A-"));
        assert!(payload.filename.ends_with(".md"));
        assert_eq!(payload.media_type, MEDIA_TYPE);

        // date segment is YYYY-MM-DD
        let date = payload
            .filename
            .strip_prefix("Plan A-")
            .and_then(|s| s.strip_suffix(".md"))
            .unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(date.chars().filter(|&c| c == '-').count(), 2);
    }

    #[test]
    fn test_save_to_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let payload = DownloadPayload::new("T", "# T\n\nbody\n");

        let path = payload.save_to(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# T\n\nbody\n");
    }

    #[test]
    fn test_save_to_missing_dir_is_sink_failure() {
        let payload = DownloadPayload::new("T", "x");
        let err = payload
            .save_to(Path::new("/nonexistent/dir/for/chat2md"))
            .unwrap_err();
        assert!(matches!(err, crate::error::ExportError::SinkFailed { .. }));
    }
}
