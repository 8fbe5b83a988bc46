use thiserror::Error;

/// Errors that can occur during extraction, conversion, or delivery
#[derive(Debug, Error)]
pub enum ExportError {
    /// No conversation turns were found in the page
    #[error("no conversation content found")]
    NoConversation,

    /// The input markup could not be parsed into a tree
    #[error("failed to parse markup: {0}")]
    DomParseFailed(String),

    /// A delivery sink (download or clipboard) failed
    #[error("{sink} sink failed: {reason}")]
    SinkFailed { sink: String, reason: String },

    /// A command was requested that is not registered
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Command parameters could not be deserialized
    #[error("invalid parameters for '{command}': {reason}")]
    InvalidParams { command: String, reason: String },
}

impl ExportError {
    /// Shorthand for a sink failure
    pub fn sink(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SinkFailed {
            sink: sink.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for chat2md operations
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExportError::NoConversation;
        assert_eq!(err.to_string(), "no conversation content found");

        let err = ExportError::sink("clipboard", "no provider available");
        assert_eq!(
            err.to_string(),
            "clipboard sink failed: no provider available"
        );
    }

    #[test]
    fn test_unknown_command_display() {
        let err = ExportError::UnknownCommand("frobnicate".to_string());
        assert!(err.to_string().contains("frobnicate"));
    }
}
