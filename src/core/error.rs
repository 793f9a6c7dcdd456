//! Error types for the logging facade
//!
//! By policy none of these ever reach an application's control flow through
//! a logging call: the dispatch path reports failures on the fallback
//! channel (stderr) and swallows them. The `Result` surface exists for
//! configuration loading, sink construction, and explicit flush/close.

pub type Result<T> = std::result::Result<T, MinilogError>;

#[derive(Debug, thiserror::Error)]
pub enum MinilogError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unknown level name in configuration or environment
    #[error("invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Structurally invalid configuration (e.g. malformed logger name)
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Write attempted on a sink after close()
    #[error("sink '{name}' is closed")]
    SinkClosed { name: String },

    /// Sink-specific failure that is not a plain IO error
    #[error("sink '{name}' error: {message}")]
    Sink { name: String, message: String },

    /// Global facade initialized twice
    #[error("global registry already initialized")]
    AlreadyInitialized,
}

impl MinilogError {
    /// Create an invalid configuration error
    pub fn config(message: impl Into<String>) -> Self {
        MinilogError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a sink-closed error
    pub fn sink_closed(name: impl Into<String>) -> Self {
        MinilogError::SinkClosed { name: name.into() }
    }

    /// Create a generic sink error
    pub fn sink(name: impl Into<String>, message: impl Into<String>) -> Self {
        MinilogError::Sink {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MinilogError::sink_closed("file");
        assert_eq!(err.to_string(), "sink 'file' is closed");

        let err = MinilogError::config("logger name must not be empty");
        assert_eq!(
            err.to_string(),
            "invalid configuration: logger name must not be empty"
        );

        let err = MinilogError::InvalidLevel("verbose".to_string());
        assert_eq!(err.to_string(), "invalid log level: 'verbose'");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: MinilogError = io_err.into();
        assert!(matches!(err, MinilogError::Io(_)));
    }
}
