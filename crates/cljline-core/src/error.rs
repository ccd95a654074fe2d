//! Error types and handling for reformatting operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for reformatting operations
#[derive(Debug, Error)]
pub enum CljlineError {
    /// The grammar produced no tree for the input
    #[error("Parse error{}: {message}", FileContext(.file))]
    ParseError {
        message: String,
        /// File being processed, when known
        file: Option<PathBuf>,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invariant violations in the engine itself (overlapping edits,
    /// out-of-bounds splices). These indicate a bug, not bad input.
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Config,
    Io,
    Internal,
}

impl CljlineError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CljlineError::ParseError { .. } => ErrorKind::Parse,
            CljlineError::ConfigError { .. } => ErrorKind::Config,
            CljlineError::IoError { .. } => ErrorKind::Io,
            CljlineError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (processing other files may continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse | ErrorKind::Io)
    }

    /// Create a parse error without file context
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            file: None,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Attach file context to a parse error; other variants pass through
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            CljlineError::ParseError { message, .. } => CljlineError::ParseError {
                message,
                file: Some(path.into()),
            },
            other => other,
        }
    }
}

impl From<std::io::Error> for CljlineError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

/// Display helper for the optional file component of a parse error
struct FileContext<'a>(&'a Option<PathBuf>);

impl std::fmt::Display for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(path) => write!(f, " in '{}'", path.display()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_recoverable() {
        let err = CljlineError::parse_error("no tree produced");
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.is_recoverable());
    }

    #[test]
    fn internal_errors_are_not_recoverable() {
        let err = CljlineError::internal_error("overlapping edits");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn with_file_attaches_context() {
        let err = CljlineError::parse_error("no tree produced").with_file("core.clj");
        assert!(err.to_string().contains("core.clj"));
    }
}
