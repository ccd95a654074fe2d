//! Result type alias for reformatting operations

use crate::error::CljlineError;

/// Standard Result type for reformatting operations
pub type Result<T> = std::result::Result<T, CljlineError>;

/// Per-file error handling for batch runs: one unreadable or unparseable
/// file must not abort the rest of the batch.
pub trait ResultExt<T> {
    /// Log the error and yield `None` so the caller can count the failure
    /// and move on to the next file.
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Skipping file: {err}");
                None
            }
            Err(err) => {
                tracing::error!("{err}");
                None
            }
        }
    }
}
