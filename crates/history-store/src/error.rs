//! Error types for the history store (thiserror-based).

use thiserror::Error;

/// Errors that can occur while reading, editing or writing the history file.
#[derive(Error, Debug)]
pub enum HistoryStoreError {
    /// File I/O error (read, write, rename, directory creation).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No history item carries this id.
    #[error("History item not found: {id}")]
    ItemNotFound { id: u64 },
}

/// Convenience Result type for history store operations.
pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = HistoryStoreError::ItemNotFound { id: 1712 };
        assert!(err.to_string().contains("1712"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: HistoryStoreError = io_err.into();
        assert!(matches!(err, HistoryStoreError::Io(_)));
    }
}
