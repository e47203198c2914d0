//! Error types for session persistence (thiserror-based).
//!
//! Editing itself never errors; see `Editor`.

use thiserror::Error;

/// Errors that can occur while saving or loading a timeline session.
#[derive(Error, Debug)]
pub enum SessionError {
    /// File I/O error (read, write, rename).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Session was written by an incompatible format version.
    #[error("Unsupported session version: {version}")]
    UnsupportedVersion { version: u32 },

    /// Session parsed but breaks a timeline invariant.
    #[error("Invalid session file: {reason}")]
    InvalidSession { reason: String },
}

/// Convenience Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SessionError::UnsupportedVersion { version: 9 };
        assert!(err.to_string().contains('9'));

        let err = SessionError::InvalidSession {
            reason: "duplicate clip id".into(),
        };
        assert!(err.to_string().contains("duplicate clip id"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SessionError = io_err.into();
        assert!(matches!(err, SessionError::Io(_)));
    }

    #[test]
    fn json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: SessionError = json_err.into();
        assert!(matches!(err, SessionError::Json(_)));
    }
}
