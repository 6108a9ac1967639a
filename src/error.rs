//! Error types for plaza.

use thiserror::Error;

/// Common error type for plaza.
#[derive(Error, Debug)]
pub enum PlazaError {
    /// Database error.
    ///
    /// Wraps connectivity, timeout, and query errors from sqlx. Surfaced to
    /// end users as a generic "try again later"; logged with context by the
    /// failing operation.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    ///
    /// Expected and user-facing; never logged as a system fault.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Password mismatch at the access gate.
    ///
    /// Deliberately carries no detail: a missing post and a wrong password
    /// must be indistinguishable to the requester.
    #[error("password does not match")]
    AccessDenied,

    /// Ciphertext token could not be decrypted.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Outbound notification failure.
    ///
    /// Always caught at the notifier boundary; logged, never returned to
    /// the caller of the triggering store operation.
    #[error("notification error: {0}")]
    Notification(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for PlazaError {
    fn from(e: sqlx::Error) -> Self {
        PlazaError::Database(e.to_string())
    }
}

/// Result type alias for plaza operations.
pub type Result<T> = std::result::Result<T, PlazaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = PlazaError::Validation("title is required".to_string());
        assert_eq!(err.to_string(), "validation error: title is required");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = PlazaError::NotFound("board".to_string());
        assert_eq!(err.to_string(), "board not found");
    }

    #[test]
    fn test_access_denied_is_generic() {
        // The message must not leak whether the post exists.
        let err = PlazaError::AccessDenied;
        assert_eq!(err.to_string(), "password does not match");
    }

    #[test]
    fn test_decryption_error_display() {
        let err = PlazaError::Decryption("token has no delimiter".to_string());
        assert_eq!(err.to_string(), "decryption failed: token has no delimiter");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlazaError = io_err.into();
        assert!(matches!(err, PlazaError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(PlazaError::AccessDenied)
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
