//! Error types for the attendance crate.
//!
//! Four families, mirroring how failures are shown to users: input
//! validation (blocking, corrected by the user), authentication (classified
//! per reason), persistence (generic, retryable), and configuration.
//! Geolocation failures never appear here; they downgrade to the
//! "unavailable" location marker at the acquisition site.

use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// The main error type for attendance operations.
#[derive(Debug, Error)]
pub enum Error {
    // === Input validation ===
    /// The submitted name was empty or whitespace.
    #[error("please enter your full name")]
    NameRequired,

    /// No attendance type was selected.
    #[error("please select your attendance type")]
    WorkOptionRequired,

    /// The person already appears in today's fetched records.
    #[error("{name} has already marked attendance for {date}")]
    AlreadyMarked {
        /// The trimmed name that was submitted.
        name: String,
        /// The local date the existing record carries.
        date: String,
    },

    // === Access ===
    /// A browser operation was attempted without a session.
    #[error("sign in to view attendance records")]
    SignInRequired,

    // === Collaborators ===
    /// Classified authentication failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Record store failure (read or write); retryable.
    #[error("attendance store error: {0}")]
    Store(#[from] StoreError),

    // === Configuration ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O & serialization ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for attendance operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Whether this is a validation failure the user fixes by correcting
    /// input (including the advisory duplicate check).
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NameRequired | Self::WorkOptionRequired | Self::AlreadyMarked { .. }
        )
    }

    /// Whether retrying the same operation may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_validation_messages() {
        assert_eq!(Error::NameRequired.to_string(), "please enter your full name");
        assert_eq!(
            Error::WorkOptionRequired.to_string(),
            "please select your attendance type"
        );
    }

    #[test]
    fn test_already_marked_message() {
        let err = Error::AlreadyMarked {
            name: "Asha Rao".to_string(),
            date: "2024-01-05".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Asha Rao"));
        assert!(msg.contains("2024-01-05"));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::NameRequired.is_validation());
        assert!(Error::WorkOptionRequired.is_validation());
        assert!(Error::AlreadyMarked {
            name: "x".to_string(),
            date: "d".to_string()
        }
        .is_validation());
        assert!(!Error::SignInRequired.is_validation());
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Store(StoreError::Status { status: 500 }).is_retryable());
        assert!(!Error::NameRequired.is_retryable());
        assert!(!Error::SignInRequired.is_retryable());
    }

    #[test]
    fn test_auth_error_is_transparent() {
        let err: Error = crate::auth::AuthError::WrongPassword.into();
        assert_eq!(err.to_string(), "incorrect password");
    }

    #[test]
    fn test_config_validation_helper() {
        let err = Error::config_validation("timeout_secs must be greater than 0");
        assert!(err.to_string().contains("timeout_secs"));
    }
}
