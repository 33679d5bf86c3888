//! # Booking Error Types
//!
//! Typed error handling for the car-doctor backend.
//! Store and session operations return `Result<T, BookingError>`.

use thiserror::Error;

/// Core error type for all booking operations
#[derive(Debug, Error)]
pub enum BookingError {
    /// Configuration errors (missing secret, bad connection string)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request body failed the edge checks
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Path segment is not a 24-hex-char object identifier
    #[error("Invalid identifier: {id}")]
    InvalidIdentifier { id: String },

    /// Service not found in the catalog
    #[error("Services not found")]
    ServiceNotFound { id: String },

    /// No session cookie, or the token failed verification
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Session identity does not own the requested resource
    #[error("Forbidden: session uid {session_uid} cannot read checkouts of {requested_uid}")]
    Forbidden {
        session_uid: String,
        requested_uid: String,
    },

    /// Document store failure
    #[error("Database error: {0}")]
    Database(String),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BookingError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            BookingError::Configuration(_) => 500,
            BookingError::InvalidRequest(_) => 400,
            // Lookups surface unparseable ids as server errors.
            BookingError::InvalidIdentifier { .. } => 500,
            BookingError::ServiceNotFound { .. } => 404,
            BookingError::Unauthorized(_) => 401,
            BookingError::Forbidden { .. } => 403,
            BookingError::Database(_) => 500,
            BookingError::Token(_) => 500,
            BookingError::Serialization(_) => 500,
        }
    }

    /// Returns true if the detail must stay server-side
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<serde_json::Error> for BookingError {
    fn from(err: serde_json::Error) -> Self {
        BookingError::Serialization(err.to_string())
    }
}

/// Result type alias for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BookingError::InvalidRequest("x".into()).status_code(), 400);
        assert_eq!(BookingError::Unauthorized("no cookie".into()).status_code(), 401);
        assert_eq!(
            BookingError::Forbidden {
                session_uid: "u1".into(),
                requested_uid: "u2".into()
            }
            .status_code(),
            403
        );
        assert_eq!(
            BookingError::ServiceNotFound { id: "x".into() }.status_code(),
            404
        );
        assert_eq!(
            BookingError::InvalidIdentifier { id: "nope".into() }.status_code(),
            500
        );
    }

    #[test]
    fn test_server_errors() {
        assert!(BookingError::Database("down".into()).is_server_error());
        assert!(BookingError::Token("bad key".into()).is_server_error());
        assert!(!BookingError::Unauthorized("expired".into()).is_server_error());
    }
}
