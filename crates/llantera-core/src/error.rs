//! Unified error handling for llantera-core

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single invalid form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Core error type for llantera-core
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure, no response from the backend
    #[error("Network error: {0}")]
    Network(String),

    /// Backend rejected the bearer token (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Credential exchange was refused
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Malformed input, reported per field
    #[error("Validation error: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// Any other backend-reported failure
    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for llantera-core
pub type Result<T> = std::result::Result<T, Error>;

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    /// Create a server error
    pub fn server(msg: impl Into<String>) -> Self {
        Error::Server(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a validation error for a single field
    pub fn invalid_field(field: &'static str, msg: impl Into<String>) -> Self {
        Error::Validation(vec![FieldError::new(field, msg)])
    }

    /// Message suitable for display next to a list or form.
    ///
    /// Backend messages are shown as-is, without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            Error::Server(msg)
            | Error::Unauthorized(msg)
            | Error::InvalidCredentials(msg)
            | Error::Network(msg) => msg.clone(),
            Error::Validation(fields) => join_fields(fields),
            other => other.to_string(),
        }
    }

    /// Whether this error means the session is no longer valid
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }

    /// Field-level errors, empty for non-validation errors
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Error::Validation(fields) => fields,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Network("Request timed out".to_string())
        } else if err.is_connect() {
            Error::Network("Connection failed".to_string())
        } else if err.is_decode() {
            Error::Server(format!("Unexpected response body: {}", err))
        } else if err.is_status() {
            match err.status() {
                Some(status) if status.as_u16() == 401 => {
                    Error::Unauthorized("Invalid or expired session".to_string())
                }
                Some(status) => Error::Server(format!("HTTP {}", status)),
                None => Error::Network(err.to_string()),
            }
        } else {
            Error::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unauthorized("Invalid token");
        assert_eq!(err.to_string(), "Unauthorized: Invalid token");
    }

    #[test]
    fn test_user_message_strips_prefix() {
        let err = Error::server("Cliente no encontrado");
        assert_eq!(err.user_message(), "Cliente no encontrado");
        assert_eq!(err.to_string(), "Server error: Cliente no encontrado");
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = Error::Validation(vec![
            FieldError::new("name", "Name is required"),
            FieldError::new("email", "Email is not valid"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation error: name: Name is required; email: Email is not valid"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(Error::unauthorized("x").is_unauthorized());
        assert!(!Error::network("x").is_unauthorized());
        assert!(Error::config("x").field_errors().is_empty());
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
