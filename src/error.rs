//! Error types for the SDK.
//!
//! Failed HTTP statuses are surfaced as typed errors at response-wrapping
//! time, discriminated by status range so callers can apply different
//! retry policy to client and server failures. The exact ranges of the
//! wrapped API are preserved: `299..=426` is a client error, `500..=510`
//! is a server error, everything else passes through as success.

use std::collections::HashMap;
use thiserror::Error;

/// Result type for SDK operations.
pub type Result<T> = std::result::Result<T, DwollaError>;

/// Errors surfaced by the request/response pipeline.
#[derive(Error, Debug)]
pub enum DwollaError {
    /// A required argument was missing or blank; raised before any I/O.
    #[error("Missing the required parameter '{0}'")]
    MissingArgument(String),

    /// Response status fell in the client-error range (`299..=426`).
    #[error("client error (status {code}): {message}")]
    Client {
        code: u16,
        message: String,
        /// Decoded response body (a JSON string value when decoding failed).
        body: serde_json::Value,
        headers: HashMap<String, String>,
    },

    /// Response status fell in the server-error range (`500..=510`).
    #[error("server error (status {code}): {message}")]
    Server {
        code: u16,
        message: String,
        /// Decoded response body (a JSON string value when decoding failed).
        body: serde_json::Value,
        headers: HashMap<String, String>,
    },

    /// Transport-level failure before a status line was read.
    #[error("http transport error: {0}")]
    Http(String),

    /// A success response whose body could not hydrate the requested model.
    #[error("decode error: {0}")]
    Decode(String),

    /// Client construction failure.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DwollaError {
    /// HTTP status code carried by this error, when there is one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client { code, .. } | Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Client { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Whether an external retry policy may reasonably retry this call.
    /// Server failures are; client failures and validation errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Http(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_present_for_http_status_errors() {
        let err = DwollaError::Client {
            code: 402,
            message: "payment required".into(),
            body: serde_json::Value::Null,
            headers: HashMap::new(),
        };
        assert_eq!(err.status_code(), Some(402));
        assert!(err.is_client_error());
        assert!(!err.is_retryable());

        let err = DwollaError::MissingArgument("id".into());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = DwollaError::Server {
            code: 503,
            message: "unavailable".into(),
            body: serde_json::Value::Null,
            headers: HashMap::new(),
        };
        assert!(err.is_server_error());
        assert!(err.is_retryable());
    }
}
