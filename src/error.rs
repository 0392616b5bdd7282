//! Error types for feltmap.

use thiserror::Error;

/// The main error type for feltmap.
#[derive(Error, Debug)]
pub enum Error {
    /// The service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Transport failures (connect, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A success response did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {message}")]
    Response { endpoint: String, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV encoding/decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors (staging files, config files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed URLs
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// An operation needed a map but `create_map` has not succeeded yet.
    #[error("No map has been created on this client")]
    MapNotCreated,

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new status error.
    pub fn status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a new malformed-response error.
    pub fn response(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Response {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create a new auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// HTTP status carried by the error, if the service answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the service rejected the request (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// Check if the service failed to handle the request (5xx).
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = Error::status("maps", 422, "{\"errors\":[]}");
        assert_eq!(err.to_string(), "maps returned HTTP 422: {\"errors\":[]}");
        assert_eq!(err.status_code(), Some(422));
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_non_http_errors_have_no_status() {
        assert_eq!(Error::MapNotCreated.status_code(), None);
        assert!(!Error::config("bad").is_client_error());
        assert!(Error::status("maps", 503, "").is_server_error());
    }
}
