//! Error types for the portal client.
//!
//! Every failure surfaced by [`ApiClient`](crate::ApiClient) flows through the
//! single [`Error`] type. Server-reported failures are normalized into
//! [`ApiError`], which keeps the HTTP status as structured data so callers can
//! branch on it instead of inspecting message text.

use std::fmt;
use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// The unified error type for portal operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-success status.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// A success response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The credential store could not be read or written.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (invalid URL, endpoint, header).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the server-reported error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True when the server rejected the request's credential (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_unauthorized)
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// A normalized failure reported by the API server.
///
/// The message is the server's `message` field when one was present,
/// otherwise `HTTP <status>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Build an error from a status and the server's optional message.
    pub fn new(status: StatusCode, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self { status, message }
    }

    /// The HTTP status the server returned.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the server rejected the credential.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// A 2xx response body that did not match the expected shape.
#[derive(Debug, Error)]
#[error("{endpoint}: {source}")]
pub struct DecodeError {
    pub endpoint: String,
    #[source]
    pub source: serde_json::Error,
}

/// Credential store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The persisted credential file is not valid JSON.
    #[error("corrupt credential file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Header name or value rejected by the HTTP layer.
    #[error("invalid header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// Endpoint path that would not reach the route it names.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Resource id that cannot stand as a single path segment.
    #[error("invalid resource id '{value}': {reason}")]
    ResourceId { value: String, reason: String },

    /// Request body could not be encoded as JSON.
    #[error("invalid request body: {reason}")]
    Body { reason: String },
}
