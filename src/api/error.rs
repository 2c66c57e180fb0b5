//! Run-case error kinds with HTTP status code mapping

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two failure kinds a `/run-case` call can surface to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Body could not be read or parsed as JSON (400)
    InvalidJson,
    /// The handler failed while processing a well-formed request (500)
    HandlerError,
}

impl ErrorKind {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidJson => 400,
            Self::HandlerError => 500,
        }
    }

    /// Get the machine-readable kind string sent in the `error` field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::HandlerError => "handler_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed run-case call, carrying enough to build the HTTP reply
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Error kind (determines HTTP status and `error` field)
    pub kind: ErrorKind,
    /// Human-readable detail, sent verbatim in the `message` field
    pub message: String,
}

impl ApiError {
    /// Create an `invalid_json` error
    #[must_use]
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidJson,
            message: message.into(),
        }
    }

    /// Create a `handler_error` error
    #[must_use]
    pub fn handler_error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::HandlerError,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Build the JSON error envelope for this error
    #[must_use]
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::from(self)
    }
}

/// Wire shape of an error response: `{"error": .., "message": ..}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Kind string (`invalid_json` or `handler_error`)
    pub error: String,
    /// Human-readable message
    pub message: String,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.kind.as_str().to_string(),
            message: err.message.clone(),
        }
    }
}
