//! Error types for the resource API client.
//!
//! # Design
//! One flat enum covers every failure the client and the aggregation
//! workflows can hit. `HttpStatus` keeps the raw status code and body for
//! debugging; everything else carries a message string. No variant is fatal:
//! callers convert errors into reported lines plus an empty/absent result.

use std::fmt;

/// Errors returned by [`crate::ApiClient`] operations and the workflows
/// built on top of them.
#[derive(Debug)]
pub enum ApiError {
    /// Connection failure, timeout, or a malformed response at the
    /// network layer.
    Transport(String),

    /// The response body was not valid JSON or did not match the
    /// expected shape.
    Decode(String),

    /// The request payload could not be serialized to JSON.
    Encode(String),

    /// A caller-supplied precondition was violated, e.g. updating a user
    /// whose id is not positive.
    InvalidArgument(String),

    /// An HTTP verb token outside the supported set. Unreachable through
    /// the typed operation surface; defensive only.
    UnsupportedMethod(String),

    /// Transport and decode succeeded but the status code fell outside
    /// [200,300).
    HttpStatus { status: u16, body: String },

    /// A local file write failed while persisting comments.
    Io(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "transport error: {msg}"),
            ApiError::Decode(msg) => write!(f, "deserialization failed: {msg}"),
            ApiError::Encode(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            ApiError::UnsupportedMethod(token) => {
                write!(f, "unsupported HTTP method: {token}")
            }
            ApiError::HttpStatus { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::Io(msg) => write!(f, "file write failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
