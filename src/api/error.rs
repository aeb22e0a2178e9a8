//! API error types for the GitHub client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when interacting with the GitHub API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The token contains bytes that cannot be sent in a header.
    #[error("Invalid API token: not a valid header value")]
    InvalidToken,

    /// The request path is not a valid URL reference.
    #[error("Invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Invalid API response (HTTP {status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// The response carried a status other than the one the caller expected.
    #[error("Unexpected HTTP status {actual} (expected {expected})")]
    UnexpectedStatus {
        expected: StatusCode,
        actual: StatusCode,
    },

    /// An error raised while performing a named operation.
    #[error("{op}: {source}")]
    Operation {
        op: &'static str,
        #[source]
        source: Box<ApiError>,
    },
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Broad classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client construction failed (base URL, token).
    Config,
    /// The request could not be built; nothing was sent.
    Build,
    /// The exchange with the server failed.
    Transport,
    /// The server answered but the body could not be decoded.
    Decode,
    /// The server answered with a status the caller rejected.
    Status,
}

impl ApiError {
    /// Tag an error with the name of the operation that produced it.
    pub fn with_op(self, op: &'static str) -> Self {
        ApiError::Operation {
            op,
            source: Box::new(self),
        }
    }

    /// Classify this error, looking through operation wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidBaseUrl { .. } | ApiError::InvalidToken => ErrorKind::Config,
            ApiError::InvalidPath { .. } | ApiError::Serialize(_) => ErrorKind::Build,
            ApiError::Network(_) => ErrorKind::Transport,
            ApiError::Decode { .. } => ErrorKind::Decode,
            ApiError::UnexpectedStatus { .. } => ErrorKind::Status,
            ApiError::Operation { source, .. } => source.kind(),
        }
    }

    /// The HTTP status of the response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Decode { status, .. } => Some(*status),
            ApiError::UnexpectedStatus { actual, .. } => Some(*actual),
            ApiError::Network(e) => e.status(),
            ApiError::Operation { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The innermost error, skipping operation wrappers.
    pub fn root(&self) -> &ApiError {
        match self {
            ApiError::Operation { source, .. } => source.root(),
            other => other,
        }
    }
}
