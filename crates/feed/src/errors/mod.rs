//! Error types for the feed crate.

use thiserror::Error;

/// Errors that can occur while fetching one of the external feeds.
///
/// Each variant carries the name of the source that failed so the server
/// layer can report "which upstream" without string matching.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request exceeded the configured timeout.
    #[error("Request timeout: {source_name} took too long to respond")]
    Timeout {
        /// Human-readable source name (e.g. "countries directory").
        source_name: String,
    },

    /// The upstream answered with a non-success HTTP status.
    #[error("{source_name} error: {status} {reason}")]
    UpstreamStatus {
        source_name: String,
        /// Numeric HTTP status code returned by the upstream.
        status: u16,
        /// Canonical reason phrase for the status, if known.
        reason: String,
    },

    /// The upstream host could not be reached at all.
    #[error("Network error: could not reach {source_name}")]
    Network { source_name: String },

    /// Any other transport-level failure.
    #[error("Failed to fetch from {source_name}: {message}")]
    Transport {
        source_name: String,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Invalid payload from {source_name}: {message}")]
    InvalidPayload {
        source_name: String,
        message: String,
    },
}

impl FeedError {
    /// Classifies a `reqwest` transport error for the given source.
    ///
    /// Status-code failures are handled separately by the clients since the
    /// response object carries the status; this only triages errors raised
    /// before a response was obtained.
    pub fn from_transport(source_name: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout {
                source_name: source_name.to_string(),
            }
        } else if err.is_connect() {
            FeedError::Network {
                source_name: source_name.to_string(),
            }
        } else {
            FeedError::Transport {
                source_name: source_name.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// The source name attached to this error.
    pub fn source_name(&self) -> &str {
        match self {
            FeedError::Timeout { source_name }
            | FeedError::UpstreamStatus { source_name, .. }
            | FeedError::Network { source_name }
            | FeedError::Transport { source_name, .. }
            | FeedError::InvalidPayload { source_name, .. } => source_name,
        }
    }
}
