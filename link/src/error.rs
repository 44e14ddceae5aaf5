//! Error types for the trainify-link client library.

use thiserror::Error;

/// Result type used throughout trainify-link.
pub type Result<T> = std::result::Result<T, TrainifyError>;

/// Errors produced by the Trainify client.
#[derive(Error, Debug)]
pub enum TrainifyError {
    /// Transport-level failure (DNS, connect, broken pipe).
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Missing or rejected credentials.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Invalid client configuration (bad URL, missing required field).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Response body could not be decoded into the expected shape.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Upstream returned a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The operation was cancelled before completion.
    #[error("Operation cancelled")]
    Cancelled,

    /// Invariant violation inside the client itself.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TrainifyError {
    /// Reduce the error to a single human-readable string for transient
    /// notices: the upstream message when the server provided one, the
    /// supplied fallback otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            TrainifyError::Server { message, .. } if !message.is_empty() => message.clone(),
            TrainifyError::Authentication(msg) if !msg.is_empty() => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    /// `true` for transport failures that a bounded retry may resolve.
    pub(crate) fn is_retriable(&self) -> bool {
        matches!(self, TrainifyError::Network(_) | TrainifyError::Timeout(_))
    }
}

impl From<reqwest::Error> for TrainifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TrainifyError::Timeout(err.to_string())
        } else if err.is_decode() {
            TrainifyError::Serialization(err.to_string())
        } else {
            TrainifyError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TrainifyError {
    fn from(err: serde_json::Error) -> Self {
        TrainifyError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = TrainifyError::Server {
            status: 422,
            message: "dataset name already taken".into(),
        };
        assert_eq!(
            err.user_message("Failed to load jobs"),
            "dataset name already taken"
        );
    }

    #[test]
    fn fallback_used_for_transport_errors() {
        let err = TrainifyError::Network("connection refused".into());
        assert_eq!(err.user_message("Failed to load jobs"), "Failed to load jobs");
    }

    #[test]
    fn empty_server_message_falls_back() {
        let err = TrainifyError::Server {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message("Upload failed"), "Upload failed");
    }
}
