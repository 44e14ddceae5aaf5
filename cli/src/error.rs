//! Error types for trainify-cli.
//!
//! Wraps SDK errors with user-friendly messages and adds the CLI's own
//! failure modes (config files, local file IO, aborted prompts).

use std::fmt;
use trainify_link::TrainifyError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug)]
pub enum CliError {
    /// Error from the trainify-link library
    Link(TrainifyError),

    /// Configuration file error
    Configuration(String),

    /// Local file I/O error
    File(String),

    /// Invalid user input
    Input(String),

    /// User aborted at a confirmation prompt
    Cancelled,
}

impl CliError {
    fn format_link_error(err: &TrainifyError) -> String {
        match err {
            TrainifyError::Network(msg) => format!("Cannot reach server: {}", msg),
            TrainifyError::Timeout(msg) => format!("Request timed out: {}", msg),
            TrainifyError::Authentication(msg) => msg.clone(),
            TrainifyError::Configuration(msg) => msg.clone(),
            TrainifyError::Serialization(msg) => format!("Unexpected server response: {}", msg),
            TrainifyError::Server { status, message } => {
                format!("Server error ({}): {}", status, message)
            }
            TrainifyError::Cancelled => "Operation cancelled".to_string(),
            TrainifyError::Internal(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Link(e) => write!(f, "{}", Self::format_link_error(e)),
            CliError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            CliError::File(msg) => write!(f, "File error: {}", msg),
            CliError::Input(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<TrainifyError> for CliError {
    fn from(err: TrainifyError) -> Self {
        CliError::Link(err)
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::File(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Configuration(format!("TOML parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = CliError::Input("dataset name is required".into());
        assert_eq!(err.to_string(), "Invalid input: dataset name is required");

        let err = CliError::Cancelled;
        assert_eq!(err.to_string(), "Operation cancelled");

        let err = CliError::from(TrainifyError::Server {
            status: 404,
            message: "job not found".into(),
        });
        assert_eq!(err.to_string(), "Server error (404): job not found");
    }
}
