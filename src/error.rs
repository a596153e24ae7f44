// file: src/error.rs
// version: 1.0.0
// guid: 3606d2f2-c0ae-44b6-9fa9-10e0b6e4b4d9

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, TransferError>;

/// Error types for the transfer bridge
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A required request field was absent or empty
    #[error("{0}")]
    MissingField(String),

    /// The tool (or the WSL launcher) could not be located on PATH
    #[error("{0}")]
    ExecutableNotFound(String),

    #[error("{0}")]
    Spawn(String),

    #[error("{tool} timed out after {seconds} seconds")]
    Timeout {
        tool: String,
        seconds: u64,
        /// Whatever the process wrote before it was killed
        partial_output: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl TransferError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new missing field error
    pub fn missing_field(msg: impl Into<String>) -> Self {
        Self::MissingField(msg.into())
    }

    /// Create a new executable not found error
    pub fn executable_not_found(msg: impl Into<String>) -> Self {
        Self::ExecutableNotFound(msg.into())
    }

    /// Create a new spawn error
    pub fn spawn(msg: impl Into<String>) -> Self {
        Self::Spawn(msg.into())
    }

    /// Create a new server error
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// True for errors the caller caused by sending a bad request
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }

    /// Output captured before the failure, if any
    pub fn partial_output(&self) -> &str {
        match self {
            Self::Timeout { partial_output, .. } => partial_output,
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_display() {
        let err = TransferError::Timeout {
            tool: "rsync".to_string(),
            seconds: 5,
            partial_output: "sending incremental file list\n".to_string(),
        };

        assert_eq!(err.to_string(), "rsync timed out after 5 seconds");
        assert_eq!(err.partial_output(), "sending incremental file list\n");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_field_is_client_error() {
        let err = TransferError::missing_field("'source' and 'destination' are required");
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "'source' and 'destination' are required");
        assert_eq!(err.partial_output(), "");
    }
}
