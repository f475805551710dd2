use thiserror::Error;

/// Unified error type for version-manager operations
#[derive(Error, Debug)]
pub enum VersionManagerError {
    #[error("Command `{command}` failed: {output}")]
    Command { command: String, output: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}", network_message(.status, .body))]
    Network { status: Option<u16>, body: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn network_message(status: &Option<u16>, body: &str) -> String {
    match status {
        Some(code) => format!("Release API returned status {}: {}", code, body),
        None => format!("Release API request failed: {}", body),
    }
}

/// Convenience type alias for Results in version-manager
pub type Result<T> = std::result::Result<T, VersionManagerError>;

impl VersionManagerError {
    /// Create a command error from the invoked command line and its captured output
    pub fn command(command: impl Into<String>, output: impl Into<String>) -> Self {
        VersionManagerError::Command {
            command: command.into(),
            output: output.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionManagerError::Config(msg.into())
    }

    /// Create a network error for a response with a non-2xx status
    pub fn network(status: u16, body: impl Into<String>) -> Self {
        VersionManagerError::Network {
            status: Some(status),
            body: body.into(),
        }
    }

    /// Create a network error for a request that never produced a response
    pub fn transport(msg: impl Into<String>) -> Self {
        VersionManagerError::Network {
            status: None,
            body: msg.into(),
        }
    }
}

impl From<reqwest::Error> for VersionManagerError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => VersionManagerError::network(status.as_u16(), err.to_string()),
            None => VersionManagerError::transport(err.to_string()),
        }
    }
}
