//! Failures raised while dispatching or executing a command.
//!
//! Validation problems are never errors; they travel as
//! [`ValidationOutcome`](crate::ValidationOutcome). This type covers
//! everything that goes wrong after validation passed, or before a command
//! could be selected at all.

use thiserror::Error;

/// Error returned from [`Command::execute`](crate::Command::execute) and the
/// dispatch layer.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command's own work failed.
    #[error("{0}")]
    Execution(String),

    /// Unknown command or malformed invocation, detected before any command ran.
    #[error("{0}")]
    Dispatch(String),

    /// OS-level failure not represented by an `io::Error`.
    #[error("{0}")]
    System(String),

    /// No command registered under the given name.
    #[error("Command not found: {0}")]
    NotFound(String),

    /// File-system or other I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CommandError {
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch(message.into())
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::System(message.into())
    }
}
