//! CLI-specific error types and exit-code mappings.
//!
//! Command failures never reach this type; they come back from
//! [`CliApplication::execute`](crate::CliApplication::execute) as results.
//! `CliError` covers what can go wrong before the application is running.

use thiserror::Error;

/// Failures while configuring or bootstrapping the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: Command reported failure
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
