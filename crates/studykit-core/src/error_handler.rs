//! Mapping from failures to the uniform [`CommandResult`] shape.
//!
//! The handler only formats. It never retries or recovers; that is the
//! caller's business.

use std::io;

use crate::error::CommandError;
use crate::result::{CommandResult, ValidationError};

/// Labels prepended to well-known failure messages, matched by substring.
const MESSAGE_LABELS: &[(&str, &str)] = &[
    ("ENOENT", "File not found"),
    ("EACCES", "Permission denied"),
    ("Command not found", "Command not found"),
];

/// Stateless failure formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorHandler;

impl ErrorHandler {
    /// Map a generic error.
    ///
    /// An `io::Error` anywhere in the source chain is recognised by kind;
    /// otherwise the display text goes through [`handle_message`](Self::handle_message).
    pub fn handle_error(error: &(dyn std::error::Error + 'static)) -> CommandResult {
        let message = error.to_string();
        match io_kind(error) {
            Some(io::ErrorKind::NotFound) => labelled("File not found", &message),
            Some(io::ErrorKind::PermissionDenied) => labelled("Permission denied", &message),
            _ => Self::handle_message(&message),
        }
    }

    /// Map a raw failure message, labelling `ENOENT`, `EACCES` and
    /// `Command not found` wherever they occur in the text.
    pub fn handle_message(message: &str) -> CommandResult {
        MESSAGE_LABELS
            .iter()
            .find(|(needle, _)| message.contains(needle))
            .map_or_else(
                || CommandResult::failure(message),
                |(_, label)| labelled(label, message),
            )
    }

    /// One `"<field>: <message>"` line per error, in the original order.
    pub fn handle_validation_errors(errors: &[ValidationError]) -> CommandResult {
        CommandResult::failure_with_errors(
            "Validation failed",
            errors.iter().map(ToString::to_string).collect(),
        )
    }

    pub fn handle_cli_error(message: &str) -> CommandResult {
        CommandResult::failure(format!("CLI Error: {message}"))
    }

    pub fn handle_system_error(message: &str) -> CommandResult {
        CommandResult::failure(format!("System Error: {message}"))
    }

    /// Route a [`CommandError`] to the matching mapping.
    pub fn handle_command_error(error: &CommandError) -> CommandResult {
        match error {
            CommandError::Dispatch(message) => Self::handle_cli_error(message),
            CommandError::System(message) => Self::handle_system_error(message),
            CommandError::NotFound(name) => labelled("Command not found", name),
            CommandError::Io(io_err) => Self::handle_error(io_err),
            other => Self::handle_error(other),
        }
    }
}

fn labelled(label: &str, message: &str) -> CommandResult {
    CommandResult::failure(format!("{label}: {message}"))
}

fn io_kind(error: &(dyn std::error::Error + 'static)) -> Option<io::ErrorKind> {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = err.source();
    }
    None
}
