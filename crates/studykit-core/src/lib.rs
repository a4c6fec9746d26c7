//! Core of the studykit command framework.
//!
//! This crate owns everything a command needs to plug into the toolkit:
//! the [`Command`] contract and its metadata, the [`CommandRegistry`],
//! the [`HelpSystem`] formatter and the [`ErrorHandler`] that maps failures
//! into the uniform [`CommandResult`] shape. It has no dependency on any
//! argument parser; binding to a parser is the job of the CLI adapter.

#![deny(unused_crate_dependencies)]

pub mod command;
pub mod error;
pub mod error_handler;
pub mod help;
pub mod ports;
pub mod registry;
pub mod result;

// Re-export commonly used types for convenience
pub use command::{
    ArgumentSpec, Command, CommandOptions, CommandSpec, ExampleSpec, OptionSpec, OptionValue,
    ValueType,
};
pub use error::CommandError;
pub use error_handler::ErrorHandler;
pub use help::HelpSystem;
pub use ports::{BufferedOutput, ConsoleOutput, Logger, NoopLogger, OutputSink, TracingLogger};
pub use registry::CommandRegistry;
pub use result::{CommandResult, ValidationError, ValidationOutcome};

#[cfg(test)]
use tokio as _;
