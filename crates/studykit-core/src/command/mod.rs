//! The command contract.
//!
//! Every unit of CLI functionality implements [`Command`]. Commands are
//! built once with their collaborators injected, registered once, and are
//! stateless across invocations: nothing but those collaborators may live
//! on `self` between calls.
//!
//! The lifecycle is always validate-then-execute. [`Command::validate`] is a
//! side-effect-free check that never fails; it reports problems as a
//! [`ValidationOutcome`]. [`Command::execute`] performs the work and should
//! convert expected failures into `Ok(CommandResult::failure(..))`. An `Err`
//! is the escape hatch for unexpected failures and is mapped by the
//! orchestrator through the [`ErrorHandler`](crate::ErrorHandler).

mod options;
mod spec;

pub use options::{CommandOptions, OptionValue};
pub use spec::{ArgumentSpec, CommandSpec, ExampleSpec, OptionSpec, ValueType};

use async_trait::async_trait;

use crate::error::CommandError;
use crate::help::HelpSystem;
use crate::ports::OutputSink;
use crate::result::{CommandResult, ValidationOutcome};

/// A named, self-contained unit of CLI functionality.
#[async_trait]
pub trait Command: Send + Sync {
    /// Metadata used for registration, parsing and help.
    fn spec(&self) -> &CommandSpec;

    /// Unique name the command is registered under.
    fn name(&self) -> &str {
        &self.spec().name
    }

    /// Check `args`/`options` for well-formedness without side effects.
    async fn validate(&self, args: &[String], options: &CommandOptions) -> ValidationOutcome;

    /// Perform the command's effect against its injected collaborators.
    async fn execute(
        &self,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult, CommandError>;

    /// Write command-specific help to `output`.
    fn show_help(&self, output: &dyn OutputSink) {
        output.writeln(&HelpSystem::generate_command_help(self.spec()));
    }
}
