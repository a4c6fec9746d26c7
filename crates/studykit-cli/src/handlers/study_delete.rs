//! `study:delete` - remove a study directory.
//!
//! The study's files are deleted from disk, so the user is asked to
//! confirm unless `--force` is given.

use std::sync::Arc;

use async_trait::async_trait;
use studykit_core::{
    ArgumentSpec, Command, CommandError, CommandOptions, CommandResult, CommandSpec, OptionSpec,
    OutputSink, ValidationError, ValidationOutcome,
};

use crate::studies::StudyStore;
use crate::utils::Prompter;

/// Deletes one study by name.
pub struct StudyDeleteCommand {
    spec: CommandSpec,
    store: Arc<dyn StudyStore>,
    prompter: Arc<dyn Prompter>,
    output: Arc<dyn OutputSink>,
}

impl StudyDeleteCommand {
    pub fn new(
        store: Arc<dyn StudyStore>,
        prompter: Arc<dyn Prompter>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        let spec = CommandSpec::new("study:delete", "Delete a study and all of its files")
            .usage("studykit study:delete <name> [--force]")
            .argument(ArgumentSpec::required("name", "Name of the study to delete"))
            .option(OptionSpec::flag("force", "Skip the confirmation prompt").alias("y"))
            .example("Delete with confirmation", "studykit study:delete rust")
            .example("Delete without asking", "studykit study:delete rust --force");
        Self {
            spec,
            store,
            prompter,
            output,
        }
    }
}

/// Problems with a study name, if any. Names are single path components.
fn check_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("Study name is required")
    } else if name.contains(['/', '\\']) {
        Some("Study name must not contain path separators")
    } else if name == "." || name == ".." {
        Some("Study name must not be a relative path")
    } else {
        None
    }
}

#[async_trait]
impl Command for StudyDeleteCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn validate(&self, args: &[String], _options: &CommandOptions) -> ValidationOutcome {
        let name = args.first().map_or("", String::as_str);
        let errors = check_name(name)
            .map(|problem| ValidationError::new("name", problem).with_value(name))
            .into_iter()
            .collect();
        ValidationOutcome::from_errors(errors)
    }

    async fn execute(
        &self,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult, CommandError> {
        let Some(name) = args.first() else {
            return Ok(CommandResult::failure("Study name is required"));
        };

        if !self.store.exists(name).await? {
            self.output.writeln(&format!("No study found matching: '{name}'"));
            self.output.writeln("Use 'studykit study:list' to see available studies.");
            return Ok(CommandResult::failure(format!("Study not found: {name}")));
        }

        if !options.flag("force") {
            let question = format!("Delete study '{name}' and all of its files?");
            // Prompters read a terminal; keep that off the async workers
            let prompter = Arc::clone(&self.prompter);
            let answer = tokio::task::spawn_blocking(move || prompter.confirm(&question))
                .await
                .map_err(|err| CommandError::system(format!("Confirmation prompt failed: {err}")))?;
            match answer {
                Ok(true) => {}
                Ok(false) => {
                    self.output.writeln("Delete operation cancelled.");
                    return Ok(CommandResult::ok("Delete cancelled"));
                }
                Err(err) => return Ok(CommandResult::from_error(&err)),
            }
        }

        if let Err(err) = self.store.delete(name).await {
            return Ok(CommandResult::from_error(&err));
        }

        self.output.writeln(&format!("Study '{name}' deleted."));
        Ok(CommandResult::ok(format!("Deleted study: {name}")))
    }
}
