//! Shared fixtures for the CLI integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use studykit_cli::{AppInfo, CliApplication};
use studykit_core::{
    BufferedOutput, Command, CommandError, CommandOptions, CommandResult, CommandSpec,
    NoopLogger, ValidationError, ValidationOutcome,
};

/// What a [`SpyCommand`] does when executed.
#[derive(Debug, Clone)]
pub enum Behavior {
    Succeed(&'static str),
    Fail(&'static str),
    Raise(&'static str),
    Panic(&'static str),
}

/// Command that records how it was called.
pub struct SpyCommand {
    spec: CommandSpec,
    behavior: Behavior,
    validation_errors: Vec<ValidationError>,
    validation_panic: Option<&'static str>,
    executions: AtomicUsize,
    last_options: Mutex<Option<CommandOptions>>,
    last_args: Mutex<Vec<String>>,
}

impl SpyCommand {
    pub fn new(spec: CommandSpec, behavior: Behavior) -> Self {
        Self {
            spec,
            behavior,
            validation_errors: Vec::new(),
            validation_panic: None,
            executions: AtomicUsize::new(0),
            last_options: Mutex::new(None),
            last_args: Mutex::new(Vec::new()),
        }
    }

    pub fn named(name: &str, behavior: Behavior) -> Self {
        Self::new(CommandSpec::new(name, format!("Spy for {name}")), behavior)
    }

    pub fn rejecting(mut self, field: &str, message: &str) -> Self {
        self.validation_errors.push(ValidationError::new(field, message));
        self
    }

    /// Make `validate` panic with `message`, as a buggy command would.
    pub fn panicking_in_validate(mut self, message: &'static str) -> Self {
        self.validation_panic = Some(message);
        self
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }

    pub fn last_options(&self) -> Option<CommandOptions> {
        self.last_options.lock().unwrap().clone()
    }

    pub fn last_args(&self) -> Vec<String> {
        self.last_args.lock().unwrap().clone()
    }
}

#[async_trait]
impl Command for SpyCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn validate(&self, _args: &[String], _options: &CommandOptions) -> ValidationOutcome {
        if let Some(message) = self.validation_panic {
            panic!("{message}");
        }
        ValidationOutcome::from_errors(self.validation_errors.clone())
    }

    async fn execute(
        &self,
        args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult, CommandError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() = args.to_vec();
        *self.last_options.lock().unwrap() = Some(options.clone());

        match self.behavior {
            Behavior::Succeed(message) => {
                Ok(CommandResult::ok_with_data(message, serde_json::json!([])))
            }
            Behavior::Fail(message) => Ok(CommandResult::failure(message)),
            Behavior::Raise(message) => Err(CommandError::execution(message)),
            Behavior::Panic(message) => panic!("{message}"),
        }
    }
}

/// Application with no collaborators set, so console and tracing are used.
pub fn bare_app() -> CliApplication {
    CliApplication::new(AppInfo::new("studykit", "0.3.0", "Study toolkit"))
}

/// Application wired to an in-memory sink and a silent logger.
pub fn app() -> (CliApplication, Arc<BufferedOutput>) {
    let output = Arc::new(BufferedOutput::new());
    let mut app = CliApplication::new(AppInfo::new("studykit", "0.3.0", "Study toolkit"));
    app.set_output(output.clone());
    app.set_error_output(output.clone());
    app.set_logger(Arc::new(NoopLogger));
    (app, output)
}
