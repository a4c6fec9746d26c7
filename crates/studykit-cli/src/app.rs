//! The orchestrator: parse, look up, validate, execute, report.
//!
//! [`CliApplication::execute`] is the only entry point a scripting caller
//! needs. It never panics and never returns an error: every path ends in
//! exactly one [`CommandResult`].

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures_util::FutureExt;
use studykit_core::{
    Command, CommandError, CommandRegistry, CommandResult, ConsoleOutput, ErrorHandler,
    HelpSystem, Logger, OutputSink, TracingLogger,
};

use crate::parser::{self, AppInfo, Invocation};

/// Message of the coarse result returned for a successful command.
pub const SUCCESS_MESSAGE: &str = "Command executed successfully";

/// Owns the command registry and drives the command lifecycle.
///
/// Output, error output and logger are optional collaborators; when one is
/// missing the console (or `tracing`) is used instead.
pub struct CliApplication {
    info: AppInfo,
    registry: CommandRegistry,
    output: Option<Arc<dyn OutputSink>>,
    error_output: Option<Arc<dyn OutputSink>>,
    logger: Option<Arc<dyn Logger>>,
}

impl CliApplication {
    /// Create an application with an empty registry.
    pub fn new(info: AppInfo) -> Self {
        Self::with_registry(info, CommandRegistry::new())
    }

    /// Create an application around an existing registry.
    pub fn with_registry(info: AppInfo, registry: CommandRegistry) -> Self {
        Self {
            info,
            registry,
            output: None,
            error_output: None,
            logger: None,
        }
    }

    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// Register a command; the parser picks it up on the next call.
    pub fn register_command(&mut self, command: Arc<dyn Command>) {
        self.logger().debug(&format!("Registering command '{}'", command.name()));
        self.registry.register(command);
    }

    pub fn unregister_command(&mut self, name: &str) {
        self.registry.unregister(name);
    }

    pub fn get_command(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.registry.get(name)
    }

    pub fn list_commands(&self) -> Vec<Arc<dyn Command>> {
        self.registry.list()
    }

    /// Drop every registered command.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    pub fn set_output(&mut self, output: Arc<dyn OutputSink>) {
        self.output = Some(output);
    }

    pub fn set_error_output(&mut self, error_output: Arc<dyn OutputSink>) {
        self.error_output = Some(error_output);
    }

    pub fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = Some(logger);
    }

    /// Write the parser's help text.
    pub fn show_help(&self) {
        let mut parser = self.parser();
        self.output().writeln(parser.render_help().to_string().trim_end());
    }

    /// Write the parser's version line.
    pub fn show_version(&self) {
        self.output().writeln(self.parser().render_version().trim_end());
    }

    /// Toolkit overview listing every registered command.
    pub fn general_help(&self) -> String {
        let commands = self.registry.list();
        HelpSystem::generate_general_help(commands.iter().map(|command| command.spec()))
    }

    /// Run one invocation. `argv` excludes the program name.
    pub async fn execute<I, T>(&self, argv: I) -> CommandResult
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
        if argv.is_empty() {
            self.output().writeln(&self.general_help());
            return CommandResult::ok("Help displayed");
        }

        let argv = std::iter::once(self.info.name.clone()).chain(argv);
        let parsed =
            panic::catch_unwind(AssertUnwindSafe(|| self.parser().try_get_matches_from(argv)));
        let matches = match parsed {
            Ok(Ok(matches)) => matches,
            Ok(Err(err)) => return self.handle_parse_error(&err),
            Err(payload) => return self.report_panic(&self.info.name, "parsing", payload.as_ref()),
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            self.output().writeln(&self.general_help());
            return CommandResult::ok("Help displayed");
        };

        let Some(command) = self.registry.get(name) else {
            let result = ErrorHandler::handle_command_error(&CommandError::NotFound(name.into()));
            self.report_error(&format!("Error: {}", result.message));
            return result;
        };

        let invocation = parser::bind_invocation(command.spec(), sub_matches);
        if invocation.help_requested {
            let output = self.output();
            let shown =
                panic::catch_unwind(AssertUnwindSafe(|| command.show_help(output.as_ref())));
            return match shown {
                Ok(()) => CommandResult::ok("Help displayed"),
                Err(payload) => self.report_panic(name, "help", payload.as_ref()),
            };
        }

        self.run(command.as_ref(), &invocation).await
    }

    async fn run(&self, command: &dyn Command, invocation: &Invocation) -> CommandResult {
        let logger = self.logger();
        let name = command.name();
        logger.debug(&format!(
            "Validating '{name}' with {} argument(s)",
            invocation.args.len()
        ));

        let validated = AssertUnwindSafe(command.validate(&invocation.args, &invocation.options))
            .catch_unwind()
            .await;
        let outcome = match validated {
            Ok(outcome) => outcome,
            Err(payload) => return self.report_panic(name, "validation", payload.as_ref()),
        };
        if !outcome.valid {
            let result = ErrorHandler::handle_validation_errors(&outcome.errors);
            logger.warn(&format!("Validation failed for '{name}'"));
            self.report_error(&format!("Error: {}", result.message));
            for line in result.errors.iter().flatten() {
                self.report_error(&format!("  {line}"));
            }
            return result;
        }

        logger.debug(&format!("Executing '{name}'"));
        let executed = AssertUnwindSafe(command.execute(&invocation.args, &invocation.options))
            .catch_unwind()
            .await;

        match executed {
            Ok(Ok(result)) if result.success => {
                logger.info(&format!("'{name}' finished: {}", result.message));
                CommandResult::ok(SUCCESS_MESSAGE)
            }
            Ok(Ok(result)) => {
                logger.warn(&format!("'{name}' reported failure: {}", result.message));
                self.report_error(&format!("Error: {}", result.message));
                CommandResult::failure(result.message)
            }
            Ok(Err(err)) => {
                logger.error(&format!("'{name}' raised: {err}"));
                let result = ErrorHandler::handle_command_error(&err);
                self.report_error(&format!("Execution error: {}", result.message));
                result
            }
            Err(payload) => self.report_panic(name, "execution", payload.as_ref()),
        }
    }

    /// Contain a panic raised by one of the command's lifecycle hooks.
    fn report_panic(&self, name: &str, phase: &str, payload: &(dyn Any + Send)) -> CommandResult {
        let message = panic_message(payload);
        self.logger().error(&format!("'{name}' panicked during {phase}: {message}"));
        let result = ErrorHandler::handle_message(&message);
        self.report_error(&format!("Execution error: {}", result.message));
        result
    }

    fn handle_parse_error(&self, err: &clap::Error) -> CommandResult {
        use clap::error::ErrorKind;

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                self.output().writeln(err.to_string().trim_end());
                CommandResult::ok("Help displayed")
            }
            _ => {
                let message = parse_error_message(err);
                self.logger().debug(&format!("Parse failed: {message}"));
                self.report_error(&format!("Error: {message}"));
                CommandResult::failure(message)
            }
        }
    }

    fn parser(&self) -> clap::Command {
        parser::build_parser(&self.info, &self.registry.list())
    }

    fn output(&self) -> Arc<dyn OutputSink> {
        self.output
            .clone()
            .unwrap_or_else(|| Arc::new(ConsoleOutput::new()))
    }

    fn logger(&self) -> Arc<dyn Logger> {
        self.logger
            .clone()
            .unwrap_or_else(|| Arc::new(TracingLogger))
    }

    fn report_error(&self, line: &str) {
        match &self.error_output {
            Some(sink) => sink.write_errorln(line),
            None => ConsoleOutput::new().write_errorln(line),
        }
    }
}

impl std::fmt::Debug for CliApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliApplication")
            .field("info", &self.info)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// First line of a clap error without its `error: ` prefix.
fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "command panicked".to_string())
}
