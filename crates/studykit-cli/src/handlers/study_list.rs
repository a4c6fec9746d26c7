//! `study:list` - show every study in the studies directory.

use std::sync::Arc;

use async_trait::async_trait;
use studykit_core::{
    Command, CommandError, CommandOptions, CommandResult, CommandSpec, OptionSpec, OutputSink,
    ValidationError, ValidationOutcome,
};

use crate::presentation::{format_optional, separator, truncate_string};
use crate::studies::{StudyStore, StudySummary};

const FORMATS: [&str; 2] = ["table", "json"];

/// Lists studies as a table or as JSON.
pub struct StudyListCommand {
    spec: CommandSpec,
    store: Arc<dyn StudyStore>,
    output: Arc<dyn OutputSink>,
}

impl StudyListCommand {
    pub fn new(store: Arc<dyn StudyStore>, output: Arc<dyn OutputSink>) -> Self {
        let spec = CommandSpec::new("study:list", "List all studies")
            .usage("studykit study:list [--format <table|json>]")
            .option(
                OptionSpec::text("format", "Output format (table, json)")
                    .alias("f")
                    .default_value("table"),
            )
            .example("List studies in a table", "studykit study:list")
            .example("List studies as JSON", "studykit study:list --format json");
        Self {
            spec,
            store,
            output,
        }
    }

    fn write_table(&self, studies: &[StudySummary]) {
        self.output.writeln(&format!("Found {} study(ies):\n", studies.len()));
        self.output.writeln(&format!("{:<30} {:<6} {:<20} Path", "Name", "Files", "Modified"));
        self.output.writeln(&separator(90));

        for study in studies {
            let modified = study
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string());
            self.output.writeln(&format!(
                "{:<30} {:<6} {:<20} {}",
                truncate_string(&study.name, 29),
                study.file_count,
                format_optional(modified.as_ref(), "--"),
                study.path.display()
            ));
        }
    }
}

#[async_trait]
impl Command for StudyListCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    async fn validate(&self, _args: &[String], options: &CommandOptions) -> ValidationOutcome {
        match options.text("format") {
            Some(format) if !FORMATS.contains(&format) => {
                ValidationOutcome::from_errors(vec![
                    ValidationError::new("format", "Format must be one of: table, json")
                        .with_value(format),
                ])
            }
            _ => ValidationOutcome::valid(),
        }
    }

    async fn execute(
        &self,
        _args: &[String],
        options: &CommandOptions,
    ) -> Result<CommandResult, CommandError> {
        let studies = match self.store.list().await {
            Ok(studies) => studies,
            Err(err) => return Ok(CommandResult::from_error(&err)),
        };
        let data = serde_json::to_value(&studies)?;

        if options.text("format") == Some("json") {
            self.output.writeln(&serde_json::to_string_pretty(&data)?);
        } else if studies.is_empty() {
            self.output.writeln("No studies found.");
        } else {
            self.write_table(&studies);
        }

        Ok(CommandResult::ok_with_data(
            format!("Found {} studies", studies.len()),
            data,
        ))
    }
}
