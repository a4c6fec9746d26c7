//! Help text derived from command metadata.
//!
//! Everything here is a pure function of [`CommandSpec`] data; nothing is
//! printed. Callers decide where the text goes.

use std::fmt::Write as _;

use crate::command::{CommandSpec, OptionSpec};

/// Column the description starts at in the general command listing.
pub const COMMAND_COLUMN_WIDTH: usize = 20;

const BANNER: &str = "studykit - build and manage study material from the command line";

const INTEGRATIONS: &str = "\
AI Agent Integration:
  --codex               Generate study files with Codex agent instructions
  --cursor              Generate study files with Cursor rules
  --custom              Use the custom agent templates from the project";

const SETUP: &str = "\
Setup:
  studykit study:list             See what is already in your studies directory
  STUDYKIT_STUDIES_DIR=<path>     Point the toolkit at another studies directory
  studykit <command> --help       Show detailed help for a command";

/// Stateless help formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelpSystem;

impl HelpSystem {
    /// Detailed help for one command.
    ///
    /// Every listed argument is labelled `(required)`, whatever its declared
    /// `required` flag says.
    pub fn generate_command_help(spec: &CommandSpec) -> String {
        let mut help = String::new();
        let _ = writeln!(help, "{}", spec.name);
        let _ = writeln!(help, "{}", spec.description);

        if !spec.usage.is_empty() {
            let _ = write!(help, "\nUsage: {}\n", spec.usage);
        }

        if !spec.arguments.is_empty() {
            help.push_str("\nArguments:\n");
            for argument in &spec.arguments {
                let _ = writeln!(
                    help,
                    "  {}: {} (required)",
                    argument.name, argument.description
                );
            }
        }

        if !spec.options.is_empty() {
            help.push_str("\nOptions:\n");
            for option in &spec.options {
                let _ = writeln!(help, "  {}: {}", option_flags(option), option.description);
            }
        }

        if !spec.examples.is_empty() {
            help.push_str("\nExamples:\n");
            for example in &spec.examples {
                let _ = writeln!(help, "  {}:", example.description);
                let _ = writeln!(help, "    {}", example.command);
            }
        }

        help.trim_end().to_string()
    }

    /// Toolkit overview: banner, one line per command, then static sections.
    pub fn generate_general_help<'a>(
        commands: impl IntoIterator<Item = &'a CommandSpec>,
    ) -> String {
        let mut help =
            Self::format_help_text(BANNER, "Usage: studykit <command> [arguments] [options]");
        help.push_str("\n\nAvailable Commands:\n");

        for spec in commands {
            let _ = writeln!(
                help,
                "  {:<width$} {}",
                spec.name,
                spec.description,
                width = COMMAND_COLUMN_WIDTH
            );
        }

        help.push('\n');
        help.push_str(INTEGRATIONS);
        help.push_str("\n\n");
        help.push_str(SETUP);
        help
    }

    /// Title line, `=` underline of the same length, description line.
    pub fn format_help_text(title: &str, description: &str) -> String {
        format!(
            "{title}\n{}\n{description}",
            "=".repeat(title.chars().count())
        )
    }
}

/// `--name` plus `, -alias` when a short alias exists.
fn option_flags(option: &OptionSpec) -> String {
    option.short_alias().map_or_else(
        || format!("--{}", option.name),
        |alias| format!("--{}, -{alias}", option.name),
    )
}
