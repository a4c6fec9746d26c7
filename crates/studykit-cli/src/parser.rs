//! Binding between registered commands and the clap parser.
//!
//! The parser is generated from [`CommandSpec`] metadata rather than a
//! derive enum, so whatever sits in the registry is what the command line
//! accepts. Parsed matches are bound back to the command's declared
//! arguments and options to produce an [`Invocation`].

use std::collections::HashSet;
use std::num::ParseFloatError;
use std::str::ParseBoolError;
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, ColorChoice};
use studykit_core::{
    ArgumentSpec, Command, CommandOptions, CommandSpec, OptionSpec, OptionValue, ValueType,
};

/// Global AI-agent integration flags, accepted before or after any command.
pub const INTEGRATION_FLAGS: [(&str, &str); 3] = [
    ("codex", "Enable Codex agent integration"),
    ("cursor", "Enable Cursor agent integration"),
    ("custom", "Enable custom agent integration"),
];

/// Id of the per-command help flag.
const HELP_ID: &str = "help";

/// Identity of the application as shown by `--help` and `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub about: String,
}

impl AppInfo {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        about: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            about: about.into(),
        }
    }
}

/// Positional arguments and resolved options for one matched command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub args: Vec<String>,
    pub options: CommandOptions,
    /// `-h/--help` was given for the command itself.
    pub help_requested: bool,
}

/// Build the root parser with one subcommand per registered command.
pub fn build_parser(info: &AppInfo, commands: &[Arc<dyn Command>]) -> clap::Command {
    let mut root = clap::Command::new(info.name.clone())
        .version(info.version.clone())
        .about(info.about.clone())
        .color(ColorChoice::Never)
        .disable_help_subcommand(true);

    for (name, help) in INTEGRATION_FLAGS {
        root = root.arg(
            Arg::new(name)
                .long(name)
                .help(help)
                .action(ArgAction::SetTrue)
                .global(true),
        );
    }

    for command in commands {
        root = root.subcommand(build_subcommand(command.spec()));
    }

    root
}

/// Bind the matches of a subcommand to the declared arguments and options.
pub fn bind_invocation(spec: &CommandSpec, matches: &ArgMatches) -> Invocation {
    let declared = Declared::from_spec(spec);

    let args = declared
        .arguments
        .iter()
        .filter_map(|argument| {
            matches
                .get_one::<String>(&positional_id(&argument.name))
                .cloned()
        })
        .collect();

    let mut options = CommandOptions::new();
    for DeclaredOption { spec: option, .. } in &declared.options {
        match option.value_type {
            ValueType::Boolean => {
                let default = option
                    .default_value
                    .as_ref()
                    .and_then(OptionValue::as_flag)
                    .unwrap_or(false);
                options.insert(option.name.clone(), matches.get_flag(&option.name) || default);
            }
            ValueType::String => {
                if let Some(value) = matches.get_one::<String>(&option.name) {
                    options.insert(option.name.clone(), value.clone());
                }
            }
            ValueType::Number => {
                if let Some(value) = matches.get_one::<f64>(&option.name) {
                    options.insert(option.name.clone(), *value);
                }
            }
        }
    }

    for (name, _) in INTEGRATION_FLAGS {
        options.insert(name, matches.get_flag(name));
    }

    Invocation {
        args,
        options,
        help_requested: matches.get_flag(HELP_ID),
    }
}

/// An option as it is handed to clap, with the aliases it kept.
struct DeclaredOption<'a> {
    spec: &'a OptionSpec,
    aliases: Vec<&'a str>,
}

/// What a command declares, minus framework names and collisions.
///
/// clap requires every id, long name and short flag of a subcommand to be
/// unique. The first declaration of a name or alias keeps it; later ones
/// are dropped and listed in `dropped`.
struct Declared<'a> {
    arguments: Vec<&'a ArgumentSpec>,
    options: Vec<DeclaredOption<'a>>,
    dropped: Vec<String>,
    /// `-h` is still free for the help flag.
    help_short: bool,
}

impl<'a> Declared<'a> {
    fn from_spec(spec: &'a CommandSpec) -> Self {
        let mut dropped = Vec::new();

        let mut argument_names = HashSet::new();
        let mut arguments = Vec::new();
        for argument in &spec.arguments {
            if argument_names.insert(argument.name.as_str()) {
                arguments.push(argument);
            } else {
                dropped.push(format!("argument '{}'", argument.name));
            }
        }

        let mut longs: HashSet<&str> = INTEGRATION_FLAGS
            .iter()
            .map(|(name, _)| *name)
            .chain([HELP_ID])
            .collect();
        let mut shorts: HashSet<char> = HashSet::new();
        let mut options = Vec::new();
        for option in spec.options.iter().filter(|o| !is_reserved(&o.name)) {
            if !longs.insert(option.name.as_str()) {
                dropped.push(format!("option '--{}'", option.name));
                continue;
            }

            let mut aliases = Vec::new();
            for alias in option.aliases.iter().map(|alias| alias.trim_start_matches('-')) {
                let free = match single_char(alias) {
                    Some(short) => shorts.insert(short),
                    None => !alias.is_empty() && longs.insert(alias),
                };
                if free {
                    aliases.push(alias);
                } else {
                    dropped.push(format!("alias '{alias}' of '--{}'", option.name));
                }
            }
            options.push(DeclaredOption {
                spec: option,
                aliases,
            });
        }

        Self {
            arguments,
            options,
            dropped,
            help_short: !shorts.contains(&'h'),
        }
    }
}

fn build_subcommand(spec: &CommandSpec) -> clap::Command {
    let declared = Declared::from_spec(spec);
    for what in &declared.dropped {
        tracing::warn!(command = %spec.name, "Ignoring {what}: name already in use");
    }

    let mut command = clap::Command::new(spec.name.clone())
        .about(spec.description.clone())
        .disable_help_flag(true);

    if !spec.usage.is_empty() {
        command = command.override_usage(spec.usage.clone());
    }

    // clap rejects a required positional after an optional one; such
    // arguments are left to the command's own validation
    let mut preceding_required = true;
    for (index, argument) in declared.arguments.iter().enumerate() {
        preceding_required &= argument.required;
        command = command.arg(build_positional(index + 1, argument, preceding_required));
    }

    for option in &declared.options {
        command = command.arg(build_option(option));
    }

    let mut help = Arg::new(HELP_ID)
        .long("help")
        .help("Show help for this command")
        .action(ArgAction::SetTrue)
        .exclusive(true);
    if declared.help_short {
        help = help.short('h');
    }

    command.arg(help)
}

fn build_positional(index: usize, spec: &ArgumentSpec, required: bool) -> Arg {
    let arg = Arg::new(positional_id(&spec.name))
        .value_name(spec.name.clone())
        .help(spec.description.clone())
        .index(index)
        .required(required)
        .action(ArgAction::Set);

    // Values stay strings; typed arguments are only checked for shape
    match spec.value_type {
        ValueType::String => arg,
        ValueType::Number => arg
            .allow_negative_numbers(true)
            .value_parser(number_text),
        ValueType::Boolean => arg.value_parser(boolean_text),
    }
}

fn build_option(declared: &DeclaredOption<'_>) -> Arg {
    let spec = declared.spec;
    let mut arg = Arg::new(spec.name.clone())
        .long(spec.name.clone())
        .help(spec.description.clone())
        .required(spec.required);

    let mut aliases = declared.aliases.iter().copied();
    if let Some(first) = aliases.next() {
        arg = match single_char(first) {
            Some(short) => arg.short(short),
            None => arg.visible_alias(first.to_string()),
        };
    }
    for alias in aliases {
        arg = match single_char(alias) {
            Some(short) => arg.visible_short_alias(short),
            None => arg.visible_alias(alias.to_string()),
        };
    }

    arg = match spec.value_type {
        ValueType::Boolean => arg.action(ArgAction::SetTrue),
        ValueType::String => arg.action(ArgAction::Set).value_name("VALUE"),
        ValueType::Number => arg
            .action(ArgAction::Set)
            .value_name("NUMBER")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(f64)),
    };

    if spec.takes_value() {
        if let Some(default) = &spec.default_value {
            arg = arg.default_value(default.to_string());
        }
    }

    arg
}

fn number_text(value: &str) -> Result<String, ParseFloatError> {
    value.parse::<f64>().map(|_| value.to_string())
}

fn boolean_text(value: &str) -> Result<String, ParseBoolError> {
    value.parse::<bool>().map(|_| value.to_string())
}

/// Names owned by the framework: the help flag and the integration flags.
fn is_reserved(name: &str) -> bool {
    name == HELP_ID || INTEGRATION_FLAGS.iter().any(|(flag, _)| *flag == name)
}

/// Positionals get their own id space so they never clash with option names.
fn positional_id(name: &str) -> String {
    format!("arg:{name}")
}

fn single_char(alias: &str) -> Option<char> {
    let mut chars = alias.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
