//! Declarative command metadata.
//!
//! A [`CommandSpec`] describes everything the framework needs to know about
//! a command without running it: its name, the positional arguments and
//! named options it accepts, and example invocations for help output.

use serde::{Deserialize, Serialize};

use super::options::OptionValue;

/// Declared type of an argument or option value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free-form text. Options of this type take a value.
    #[default]
    String,
    /// Presence flag. Options of this type take no value.
    Boolean,
    /// Numeric value, parsed as `f64`.
    Number,
}

/// A positional parameter. Declaration order defines binding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl ArgumentSpec {
    /// A required string argument.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            value_type: ValueType::String,
        }
    }

    /// An optional string argument.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    /// Override the declared value type.
    #[must_use]
    pub const fn with_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }
}

/// A named parameter (`--name`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    pub required: bool,
    pub default_value: Option<OptionValue>,
    /// Short equivalents without leading dashes. The first one is the
    /// canonical short form.
    pub aliases: Vec<String>,
}

impl OptionSpec {
    /// An optional `--name` taking a text value.
    pub fn text(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value_type: ValueType::String,
            required: false,
            default_value: None,
            aliases: Vec::new(),
        }
    }

    /// A `--name` presence flag.
    pub fn flag(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Boolean,
            ..Self::text(name, description)
        }
    }

    /// An optional `--name` taking a numeric value.
    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value_type: ValueType::Number,
            ..Self::text(name, description)
        }
    }

    /// Add a short alias (e.g. `"f"` for `-f`).
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Value used when the caller does not supply one.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<OptionValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Mark the option as mandatory.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The canonical short alias, if any.
    pub fn short_alias(&self) -> Option<&str> {
        self.aliases.first().map(|alias| alias.trim_start_matches('-'))
    }

    /// Whether the option consumes a value on the command line.
    pub const fn takes_value(&self) -> bool {
        !matches!(self.value_type, ValueType::Boolean)
    }
}

/// A display-only example invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSpec {
    pub description: String,
    pub command: String,
}

impl ExampleSpec {
    pub fn new(description: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: command.into(),
        }
    }
}

/// Full metadata of a registered command.
///
/// # Example
///
/// ```rust
/// use studykit_core::{ArgumentSpec, CommandSpec, OptionSpec};
///
/// let spec = CommandSpec::new("study:delete", "Delete a study")
///     .usage("studykit study:delete <name> [--force]")
///     .argument(ArgumentSpec::required("name", "Study to delete"))
///     .option(OptionSpec::flag("force", "Skip confirmation").alias("y"));
///
/// assert_eq!(spec.name, "study:delete");
/// assert_eq!(spec.option_named("force").and_then(|o| o.short_alias()), Some("y"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Unique identifier; may use `:` as a namespace separator.
    pub name: String,
    pub description: String,
    pub usage: String,
    pub arguments: Vec<ArgumentSpec>,
    pub options: Vec<OptionSpec>,
    pub examples: Vec<ExampleSpec>,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    #[must_use]
    pub fn argument(mut self, argument: ArgumentSpec) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    #[must_use]
    pub fn example(mut self, description: impl Into<String>, command: impl Into<String>) -> Self {
        self.examples.push(ExampleSpec::new(description, command));
        self
    }

    /// Look up a declared option by its long name.
    pub fn option_named(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }
}
