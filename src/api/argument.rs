use thiserror::Error;

use crate::constant::*;
use crate::model::ArgumentKind;

/// Behaviour of an argument descriptor: something the [`Parser`](crate::Parser) can match on the command line and write values into.
///
/// The parser calls [`Argument::matched`] once each time the descriptor is found on the command line, followed by [`Argument::capture`] for each value that belongs to that occurrence.
/// Flags never receive a `capture`.
///
/// ### Example
/// ```
/// use qflags::{Argument, ArgumentConfig, ArgumentKind, CommandLine, InvalidCapture, Parser};
///
/// // Collects the length of every value given to `--word`.
/// struct WordLengths {
///     config: ArgumentConfig,
///     lengths: Vec<usize>,
/// }
///
/// impl Argument for WordLengths {
///     fn config(&self) -> &ArgumentConfig {
///         &self.config
///     }
///
///     fn matched(&mut self) {}
///
///     fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
///         self.lengths.push(value.len());
///         Ok(())
///     }
///
///     fn is_set(&self) -> bool {
///         !self.lengths.is_empty()
///     }
/// }
///
/// let mut words = WordLengths {
///     config: ArgumentConfig::new("word", ArgumentKind::Option).repeatable(),
///     lengths: Vec::default(),
/// };
/// Parser::new()
///     .add_argument(&mut words)
///     .parse(&CommandLine::new(["program", "--word", "abc", "--word=z"]))
///     .unwrap();
/// assert_eq!(words.lengths, vec![3, 1]);
/// ```
pub trait Argument {
    /// The configuration describing how this descriptor appears on the command line.
    fn config(&self) -> &ArgumentConfig;

    /// Declare that the descriptor has been found on the command line.
    fn matched(&mut self);

    /// Capture a value for this descriptor.
    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture>;

    /// Whether the descriptor was found on the command line.
    fn is_set(&self) -> bool;
}

/// The reason a descriptor rejected a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCapture {
    /// The value is not a valid integer.
    #[error("'{value}' is not a valid integer.")]
    InvalidInteger {
        /// The rejected value.
        value: String,
    },

    /// The value is not one of the allowed choices.
    #[error("'{value}' is not one of {{{}}}.", .choices.join(", "))]
    InvalidChoice {
        /// The rejected value.
        value: String,
        /// The allowed choices.
        choices: Vec<String>,
    },

    /// The value was rejected for another reason.
    #[error("'{value}' is invalid: {message}")]
    Invalid {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// How a descriptor appears on the command line.
///
/// Every built-in descriptor carries one of these; custom [`Argument`] implementations build their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentConfig {
    name: String,
    short: Option<char>,
    kind: ArgumentKind,
    repeatable: bool,
    required: bool,
    help: Option<String>,
    value_name: Option<String>,
    choices: Option<Vec<String>>,
    default: Option<String>,
}

impl ArgumentConfig {
    /// Create a configuration for the descriptor `name` (specified as `--name` for flags & options).
    pub fn new(name: impl Into<String>, kind: ArgumentKind) -> Self {
        Self {
            name: name.into(),
            short: None,
            kind,
            repeatable: false,
            required: false,
            help: None,
            value_name: None,
            choices: None,
            default: None,
        }
    }

    pub(crate) fn builtin_help(short: Option<char>) -> Self {
        let mut config = Self::new(HELP_NAME, ArgumentKind::Flag).help(HELP_MESSAGE);
        config.short = short;
        config
    }

    /// Set the short name, specified as `-s`.
    /// If repeated, only the final short name will apply.
    pub fn short_name(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Allow the descriptor to be specified more than once.
    pub fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Require the descriptor be specified at least once.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Document the help message.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help.replace(description.into());
        self
    }

    /// Set the placeholder used for the value in the help message.
    /// If repeated, only the final name will apply.
    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name.replace(value_name.into());
        self
    }

    /// Restrict the values to the given choices.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices
            .replace(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Record the default value, so it may be checked against the choices.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default.replace(value.into());
        self
    }

    /// The long name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short name, if any.
    pub fn short(&self) -> Option<char> {
        self.short
    }

    /// The class of descriptor.
    pub fn kind(&self) -> ArgumentKind {
        self.kind
    }

    /// Whether the descriptor may be specified more than once.
    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    /// Whether the descriptor must be specified.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The help message, if any.
    pub fn help_message(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The allowed values, if restricted.
    pub fn allowed_choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// The default value, if recorded.
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// The placeholder for the value in the help message.
    ///
    /// Unless set via [`ArgumentConfig::value_name`], this is the upper-cased name with `-` replaced by `_`.
    pub fn placeholder(&self) -> String {
        match &self.value_name {
            Some(value_name) => value_name.clone(),
            None => self.name.to_ascii_uppercase().replace('-', "_"),
        }
    }

    pub(crate) fn set_short(&mut self, short: char) {
        self.short.replace(short);
    }

    pub(crate) fn set_help(&mut self, description: String) {
        self.help.replace(description);
    }

    pub(crate) fn set_required(&mut self) {
        self.required = true;
    }

    pub(crate) fn set_value_name(&mut self, value_name: String) {
        self.value_name.replace(value_name);
    }

    pub(crate) fn set_default(&mut self, value: String) {
        self.default.replace(value);
    }
}

// The builder methods shared by every built-in descriptor.
macro_rules! descriptor_builder {
    ($descriptor:ident) => {
        impl $descriptor {
            /// Set the short name, specified as `-s`.
            /// If repeated, only the final short name will apply.
            pub fn short_name(mut self, short: char) -> Self {
                self.config.set_short(short);
                self
            }

            /// Document the help message.
            /// If repeated, only the final message will apply.
            ///
            /// A help message describes the descriptor in full sentence/paragraph format.
            /// We recommend allowing `qflags` to format this field (ex: it is not recommended to use line breaks `'\n'`).
            pub fn help(mut self, description: impl Into<String>) -> Self {
                self.config.set_help(description.into());
                self
            }

            /// The name, specified on the command line as `--name`.
            pub fn name(&self) -> &str {
                self.config.name()
            }
        }
    };
}

// The builder methods shared by every built-in descriptor that takes a value.
macro_rules! value_builder {
    ($descriptor:ident) => {
        impl $descriptor {
            /// Require this option be specified on the command line.
            pub fn required(mut self) -> Self {
                self.config.set_required();
                self
            }

            /// Set the placeholder used for the value in the help message (ex: `FILE` in `--input FILE`).
            /// If repeated, only the final name will apply.
            pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
                self.config.set_value_name(value_name.into());
                self
            }
        }
    };
}

pub(crate) use descriptor_builder;
pub(crate) use value_builder;
