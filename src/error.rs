use thiserror::Error;

use crate::api::InvalidCapture;

/// A mis-configured [`Parser`](crate::Parser), detected before any token is parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Names must be non-empty, must not start with `-`, and must not contain `=` or whitespace.
    #[error("Config error: invalid name '{0}'.")]
    InvalidName(String),

    /// Short names must be alphanumeric.
    #[error("Config error: invalid short name '{short}' for '{name}'.")]
    InvalidShortName {
        /// The descriptor name.
        name: String,
        /// The offending short name.
        short: char,
    },

    /// Two descriptors share a name.
    #[error("Config error: cannot duplicate the name '{0}'.")]
    DuplicateName(String),

    /// Two descriptors share a short name.
    #[error("Config error: cannot duplicate the short name '{0}'.")]
    DuplicateShortName(char),

    /// More than one positional descriptor was registered.
    #[error("Config error: cannot register more than one positional descriptor ('{0}').")]
    MultiplePositionals(String),

    /// A descriptor restricted to choices has none.
    #[error("Config error: '{0}' has no choices.")]
    EmptyChoices(String),

    /// A default value is not amongst the descriptor's choices.
    #[error("Config error: default '{value}' for '{name}' is not one of its choices.")]
    InvalidDefault {
        /// The descriptor name.
        name: String,
        /// The offending default.
        value: String,
    },
}

/// A single problem with the command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// `--NAME` does not match any descriptor.
    #[error("Unknown option '--{0}'.")]
    UnknownOption(String),

    /// `-N` does not match any descriptor.
    #[error("Unknown short option '-{0}'.")]
    UnknownShortOption(char),

    /// A flag was given a value via `=`.
    #[error("Flag '--{name}' does not take a value (found '{value}').")]
    UnexpectedValue {
        /// The flag name.
        name: String,
        /// The value that was given.
        value: String,
    },

    /// An option was the final token, without its value.
    #[error("Option '--{0}' requires a value.")]
    MissingValue(String),

    /// A value taking short option was not the last in its group (ex: `-bf` where `-b` takes a value).
    #[error("Short option '-{short}' requires a value, so it must be last in '-{group}'.")]
    ValueNotLast {
        /// The short name of the option.
        short: char,
        /// The group of short names.
        group: String,
    },

    /// A non-repeatable descriptor was specified more than once.
    #[error("Option '--{0}' was specified more than once.")]
    Duplicate(String),

    /// A positional token was found, but no positional descriptor is registered.
    #[error("Unexpected argument '{0}'.")]
    UnexpectedArgument(String),

    /// A required descriptor was never specified.
    #[error("Required option '--{0}' was not specified.")]
    MissingRequired(String),

    /// A descriptor rejected its value.
    #[error("Invalid value for '--{name}': {capture}")]
    InvalidValue {
        /// The descriptor name.
        name: String,
        /// Why the value was rejected.
        capture: InvalidCapture,
    },
}

/// The result of an unsuccessful [`Parser::parse`](crate::Parser::parse).
///
/// The `Display` implementation produces the complete text to show the user, ending with a newline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The parser configuration is invalid; no token was parsed.
    #[error("{0}\n")]
    Config(#[from] ConfigError),

    /// `--help` (or `-h`) was specified; contains the usage text.
    /// No descriptor was modified.
    #[error("{0}")]
    HelpRequested(String),

    /// The command line is invalid; contains every problem found.
    #[error("{}", render_lines(.0))]
    Invalid(Vec<ArgumentError>),
}

impl ParseError {
    /// Whether this is a request for help, rather than an actual error.
    pub fn is_help(&self) -> bool {
        matches!(self, ParseError::HelpRequested(_))
    }

    /// The individual command line problems.
    /// Empty for configuration errors and help requests.
    pub fn errors(&self) -> &[ArgumentError] {
        match self {
            ParseError::Invalid(errors) => errors,
            ParseError::Config(_) | ParseError::HelpRequested(_) => &[],
        }
    }
}

fn render_lines(errors: &[ArgumentError]) -> String {
    errors.iter().map(|error| format!("{error}\n")).collect()
}
