use std::str::FromStr;

use crate::api::argument::*;
use crate::model::ArgumentKind;

/// A descriptor taking a single string value.
///
/// ### Example
/// ```
/// use qflags::{Argument, CommandLine, Parser, StringOption};
///
/// let mut name = StringOption::new("name").default_value("anonymous");
/// let mut greeting = StringOption::new("greeting");
/// Parser::new()
///     .add_argument(&mut name)
///     .add_argument(&mut greeting)
///     .parse(&CommandLine::new(["program", "--greeting", "hello"]))
///     .unwrap();
/// assert_eq!(name.value_string(), "anonymous");
/// assert!(!name.is_set());
/// assert_eq!(greeting.value_string(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct StringOption {
    config: ArgumentConfig,
    value: String,
    set: bool,
}

impl StringOption {
    /// Create a string option, specified as `--name VALUE`.
    /// Its value is empty unless specified or given a default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Option),
            value: String::default(),
            set: false,
        }
    }

    /// Set the value used when the option is not specified.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.config.set_default(self.value.clone());
        self
    }

    /// The specified value, otherwise the default.
    pub fn value_string(&self) -> &str {
        &self.value
    }
}

descriptor_builder!(StringOption);
value_builder!(StringOption);

impl Argument for StringOption {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        // Set once a value is captured.
    }

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.value = value.to_string();
        self.set = true;
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.set
    }
}

/// A descriptor taking a single integer value.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, IntegerOption, Parser};
///
/// let mut jobs = IntegerOption::new("jobs").short_name('j').default_value(1);
/// Parser::new()
///     .add_argument(&mut jobs)
///     .parse(&CommandLine::new(["program", "-j", "8"]))
///     .unwrap();
/// assert_eq!(jobs.value_integer(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct IntegerOption {
    config: ArgumentConfig,
    value: i64,
    set: bool,
}

impl IntegerOption {
    /// Create an integer option, specified as `--name VALUE`.
    /// Its value is `0` unless specified or given a default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Option),
            value: 0,
            set: false,
        }
    }

    /// Set the value used when the option is not specified.
    pub fn default_value(mut self, value: i64) -> Self {
        self.value = value;
        self.config.set_default(value.to_string());
        self
    }

    /// The specified value, otherwise the default.
    pub fn value_integer(&self) -> i64 {
        self.value
    }
}

descriptor_builder!(IntegerOption);
value_builder!(IntegerOption);

impl Argument for IntegerOption {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        // Set once a value is captured.
    }

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.value = i64::from_str(value).map_err(|_| InvalidCapture::InvalidInteger {
            value: value.to_string(),
        })?;
        self.set = true;
        Ok(())
    }

    fn is_set(&self) -> bool {
        self.set
    }
}

/// A descriptor taking a single value from a fixed set of choices.
///
/// ### Example
/// ```
/// use qflags::{ChoiceOption, CommandLine, Parser};
///
/// let mut mode = ChoiceOption::new("mode", ["fast", "slow"]).default_value("slow");
/// Parser::new()
///     .add_argument(&mut mode)
///     .parse(&CommandLine::new(["program", "--mode=fast"]))
///     .unwrap();
/// assert_eq!(mode.value_string(), "fast");
/// ```
#[derive(Debug, Clone)]
pub struct ChoiceOption {
    config: ArgumentConfig,
    value: String,
    set: bool,
}

impl ChoiceOption {
    /// Create a choice option, specified as `--name VALUE` where `VALUE` must be one of `choices`.
    /// Its value is empty unless specified or given a default.
    pub fn new<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Option).choices(choices),
            value: String::default(),
            set: false,
        }
    }

    /// Set the value used when the option is not specified.
    /// The default must be one of the choices, which is checked when parsing.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.config.set_default(self.value.clone());
        self
    }

    /// The specified value, otherwise the default.
    pub fn value_string(&self) -> &str {
        &self.value
    }

    /// The allowed values.
    pub fn choices(&self) -> &[String] {
        self.config.allowed_choices().unwrap_or_default()
    }
}

descriptor_builder!(ChoiceOption);
value_builder!(ChoiceOption);

impl Argument for ChoiceOption {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        // Set once a value is captured.
    }

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        if self.choices().iter().any(|choice| choice == value) {
            self.value = value.to_string();
            self.set = true;
            Ok(())
        } else {
            Err(InvalidCapture::InvalidChoice {
                value: value.to_string(),
                choices: self.choices().to_vec(),
            })
        }
    }

    fn is_set(&self) -> bool {
        self.set
    }
}

/// A descriptor taking a value each time it is specified.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, Parser, RepeatedOption};
///
/// let mut includes = RepeatedOption::new("include").short_name('I');
/// Parser::new()
///     .add_argument(&mut includes)
///     .parse(&CommandLine::new(["program", "-I", "a", "--include=b", "-I=c"]))
///     .unwrap();
/// assert_eq!(includes.values(), &["a", "b", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct RepeatedOption {
    config: ArgumentConfig,
    values: Vec<String>,
}

impl RepeatedOption {
    /// Create a repeated option, specified as `--name VALUE`, any number of times.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Option).repeatable(),
            values: Vec::default(),
        }
    }

    /// The specified values, in command line order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

descriptor_builder!(RepeatedOption);
value_builder!(RepeatedOption);

impl Argument for RepeatedOption {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        // Do nothing.
    }

    fn capture(&mut self, value: &str) -> Result<(), InvalidCapture> {
        self.values.push(value.to_string());
        Ok(())
    }

    fn is_set(&self) -> bool {
        !self.values.is_empty()
    }
}
