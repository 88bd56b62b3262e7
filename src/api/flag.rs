use crate::api::argument::*;
use crate::model::ArgumentKind;

/// A boolean descriptor: `false` unless specified on the command line.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, Flag, Parser};
///
/// let mut verbose = Flag::new("verbose").short_name('v');
/// Parser::new()
///     .add_argument(&mut verbose)
///     .parse(&CommandLine::new(["program", "-v"]))
///     .unwrap();
/// assert!(verbose.value_boolean());
/// ```
#[derive(Debug, Clone)]
pub struct Flag {
    config: ArgumentConfig,
    value: bool,
}

impl Flag {
    /// Create a flag, specified as `--name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Flag),
            value: false,
        }
    }

    /// Whether the flag was specified.
    pub fn value_boolean(&self) -> bool {
        self.value
    }
}

descriptor_builder!(Flag);

impl Argument for Flag {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        self.value = true;
    }

    fn capture(&mut self, _value: &str) -> Result<(), InvalidCapture> {
        unreachable!("internal error - must not capture on a Flag");
    }

    fn is_set(&self) -> bool {
        self.value
    }
}

/// A flag that may be specified many times, counting its occurrences.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, Parser, RepeatedFlag};
///
/// let mut verbosity = RepeatedFlag::new("verbose").short_name('v');
/// Parser::new()
///     .add_argument(&mut verbosity)
///     .parse(&CommandLine::new(["program", "-vv", "--verbose"]))
///     .unwrap();
/// assert_eq!(verbosity.count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct RepeatedFlag {
    config: ArgumentConfig,
    count: usize,
}

impl RepeatedFlag {
    /// Create a repeated flag, specified as `--name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Flag).repeatable(),
            count: 0,
        }
    }

    /// The number of times the flag was specified.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the flag was specified at least once.
    pub fn value_boolean(&self) -> bool {
        self.count > 0
    }
}

descriptor_builder!(RepeatedFlag);

impl Argument for RepeatedFlag {
    fn config(&self) -> &ArgumentConfig {
        &self.config
    }

    fn matched(&mut self) {
        self.count += 1;
    }

    fn capture(&mut self, _value: &str) -> Result<(), InvalidCapture> {
        unreachable!("internal error - must not capture on a RepeatedFlag");
    }

    fn is_set(&self) -> bool {
        self.count > 0
    }
}
