use crate::api::argument::*;
use crate::model::ArgumentKind;

/// Collects every token that is not matched as an option (including all tokens after `--`).
///
/// At most one may be registered on a parser.
/// Without one, a positional token is a parse error.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, Flag, Parser, PositionalArguments};
///
/// let mut force = Flag::new("force");
/// let mut files = PositionalArguments::new("file");
/// Parser::new()
///     .add_argument(&mut force)
///     .add_argument(&mut files)
///     .parse(&CommandLine::new(["rm", "a.txt", "--force", "--", "--b.txt"]))
///     .unwrap();
/// assert!(force.value_boolean());
/// assert_eq!(files.values(), &["a.txt", "--b.txt"]);
/// ```
#[derive(Debug, Clone)]
pub struct PositionalArguments {
    config: ArgumentConfig,
    values: Vec<String>,
}

impl PositionalArguments {
    /// Create a positional arguments collector.
    /// The `name` is only used to describe the arguments in the help message.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            config: ArgumentConfig::new(name, ArgumentKind::Positional).repeatable(),
            values: Vec::default(),
        }
    }

    /// Document the help message.
    /// If repeated, only the final message will apply.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.config.set_help(description.into());
        self
    }

    /// The positional tokens, in command line order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Argument for PositionalArguments {
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
