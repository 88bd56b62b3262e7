use std::collections::{HashMap, HashSet};

use crate::api::{Argument, ArgumentConfig};
use crate::command_line::CommandLine;
use crate::constant::*;
use crate::error::{ArgumentError, ConfigError, ParseError};
use crate::matcher::*;
use crate::model::ArgumentKind;
use crate::parser::Printer;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The command line parser.
///
/// The parser is a registry of borrowed argument descriptors.
/// It holds no command line data of its own; [`Parser::parse`] consumes the parser, which releases the descriptors so their values may be read.
///
/// ### Example
/// ```
/// use qflags::{CommandLine, Flag, Parser, StringOption};
///
/// let command_line = CommandLine::new(["program", "--foo", "--bar", "hello"]);
/// let mut foo = Flag::new("foo");
/// let mut bar = StringOption::new("bar");
///
/// Parser::new()
///     .add_argument(&mut foo)
///     .add_argument(&mut bar)
///     .parse(&command_line)
///     .unwrap();
///
/// assert!(foo.value_boolean());
/// assert_eq!(bar.value_string(), "hello");
/// ```
pub struct Parser<'a> {
    // We need a (dyn ..) here in order to put descriptors of varying types under one collection.
    arguments: Vec<&'a mut dyn Argument>,
}

impl<'a> std::fmt::Debug for Parser<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field(
                "arguments",
                &self
                    .arguments
                    .iter()
                    .map(|argument| argument.config().name())
                    .collect::<Vec<&str>>(),
            )
            .finish()
    }
}

impl<'a> Default for Parser<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Parser<'a> {
    /// Create an empty command line parser.
    pub fn new() -> Self {
        Self {
            arguments: Vec::default(),
        }
    }

    /// Register an argument descriptor with the parser.
    ///
    /// The order of registration is the order of the help message.
    /// It does not affect the command line semantics.
    ///
    /// ### Example
    /// ```
    /// use qflags::{CommandLine, IntegerOption, Parser};
    ///
    /// let mut width = IntegerOption::new("width");
    /// let mut height = IntegerOption::new("height");
    /// Parser::new()
    ///     .add_argument(&mut width)
    ///     .add_argument(&mut height)
    ///     .parse(&CommandLine::new(["program", "--height=2", "--width=1"]))
    ///     .unwrap();
    ///
    /// assert_eq!(width.value_integer(), 1);
    /// assert_eq!(height.value_integer(), 2);
    /// ```
    pub fn add_argument<A: Argument + 'a>(mut self, argument: &'a mut A) -> Self {
        self.arguments.push(argument);
        self
    }

    /// The help message for this parser.
    ///
    /// ### Example
    /// ```
    /// use qflags::{Flag, Parser};
    ///
    /// let mut foo = Flag::new("foo").help("Enable foo.");
    /// let parser = Parser::new().add_argument(&mut foo);
    /// assert!(parser.usage("program").starts_with("usage: program [-h] [--foo]\n"));
    /// ```
    pub fn usage(&self, program: &str) -> String {
        Printer::terminal(self.help_configs()).render(program)
    }

    /// Run the parser against the command line.
    ///
    /// Parsing happens in two phases:
    /// 1. Token matching aligns the tokens to the descriptors.
    /// All tokens must be matched successfully in order to proceed to the next phase.
    /// 2. Value capturing converts the tokens for their respective descriptors.
    /// This phase is the only one that modifies the descriptors.
    ///
    /// Every problem found during a phase is reported via [`ParseError::Invalid`].
    /// When the error comes from phase #2, descriptors that captured before the failing one keep their new values.
    /// A descriptor whose value was rejected keeps its prior value and is not set.
    ///
    /// If the help flag (`-h` or `--help`) is encountered, returns [`ParseError::HelpRequested`] with the help message.
    /// This skips the phase #2 capturing.
    /// The help flag is only available when no descriptor uses the name `help`; its short name only when no descriptor uses `h`.
    ///
    /// Configuration problems (ex: a repeated name) are reported via [`ParseError::Config`] before any token is looked at.
    pub fn parse(self, command_line: &CommandLine) -> Result<(), ParseError> {
        let configs: Vec<ArgumentConfig> = self
            .arguments
            .iter()
            .map(|argument| argument.config().clone())
            .collect();
        validate(&configs)?;
        let help = builtin_help(&configs);
        let help_enabled = help.is_some();

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Parsing {} token(s) against {} descriptor(s) (help: {help_enabled}).",
                command_line.arguments().len(),
                configs.len()
            );
        }

        // 1. Feed the raw token strings to the matcher.
        let mut option_configs: Vec<OptionConfig> = help.iter().map(OptionConfig::from).collect();
        let mut positional = None;

        for config in &configs {
            match config.kind() {
                ArgumentKind::Positional => {
                    positional.replace(config.name().to_string());
                }
                ArgumentKind::Flag | ArgumentKind::Option => {
                    option_configs.push(OptionConfig::from(config));
                }
            }
        }

        let mut token_matcher = TokenMatcher::new(option_configs, positional);

        for token in command_line.arguments() {
            token_matcher.feed(token);
        }

        let matches = match token_matcher.close() {
            Ok(matches) | Err((_, matches)) if help_enabled && matches.contains(HELP_NAME) => {
                return Err(ParseError::HelpRequested(
                    Printer::terminal(self.help_configs()).render(command_line.program_name()),
                ));
            }
            Ok(matches) => matches,
            Err((errors, _)) => {
                return Err(ParseError::Invalid(errors));
            }
        };

        // 2. Capture the matched values, still as raw strings, into their descriptors.
        let Parser { mut arguments } = self;
        let indices: HashMap<&str, usize> = configs
            .iter()
            .enumerate()
            .map(|(i, config)| (config.name(), i))
            .collect();
        let mut errors = Vec::default();

        for MatchTokens { name, values } in matches.values {
            let index = *indices
                .get(name.as_str())
                .expect("internal error - mismatch between matches and arguments");
            let argument = &mut arguments[index];
            // Let the descriptor know it has been matched.
            // Some descriptors (ex: flags) are set based off the fact they were simply matched.
            argument.matched();

            for value in &values {
                if let Err(capture) = argument.capture(value) {
                    errors.push(ArgumentError::InvalidValue {
                        name: name.clone(),
                        capture,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ParseError::Invalid(errors))
        }
    }

    /// Run the parser against the current process' arguments.
    /// See [`Parser::parse`].
    pub fn parse_env(self) -> Result<(), ParseError> {
        self.parse(&CommandLine::from_env())
    }

    fn help_configs(&self) -> Vec<ArgumentConfig> {
        let configs: Vec<ArgumentConfig> = self
            .arguments
            .iter()
            .map(|argument| argument.config().clone())
            .collect();
        builtin_help(&configs).into_iter().chain(configs).collect()
    }
}

fn builtin_help(configs: &[ArgumentConfig]) -> Option<ArgumentConfig> {
    if configs.iter().any(|config| config.name() == HELP_NAME) {
        None
    } else if configs
        .iter()
        .any(|config| config.short() == Some(HELP_SHORT))
    {
        Some(ArgumentConfig::builtin_help(None))
    } else {
        Some(ArgumentConfig::builtin_help(Some(HELP_SHORT)))
    }
}

fn validate(configs: &[ArgumentConfig]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();
    let mut shorts = HashSet::new();
    let mut positional: Option<&str> = None;

    for config in configs {
        let name = config.name();

        if name.is_empty()
            || name.starts_with('-')
            || name.contains('=')
            || name.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::InvalidName(name.to_string()));
        }

        if !names.insert(name) {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }

        if let Some(short) = config.short() {
            if !short.is_alphanumeric() {
                return Err(ConfigError::InvalidShortName {
                    name: name.to_string(),
                    short,
                });
            }

            if !shorts.insert(short) {
                return Err(ConfigError::DuplicateShortName(short));
            }
        }

        if config.kind() == ArgumentKind::Positional && positional.replace(name).is_some() {
            return Err(ConfigError::MultiplePositionals(name.to_string()));
        }

        if let Some(choices) = config.allowed_choices() {
            if choices.is_empty() {
                return Err(ConfigError::EmptyChoices(name.to_string()));
            }

            if let Some(default) = config.default() {
                if !choices.iter().any(|choice| choice == default) {
                    return Err(ConfigError::InvalidDefault {
                        name: name.to_string(),
                        value: default.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test::Recorder;
    use super::*;
    use crate::api::*;
    use crate::test::assert_contains;
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use rstest::rstest;

    fn command_line(tokens: &[&str]) -> CommandLine {
        CommandLine::new(std::iter::once("program").chain(tokens.iter().copied()))
    }

    #[test]
    fn parser_empty() {
        // Setup
        let parser = Parser::new();

        // Execute
        let result = parser.parse(&command_line(&[]));

        // Verify
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn parser_empty_command_line() {
        // Setup
        let mut foo = Flag::new("foo");
        let parser = Parser::new().add_argument(&mut foo);

        // Execute
        let result = parser.parse(&CommandLine::new(Vec::<String>::new()));

        // Verify
        assert_eq!(result, Ok(()));
        assert!(!foo.value_boolean());
    }

    #[rstest]
    #[case(vec![], false, "")]
    #[case(vec!["--foo"], true, "")]
    #[case(vec!["--bar=hello"], false, "hello")]
    #[case(vec!["--bar", "hello"], false, "hello")]
    #[case(vec!["--bar", "hello", "--foo"], true, "hello")]
    #[case(vec!["--foo", "--bar", "--foo"], true, "--foo")]
    #[case(vec!["--bar="], false, "")]
    fn parser_foo_bar(
        #[case] tokens: Vec<&str>,
        #[case] expected_foo: bool,
        #[case] expected_bar: &str,
    ) {
        // Setup
        let mut foo = Flag::new("foo");
        let mut bar = StringOption::new("bar");
        let parser = Parser::new().add_argument(&mut foo).add_argument(&mut bar);

        // Execute
        parser.parse(&command_line(&tokens)).unwrap();

        // Verify
        assert_eq!(foo.value_boolean(), expected_foo);
        assert_eq!(bar.value_string(), expected_bar);
    }

    #[test]
    fn parser_every_descriptor() {
        // Setup
        let mut force = Flag::new("force").short_name('f');
        let mut verbose = RepeatedFlag::new("verbose").short_name('v');
        let mut name = StringOption::new("name").default_value("anonymous");
        let mut jobs = IntegerOption::new("jobs").short_name('j');
        let mut mode = ChoiceOption::new("mode", ["fast", "slow"]).default_value("slow");
        let mut include = RepeatedOption::new("include").short_name('I');
        let mut files = PositionalArguments::new("file");
        let parser = Parser::new()
            .add_argument(&mut force)
            .add_argument(&mut verbose)
            .add_argument(&mut name)
            .add_argument(&mut jobs)
            .add_argument(&mut mode)
            .add_argument(&mut include)
            .add_argument(&mut files);

        // Execute
        parser
            .parse(&command_line(&[
                "a.txt",
                "-vfj",
                "-4",
                "--mode=fast",
                "-I",
                "x",
                "-vI=y",
                "-",
                "--",
                "--name",
            ]))
            .unwrap();

        // Verify
        assert!(force.value_boolean());
        assert_eq!(verbose.count(), 2);
        assert_eq!(name.value_string(), "anonymous");
        assert!(!name.is_set());
        assert_eq!(jobs.value_integer(), -4);
        assert!(jobs.is_set());
        assert_eq!(mode.value_string(), "fast");
        assert_eq!(include.values(), &["x", "y"]);
        assert_eq!(files.values(), &["a.txt", "-", "--name"]);
    }

    #[test]
    fn parser_order_independent() {
        let mut groups: Vec<Vec<&str>> = vec![
            vec!["--foo"],
            vec!["--bar", "x"],
            vec!["-n", "5"],
            vec!["--mode=fast"],
            vec!["-vv"],
        ];

        for _ in 0..50 {
            // Setup
            groups.shuffle(&mut thread_rng());
            let tokens: Vec<&str> = groups.iter().flatten().copied().collect();
            let mut foo = Flag::new("foo");
            let mut bar = StringOption::new("bar");
            let mut number = IntegerOption::new("number").short_name('n');
            let mut mode = ChoiceOption::new("mode", ["fast", "slow"]);
            let mut verbose = RepeatedFlag::new("verbose").short_name('v');
            let parser = Parser::new()
                .add_argument(&mut foo)
                .add_argument(&mut bar)
                .add_argument(&mut number)
                .add_argument(&mut mode)
                .add_argument(&mut verbose);

            // Execute
            parser.parse(&command_line(&tokens)).unwrap();

            // Verify
            assert!(foo.value_boolean(), "{tokens:?}");
            assert_eq!(bar.value_string(), "x", "{tokens:?}");
            assert_eq!(number.value_integer(), 5, "{tokens:?}");
            assert_eq!(mode.value_string(), "fast", "{tokens:?}");
            assert_eq!(verbose.count(), 2, "{tokens:?}");
        }
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    #[case(vec!["--help", "--value", "1"])]
    #[case(vec!["--value", "1", "-h"])]
    #[case(vec!["--help", "--unknown"])]
    #[case(vec!["--value", "reject", "--help"])]
    #[case(vec!["-h", "-h"])]
    fn parser_help(#[case] tokens: Vec<&str>) {
        // Setup
        let mut value = Recorder::option("value");
        let parser = Parser::new().add_argument(&mut value);

        // Execute
        let result = parser.parse(&command_line(&tokens));

        // Verify
        let error = result.unwrap_err();
        assert!(error.is_help());
        assert_contains!(error.to_string(), "usage: program [-h] [--value VALUE]\n");
        assert!(value.untouched());
    }

    #[test]
    fn parser_help_overridden() {
        // Setup
        let mut help = Flag::new("help");
        let parser = Parser::new().add_argument(&mut help);

        // Execute
        let result = parser.parse(&command_line(&["--help"]));

        // Verify
        assert_eq!(result, Ok(()));
        assert!(help.value_boolean());
    }

    #[test]
    fn parser_help_short_overridden() {
        // Setup
        let mut host = StringOption::new("host").short_name('h');
        let parser = Parser::new().add_argument(&mut host);

        // Execute
        let result = parser.parse(&command_line(&["-h", "localhost"]));

        // Verify
        assert_eq!(result, Ok(()));
        assert_eq!(host.value_string(), "localhost");

        let mut host = StringOption::new("host").short_name('h');
        let parser = Parser::new().add_argument(&mut host);
        let error = parser.parse(&command_line(&["--help"])).unwrap_err();
        assert_contains!(error.to_string(), "usage: program [--help] [-h HOST]\n");
    }

    #[rstest]
    #[case(vec!["--baz"], vec![ArgumentError::UnknownOption("baz".to_string())])]
    #[case(vec!["--value"], vec![ArgumentError::MissingValue("value".to_string())])]
    #[case(vec!["x"], vec![ArgumentError::UnexpectedArgument("x".to_string())])]
    #[case(vec!["--value", "1", "--value", "2"], vec![ArgumentError::Duplicate("value".to_string())])]
    #[case(
        vec!["--baz", "x", "--value"],
        vec![
            ArgumentError::UnknownOption("baz".to_string()),
            ArgumentError::UnexpectedArgument("x".to_string()),
            ArgumentError::MissingValue("value".to_string()),
        ]
    )]
    fn parser_match_errors(#[case] tokens: Vec<&str>, #[case] expected: Vec<ArgumentError>) {
        // Setup
        let mut value = Recorder::option("value");
        let parser = Parser::new().add_argument(&mut value);

        // Execute
        let result = parser.parse(&command_line(&tokens));

        // Verify
        assert_eq!(result, Err(ParseError::Invalid(expected)));
        // No descriptor is touched when matching fails.
        assert!(value.untouched());
    }

    #[test]
    fn parser_capture_errors() {
        // Setup
        let mut first = Recorder::option("first");
        let mut count = IntegerOption::new("count");
        let mut mode = ChoiceOption::new("mode", ["a", "b"]);
        let mut last = Recorder::option("last");
        let parser = Parser::new()
            .add_argument(&mut first)
            .add_argument(&mut count)
            .add_argument(&mut mode)
            .add_argument(&mut last);

        // Execute
        let result = parser.parse(&command_line(&[
            "--first", "ok", "--count", "ten", "--mode", "c", "--last", "reject",
        ]));

        // Verify
        let error = result.unwrap_err();
        assert_eq!(
            error.errors(),
            &[
                ArgumentError::InvalidValue {
                    name: "count".to_string(),
                    capture: InvalidCapture::InvalidInteger {
                        value: "ten".to_string()
                    },
                },
                ArgumentError::InvalidValue {
                    name: "mode".to_string(),
                    capture: InvalidCapture::InvalidChoice {
                        value: "c".to_string(),
                        choices: vec!["a".to_string(), "b".to_string()],
                    },
                },
                ArgumentError::InvalidValue {
                    name: "last".to_string(),
                    capture: InvalidCapture::Invalid {
                        value: "reject".to_string(),
                        message: "rejected".to_string(),
                    },
                },
            ]
        );
        assert_eq!(
            error.to_string(),
            "Invalid value for '--count': 'ten' is not a valid integer.\n\
             Invalid value for '--mode': 'c' is not one of {a, b}.\n\
             Invalid value for '--last': 'reject' is invalid: rejected\n"
        );
        assert_eq!(first.captured, vec!["ok".to_string()]);
        assert_eq!(last.matched, 1);
    }

    #[test]
    fn parser_rejected_value_not_set() {
        // Setup
        let mut number = IntegerOption::new("number").short_name('n').default_value(3);
        let mut mode = ChoiceOption::new("mode", ["a", "b"]).default_value("a");
        let parser = Parser::new().add_argument(&mut number).add_argument(&mut mode);

        // Execute
        let result = parser.parse(&command_line(&["-n", "x", "--mode=c"]));

        // Verify
        assert_eq!(result.unwrap_err().errors().len(), 2);
        assert_eq!(number.value_integer(), 3);
        assert!(!number.is_set());
        assert_eq!(mode.value_string(), "a");
        assert!(!mode.is_set());
    }

    #[test]
    fn parser_required() {
        // Setup
        let mut bar = StringOption::new("bar").required();
        let mut foo = Flag::new("foo");
        let parser = Parser::new().add_argument(&mut foo).add_argument(&mut bar);

        // Execute
        let result = parser.parse(&command_line(&["--foo"]));

        // Verify
        assert_eq!(
            result,
            Err(ParseError::Invalid(vec![ArgumentError::MissingRequired(
                "bar".to_string()
            )]))
        );
        assert!(!foo.value_boolean());
    }

    #[rstest]
    #[case(ArgumentConfig::new("", ArgumentKind::Flag))]
    #[case(ArgumentConfig::new("-foo", ArgumentKind::Flag))]
    #[case(ArgumentConfig::new("foo=bar", ArgumentKind::Option))]
    #[case(ArgumentConfig::new("foo bar", ArgumentKind::Option))]
    fn parser_invalid_name(#[case] config: ArgumentConfig) {
        let name = config.name().to_string();
        let mut recorder = Recorder::new(config);
        let result = Parser::new()
            .add_argument(&mut recorder)
            .parse(&command_line(&[]));
        assert_eq!(
            result,
            Err(ParseError::Config(ConfigError::InvalidName(name)))
        );
    }

    #[rstest]
    #[case('-')]
    #[case('=')]
    #[case(' ')]
    fn parser_invalid_short_name(#[case] short: char) {
        let mut foo = Flag::new("foo").short_name(short);
        let result = Parser::new().add_argument(&mut foo).parse(&command_line(&[]));
        assert_matches!(
            result,
            Err(ParseError::Config(ConfigError::InvalidShortName { short: s, .. })) if s == short
        );
    }

    #[test]
    fn parser_duplicate_name() {
        let mut a = Flag::new("foo");
        let mut b = StringOption::new("foo");
        let result = Parser::new()
            .add_argument(&mut a)
            .add_argument(&mut b)
            .parse(&command_line(&[]));
        assert_matches!(result, Err(ParseError::Config(ConfigError::DuplicateName(_))));
    }

    #[test]
    fn parser_duplicate_short_name() {
        let mut a = Flag::new("apple").short_name('a');
        let mut b = Flag::new("avocado").short_name('a');
        let result = Parser::new()
            .add_argument(&mut a)
            .add_argument(&mut b)
            .parse(&command_line(&[]));
        assert_matches!(
            result,
            Err(ParseError::Config(ConfigError::DuplicateShortName('a')))
        );
    }

    #[test]
    fn parser_duplicate_positional() {
        let mut a = PositionalArguments::new("a");
        let mut b = PositionalArguments::new("b");
        let result = Parser::new()
            .add_argument(&mut a)
            .add_argument(&mut b)
            .parse(&command_line(&[]));
        assert_matches!(
            result,
            Err(ParseError::Config(ConfigError::MultiplePositionals(_)))
        );
    }

    #[test]
    fn parser_invalid_choices() {
        let mut mode = ChoiceOption::new("mode", Vec::<String>::new());
        let result = Parser::new().add_argument(&mut mode).parse(&command_line(&[]));
        assert_matches!(result, Err(ParseError::Config(ConfigError::EmptyChoices(_))));

        let mut mode = ChoiceOption::new("mode", ["a", "b"]).default_value("c");
        let result = Parser::new().add_argument(&mut mode).parse(&command_line(&[]));
        assert_matches!(
            result,
            Err(ParseError::Config(ConfigError::InvalidDefault { .. }))
        );
    }

    #[test]
    fn parser_config_error_before_tokens() {
        // Setup
        let mut a = Recorder::option("value");
        let mut b = Recorder::option("value");
        let parser = Parser::new().add_argument(&mut a).add_argument(&mut b);

        // Execute
        let result = parser.parse(&command_line(&["--value", "1", "--help"]));

        // Verify
        assert_matches!(result, Err(ParseError::Config(_)));
        assert!(a.untouched());
        assert!(b.untouched());
    }

    #[test]
    fn parser_usage() {
        let mut foo = Flag::new("foo").help("Enable foo.");
        let mut bar = StringOption::new("bar").short_name('b');
        let parser = Parser::new().add_argument(&mut foo).add_argument(&mut bar);
        let usage = parser.usage("program");
        assert!(usage.starts_with("usage: program [-h] [--foo] [-b BAR]\n"));
        assert_contains!(usage, "Enable foo.");
        assert_contains!(usage, "-b BAR, --bar BAR");
    }

    #[test]
    fn parser_debug() {
        let mut foo = Flag::new("foo");
        let parser = Parser::new().add_argument(&mut foo);
        assert_eq!(format!("{parser:?}"), r#"Parser { arguments: ["foo"] }"#);
    }

    #[test]
    fn builtin_help_config() {
        let config = builtin_help(&[]).unwrap();
        assert_eq!(config.short(), Some(HELP_SHORT));

        let config = builtin_help(&[ArgumentConfig::new("host", ArgumentKind::Option).short_name('h')]).unwrap();
        assert_eq!(config.short(), None);

        assert_eq!(
            builtin_help(&[ArgumentConfig::new(HELP_NAME, ArgumentKind::Flag)]),
            None
        );
    }
}
