use std::collections::HashMap;

use crate::error::ArgumentError;
use crate::matcher::model::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct TokenMatcher {
    options: HashMap<String, OptionConfig>,
    // Registration order, so the close errors are reported deterministically.
    order: Vec<String>,
    short_options: HashMap<char, String>,
    positional: Option<String>,
    occurrences: HashMap<String, usize>,
    matches: Vec<MatchTokens>,
    pending: Option<String>,
    terminated: bool,
    errors: Vec<ArgumentError>,
}

impl TokenMatcher {
    /// Option names and short names must already be unique.
    pub(crate) fn new(options: Vec<OptionConfig>, positional: Option<String>) -> Self {
        let mut option_map = HashMap::default();
        let mut order = Vec::default();
        let mut short_options = HashMap::default();

        for option_config in options.into_iter() {
            if let Some(short) = option_config.short() {
                short_options.insert(short, option_config.name().to_string());
            }

            order.push(option_config.name().to_string());
            option_map.insert(option_config.name().to_string(), option_config);
        }

        Self {
            options: option_map,
            order,
            short_options,
            positional,
            occurrences: HashMap::default(),
            matches: Vec::default(),
            pending: None,
            terminated: false,
            errors: Vec::default(),
        }
    }

    pub(crate) fn feed(&mut self, token: &str) {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Feeding token '{token}' (pending: {:?}).", self.pending);
        }

        // 0. A value for the previous option, taken verbatim:
        //  --bar -x
        if let Some(name) = self.pending.take() {
            self.matches
                .push(MatchTokens::new(name, vec![token.to_string()]));
            return;
        }

        if self.terminated {
            self.match_positional(token);
            return;
        }

        // 1. The terminator:
        //  --
        // 2. Find a 'long' flag, such as:
        //  --initial
        //  --initial ..
        //  --initial=..
        // 3. Find 'short' flag(s), such as (both -i and -v are example short flags):
        //  -i
        //  -i ..
        //  -i=..
        //  -vi ..
        //  -vi=..
        // 4. Match against the positional arguments (including a lone '-').
        if token == "--" {
            self.terminated = true;
        } else if let Some(long) = token.strip_prefix("--") {
            self.match_option(split_equals_delimiter(long));
        } else if let Some(short) = token.strip_prefix('-').filter(|s| !s.is_empty()) {
            self.match_option_short(token, split_equals_delimiter(short));
        } else {
            self.match_positional(token);
        }
    }

    fn match_positional(&mut self, token: &str) {
        match &self.positional {
            Some(name) => {
                self.matches
                    .push(MatchTokens::new(name.clone(), vec![token.to_string()]));
            }
            None => {
                self.errors
                    .push(ArgumentError::UnexpectedArgument(token.to_string()));
            }
        }
    }

    fn match_option(&mut self, (option_name, single_value): (&str, Option<&str>)) {
        match self.options.get(option_name).cloned() {
            Some(option_config) => {
                self.occur(&option_config);
                self.open(&option_config, single_value);
            }
            None => {
                self.errors
                    .push(ArgumentError::UnknownOption(option_name.to_string()));
            }
        }
    }

    fn match_option_short(
        &mut self,
        token: &str,
        (short_option_names, single_value): (&str, Option<&str>),
    ) {
        if short_option_names.is_empty() {
            // Ex: '-=value'.
            self.errors
                .push(ArgumentError::UnexpectedArgument(token.to_string()));
            return;
        }

        let length = short_option_names.chars().count();

        for (index, single) in short_option_names.chars().enumerate() {
            let option_config = match self
                .short_options
                .get(&single)
                .and_then(|name| self.options.get(name))
                .cloned()
            {
                Some(option_config) => option_config,
                None => {
                    self.errors.push(ArgumentError::UnknownShortOption(single));
                    continue;
                }
            };

            // If this is the final character from the short option group.
            if index + 1 == length {
                self.occur(&option_config);
                self.open(&option_config, single_value);
            } else if option_config.arity() == Arity::One {
                // All characters in the head of the short option group must be flags.
                self.errors.push(ArgumentError::ValueNotLast {
                    short: single,
                    group: short_option_names.to_string(),
                });
            } else {
                self.occur(&option_config);
                self.matches
                    .push(MatchTokens::new(option_config.name(), Vec::default()));
            }
        }
    }

    fn occur(&mut self, option_config: &OptionConfig) {
        let count = self
            .occurrences
            .entry(option_config.name().to_string())
            .or_insert(0);
        *count += 1;

        // Only report the duplicate once, no matter how many times it is repeated.
        if *count == 2 && !option_config.is_repeatable() {
            self.errors
                .push(ArgumentError::Duplicate(option_config.name().to_string()));
        }
    }

    fn open(&mut self, option_config: &OptionConfig, single_value: Option<&str>) {
        let name = option_config.name().to_string();

        match (option_config.arity(), single_value) {
            (Arity::Zero, None) => {
                self.matches.push(MatchTokens::new(name, Vec::default()));
            }
            (Arity::Zero, Some(value)) => {
                self.errors.push(ArgumentError::UnexpectedValue {
                    name,
                    value: value.to_string(),
                });
            }
            (Arity::One, Some(value)) => {
                self.matches
                    .push(MatchTokens::new(name, vec![value.to_string()]));
            }
            (Arity::One, None) => {
                if self.pending.replace(name).is_some() {
                    unreachable!("internal error - the pending option is expected to be None");
                }
            }
        }
    }

    pub(crate) fn close(mut self) -> Result<Matches, (Vec<ArgumentError>, Matches)> {
        if let Some(name) = self.pending.take() {
            self.errors.push(ArgumentError::MissingValue(name));
        }

        for name in &self.order {
            let option_config = self
                .options
                .get(name)
                .expect("internal error - order must align with the options");

            if option_config.is_required() && !self.occurrences.contains_key(name) {
                self.errors
                    .push(ArgumentError::MissingRequired(name.to_string()));
            }
        }

        let matches = Matches {
            values: self.matches,
        };

        if self.errors.is_empty() {
            Ok(matches)
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Closing with {} error(s).", self.errors.len());
            }

            Err((self.errors, matches))
        }
    }
}

fn split_equals_delimiter(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (token, None),
    }
}
