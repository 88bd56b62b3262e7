use crate::api::ArgumentConfig;
use crate::model::ArgumentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Arity {
    Zero,
    One,
}

impl From<ArgumentKind> for Arity {
    fn from(value: ArgumentKind) -> Self {
        if value.takes_value() {
            Arity::One
        } else {
            Arity::Zero
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct OptionConfig {
    name: String,
    short: Option<char>,
    arity: Arity,
    repeatable: bool,
    required: bool,
}

impl OptionConfig {
    #[cfg(test)]
    pub(crate) fn new(name: impl Into<String>, short: Option<char>, arity: Arity) -> Self {
        Self {
            name: name.into(),
            short,
            arity,
            repeatable: false,
            required: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn repeatable(mut self) -> Self {
        self.repeatable = true;
        self
    }

    #[cfg(test)]
    pub(crate) fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.short
    }

    pub(crate) fn arity(&self) -> Arity {
        self.arity
    }

    pub(crate) fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub(crate) fn is_required(&self) -> bool {
        self.required
    }
}

impl From<&ArgumentConfig> for OptionConfig {
    fn from(value: &ArgumentConfig) -> Self {
        Self {
            name: value.name().to_string(),
            short: value.short(),
            arity: Arity::from(value.kind()),
            repeatable: value.is_repeatable(),
            required: value.is_required(),
        }
    }
}

/// The tokens matched to a single occurrence of a descriptor.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct MatchTokens {
    pub name: String,
    pub values: Vec<String>,
}

impl MatchTokens {
    pub(crate) fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Matches {
    pub values: Vec<MatchTokens>,
}

impl Matches {
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|mt| mt.name == name)
    }
}
