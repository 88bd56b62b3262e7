/// The class of a descriptor, which decides how it is matched on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// `--NAME`: present or absent, never takes a value.
    Flag,
    /// `--NAME VALUE`: takes precisely one value each time it is present.
    Option,
    /// `VALUE`: any token not matched as an option.
    Positional,
}

impl ArgumentKind {
    /// Whether this kind of descriptor takes a value when specified.
    pub fn takes_value(&self) -> bool {
        match self {
            ArgumentKind::Flag => false,
            ArgumentKind::Option | ArgumentKind::Positional => true,
        }
    }
}

impl std::fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ArgumentKind::Flag, false)]
    #[case(ArgumentKind::Option, true)]
    #[case(ArgumentKind::Positional, true)]
    fn takes_value(#[case] kind: ArgumentKind, #[case] expected: bool) {
        assert_eq!(kind.takes_value(), expected);
    }
}
