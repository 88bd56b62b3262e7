//! `qflags` is a simple, cross-platform command line parser.
//!
//! The Api is built around *argument descriptors*.
//! The program owns each descriptor (ex: a [`Flag`] or a [`StringOption`]), registers it with a [`Parser`], and then reads the parsed value back out of the descriptor once parsing finishes.
//! The parser only ever borrows the descriptors; it never stores command line data of its own.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("bin/example.rs")]
//! ```
//!
//! ```console
//! $ qflags-example
//! 'foo' is 'false'
//! 'bar' is ''
//!
//! $ qflags-example --foo --bar=hello
//! 'foo' is 'true'
//! 'bar' is 'hello'
//!
//! $ qflags-example --baz
//! Unknown option '--baz'.
//! ```
//!
//! # Descriptors
//! * [`Flag`]: a boolean, `true` when present (ex: `--verbose`).
//! * [`RepeatedFlag`]: counts how many times it is present (ex: `-vvv`).
//! * [`StringOption`]: consumes a single value (ex: `--name value`).
//! * [`IntegerOption`]: consumes a single value, converted to `i64`.
//! * [`ChoiceOption`]: consumes a single value from a fixed set of choices.
//! * [`RepeatedOption`]: consumes a value each time it is present.
//! * [`PositionalArguments`]: collects every token that isn't an option.
//!
//! Custom descriptors may be written by implementing [`Argument`].
//!
//! # Cli Semantics
//! * Options are matched based off the `--NAME` (or short name `-N`) specifier.
//! Names must match exactly; there is no abbreviation matching.
//! * An option that takes a value consumes the token that follows it, even when that token starts with `-`.
//! For example, `--bar -x` sets `bar` to `-x`.
//! * The value may also be separated with the `=` character.
//! Only the first `=` character is used as a separator.
//! For example, `--key=123=456` is equivalent to `--key 123=456`.
//! * Multiple short named options may be combined into a single token.
//! For example, `-abc` is equivalent to `-a -b -c`.
//! Only the final option in the group may take a value (ex: `-abc=123` or `-abc 123`).
//! * A bare `--` ends option parsing; every token after it is positional.
//! * A bare `-` is positional.
//! * Unless a descriptor is repeatable, specifying it more than once is an error.
//!
//! Parsing happens in two phases:
//! 1. Token matching aligns the tokens to descriptors.
//! All tokens must be matched successfully in order to proceed to the next phase.
//! 2. Value capturing converts the tokens for their respective descriptors.
//! This phase is the only one that modifies the descriptors.
//!
//! Both phases report *every* error they find, not only the first.
//!
//! # Features
//! * `tracing_debug`: emit `tracing` debug events while parsing.
#![deny(missing_docs)]
mod api;
mod command_line;
mod constant;
mod error;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use command_line::CommandLine;
pub use model::*;
pub use error::*;
pub use parser::Parser;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
