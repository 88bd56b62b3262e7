mod argument;
mod flag;
mod option;
mod positional;

pub use argument::*;
pub use flag::*;
pub use option::*;
pub use positional::*;
