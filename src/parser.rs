mod base;
mod printer;

pub use base::Parser;
pub(crate) use printer::Printer;
