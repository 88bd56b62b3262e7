use std::io::{self, Write};

use qflags::{CommandLine, Flag, Parser, StringOption};

fn run(command_line: &CommandLine, out: &mut impl Write) -> io::Result<()> {
    let mut foo = Flag::new("foo").help("Enable foo.");
    let mut bar = StringOption::new("bar").help("The bar value.");

    let result = Parser::new()
        .add_argument(&mut foo)
        .add_argument(&mut bar)
        .parse(command_line);

    match result {
        Ok(()) => {
            writeln!(out, "'foo' is '{}'", foo.value_boolean())?;
            writeln!(out, "'bar' is '{}'", bar.value_string())?;
        }
        // Help requests and errors alike are shown verbatim.
        Err(error) => {
            write!(out, "{error}")?;
        }
    }

    out.flush()
}

fn main() {
    #[cfg(feature = "tracing_debug")]
    {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let command_line = CommandLine::from_env();

    // The exit status is 0 even when the command line is invalid.
    if let Err(error) = run(&command_line, &mut io::stdout().lock()) {
        eprintln!("{error}");
    }
}
