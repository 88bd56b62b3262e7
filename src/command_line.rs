use std::env;
use std::path::Path;

/// A read-only view over the process argument vector.
///
/// The first element is the program (`argv[0]`), the remainder are the tokens handed to [`Parser::parse`](crate::Parser::parse).
///
/// ### Example
/// ```
/// use qflags::CommandLine;
///
/// let command_line = CommandLine::new(["/usr/bin/program", "--foo", "bar"]);
/// assert_eq!(command_line.program_name(), "program");
/// assert_eq!(command_line.argc(), 3);
/// assert_eq!(command_line.argv(1), Some("--foo"));
/// assert_eq!(command_line.arguments(), &["--foo".to_string(), "bar".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    arguments: Vec<String>,
}

impl CommandLine {
    /// Create a command line from the full argument vector, program included.
    ///
    /// An empty argument vector is allowed; it produces an empty program with no arguments.
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next().unwrap_or_default();

        Self {
            program,
            arguments: argv.collect(),
        }
    }

    /// Create a command line from the current process' arguments.
    ///
    /// Arguments that are not valid unicode are converted lossily.
    pub fn from_env() -> Self {
        Self::new(env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// The program, exactly as given in `argv[0]`.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The final path component of the program.
    pub fn program_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.program)
    }

    /// The tokens after the program.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// The number of elements in the argument vector, program included.
    pub fn argc(&self) -> usize {
        if self.program.is_empty() && self.arguments.is_empty() {
            0
        } else {
            self.arguments.len() + 1
        }
    }

    /// The element at `index` of the argument vector, where `0` is the program.
    pub fn argv(&self, index: usize) -> Option<&str> {
        match index {
            0 if self.argc() > 0 => Some(&self.program),
            0 => None,
            i => self.arguments.get(i - 1).map(String::as_str),
        }
    }
}
