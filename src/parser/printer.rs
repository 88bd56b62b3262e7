use terminal_size::{terminal_size, Width};

use crate::api::ArgumentConfig;
use crate::model::ArgumentKind;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) struct Printer {
    options: Vec<ArgumentConfig>,
    positional: Option<ArgumentConfig>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), None)
    }

    pub(crate) fn terminal(configs: Vec<ArgumentConfig>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(configs, terminal_width)
    }

    pub(crate) fn new(configs: Vec<ArgumentConfig>, terminal_width: Option<usize>) -> Self {
        let mut options = Vec::default();
        let mut positional = None;

        for config in configs.into_iter() {
            match config.kind() {
                ArgumentKind::Positional => {
                    positional.replace(config);
                }
                ArgumentKind::Flag | ArgumentKind::Option => options.push(config),
            }
        }

        Self {
            options,
            positional,
            terminal_width,
        }
    }

    /// Render the usage text, terminated by a newline.
    pub(crate) fn render(&self, program: &str) -> String {
        let mut summary = vec![format!("usage: {program}")];
        let mut rows: Vec<(String, String)> = Vec::default();

        for config in &self.options {
            let grammar = if config.kind().takes_value() {
                format!(" {}", config.placeholder())
            } else {
                "".to_string()
            };
            let repeat = if config.is_repeatable() { " ..." } else { "" };
            let specifier = match config.short() {
                Some(s) => format!("-{s}{grammar}{repeat}"),
                None => format!("--{n}{grammar}{repeat}", n = config.name()),
            };

            if config.is_required() {
                summary.push(specifier);
            } else {
                summary.push(format!("[{specifier}]"));
            }

            let option_flags = match config.short() {
                Some(s) => format!("-{s}{grammar}, --{n}{grammar}", n = config.name()),
                None => format!("--{n}{grammar}", n = config.name()),
            };
            rows.push((option_flags, describe(config)));
        }

        let positional_row = self.positional.as_ref().map(|config| {
            let grammar = format!("{} ...", config.placeholder());
            summary.push(format!("[{grammar}]"));
            (grammar, describe(config))
        });

        let left_width = rows
            .iter()
            .chain(positional_row.iter())
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        let middle_width = match self.terminal_width {
            Some(tw) => std::cmp::max(
                tw.saturating_sub(MAIN_INDENT + left_width + PADDING_WIDTH),
                MINIMUM_MIDDLE_WIDTH,
            ),
            None => usize::MAX,
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Rendering usage with left: {left_width}, middle: {middle_width}, terminal: {:?}.",
                self.terminal_width
            );
        }

        let mut lines = vec![summary.join(" ")];

        if let Some((left, right)) = &positional_row {
            lines.push("".to_string());
            lines.push("positional arguments:".to_string());
            lines.extend(render_row(left, right, left_width, middle_width));
        }

        if !rows.is_empty() {
            lines.push("".to_string());
            lines.push("options:".to_string());

            for (left, right) in &rows {
                lines.extend(render_row(left, right, left_width, middle_width));
            }
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn describe(config: &ArgumentConfig) -> String {
    let choices = match config.allowed_choices() {
        Some(choices) => format!("{{{}}}", choices.join(", ")),
        None => "".to_string(),
    };

    match config.help_message() {
        Some(help) if choices.is_empty() => help.to_string(),
        Some(help) => format!("{choices} {help}"),
        None => choices,
    }
}

fn render_row(left: &str, right: &str, left_width: usize, middle_width: usize) -> Vec<String> {
    let mut lines = Vec::default();

    for (i, segment) in wrap(right, middle_width).into_iter().enumerate() {
        let line = if i == 0 {
            format!(
                "{:indent$}{left:left_width$}{:padding$}{segment}",
                "",
                "",
                indent = MAIN_INDENT,
                padding = PADDING_WIDTH,
            )
        } else {
            format!(
                "{:width$}{segment}",
                "",
                width = MAIN_INDENT + left_width + PADDING_WIDTH,
            )
        };
        lines.push(line.trim_end().to_string());
    }

    lines
}

/// Split `text` into lines no longer than `width`, breaking only on whitespace.
/// A single word longer than `width` is kept whole.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }

        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
