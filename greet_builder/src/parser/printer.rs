use terminal_size::{terminal_size, Width};

use crate::model::Kind;
use crate::parser::{placeholder, ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, TokenPosition, TotalWidth};

const MAIN_INDENT: usize = 2;
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionParameter {
    long: Option<String>,
    short: Option<char>,
    kind: Kind,
    help: Option<String>,
    argname: Option<String>,
    required: bool,
    default: Option<String>,
}

impl OptionParameter {
    pub(crate) fn new(
        long: Option<String>,
        short: Option<char>,
        kind: Kind,
        help: Option<String>,
        argname: Option<String>,
        required: bool,
        default: Option<String>,
    ) -> Self {
        Self {
            long,
            short,
            kind,
            help,
            argname,
            required,
            default,
        }
    }

    fn placeholder(&self) -> String {
        placeholder(&self.argname, &self.long)
    }

    /// The usage line form, shown for required options (ex: ` --name <NAME>`).
    fn usage(&self) -> String {
        let flag = match (&self.long, &self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => unreachable!("internal error - option must have a long or short flag"),
        };

        if self.kind.needs_value() {
            format!(" {flag} <{}>", self.placeholder())
        } else {
            format!(" {flag}")
        }
    }

    /// The left column of the option's help row (ex: `-n, --name <NAME>`).
    fn flags(&self) -> String {
        let mut flags = match (&self.short, &self.long) {
            (Some(short), Some(_)) => format!("-{short},"),
            (Some(short), None) => format!("-{short}"),
            // Keep the long flags aligned with those preceded by a short flag.
            (None, _) => "   ".to_string(),
        };

        if let Some(long) = &self.long {
            flags.push_str(&format!(" --{long}"));
        }

        if self.kind.needs_value() {
            flags.push_str(&format!(" <{}>", self.placeholder()));
        }

        flags
    }

    /// The middle column of the option's help row.
    fn description(&self) -> String {
        let note = if self.required {
            Some("[REQUIRED]".to_string())
        } else if self.kind == Kind::Single {
            self.default
                .as_ref()
                .filter(|default| !default.is_empty())
                .map(|default| format!("[default: {default}]"))
        } else {
            None
        };

        [self.help.clone(), note]
            .into_iter()
            .flatten()
            .collect::<Vec<String>>()
            .join(" ")
    }
}

#[derive(Debug)]
pub(crate) struct Printer {
    program: String,
    about: Option<String>,
    version: Option<String>,
    options: Vec<OptionParameter>,
    hint: Option<String>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new("program", None, None, Vec::default(), None, None)
    }

    pub(crate) fn terminal(
        program: impl Into<String>,
        about: Option<String>,
        version: Option<String>,
        options: Vec<OptionParameter>,
        hint: Option<String>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(program, about, version, options, hint, terminal_width)
    }

    pub(crate) fn new(
        program: impl Into<String>,
        about: Option<String>,
        version: Option<String>,
        options: Vec<OptionParameter>,
        hint: Option<String>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            program: program.into(),
            about,
            version,
            options,
            hint,
            terminal_width,
        }
    }

    /// The usage line, listing the required options in declaration order.
    pub(crate) fn usage(&self) -> String {
        let required: String = self
            .options
            .iter()
            .filter(|option| option.required)
            .map(|option| option.usage())
            .collect();

        format!("Usage: {} [OPTIONS]{required}", self.program)
    }

    pub(crate) fn hint(&self) -> Option<String> {
        self.hint.clone()
    }

    /// The version text, which defaults to the program name.
    pub(crate) fn version(&self) -> String {
        self.version.clone().unwrap_or_else(|| self.program.clone())
    }

    pub(crate) fn help(&self) -> String {
        let mut lines = Vec::default();

        if let Some(about) = &self.about {
            lines.push(about.clone());
            lines.push(String::default());
        }

        lines.push(self.usage());

        if !self.options.is_empty() {
            let rows: Vec<(String, String)> = self
                .options
                .iter()
                .map(|option| (option.flags(), option.description()))
                .collect();
            let renderer = self.renderer(&rows);
            lines.push(String::default());
            lines.push("Options:".to_string());

            for (left, middle) in &rows {
                lines.extend(renderer.render(MAIN_INDENT, left, middle));
            }
        }

        lines.join("\n")
    }

    fn renderer(&self, rows: &[(String, String)]) -> ColumnRenderer {
        let left = rows
            .iter()
            .map(|(left, _)| left.chars().count())
            .max()
            .unwrap_or(0);
        let middle = rows
            .iter()
            .map(|(_, middle)| middle.chars().count())
            .max()
            .unwrap_or(0);
        let padding = PaddingWidth::new(COLUMN_PADDING)
            .unwrap_or_else(|_| unreachable!("internal error - padding must be valid"));
        let left = LeftWidth::new(std::cmp::max(left, 1))
            .unwrap_or_else(|_| unreachable!("internal error - left width must be valid"));
        let middle = MiddleWidth::new(std::cmp::max(middle, 2))
            .unwrap_or_else(|_| unreachable!("internal error - middle width must be valid"));

        match self.terminal_width {
            Some(total) => ColumnRenderer::guided(MAIN_INDENT, padding, left, middle, TotalWidth(total)),
            None => ColumnRenderer::new(padding, left, middle),
        }
    }
}

/// The command line, with a caret under the place where parsing failed.
///
/// ### Example
/// ```text
/// --name Neely --age abc
///                    ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    projection: String,
    caret: usize,
}

impl ErrorContext {
    pub(crate) fn new(position: TokenPosition, tokens: &[&str]) -> Self {
        let preceding: usize = tokens
            .iter()
            .take(position.index)
            .map(|token| token.chars().count() + 1)
            .sum();
        let within = tokens
            .get(position.index)
            .map(|token| token.get(..position.offset).unwrap_or(*token).chars().count())
            .unwrap_or(0);

        Self {
            projection: tokens.join(" "),
            caret: preceding + within,
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{:width$}^", self.projection, "", width = self.caret)
    }
}
