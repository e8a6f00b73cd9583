use crate::parser::{ErrorContext, ParseError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub usize);

/// Renders a two column table: the flags on the left, and the wrapped description in the middle.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(
        indent: usize,
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        let non_middle: usize = indent + left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} and middle fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle = std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fits within the total {}.  Selecting middle: {calculated_middle}.", total_width.0);
            }

            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} do not fit within the total {}.  Selecting middle: {MINIMUM_MIDDLE_WIDTH}.", total_width.0);
            }

            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = format!("{:width$}", "", width = self.padding.0);
        let left_column_width = self.left.0;
        assert!(left.chars().count() <= left_column_width);
        let middle_parts = chunk(middle, self.middle.0);

        if middle_parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        middle_parts
            .iter()
            .enumerate()
            .map(|(i, part)| {
                let label = if i == 0 { left } else { "" };
                format!("{:indent$}{:left_column_width$}{padding}{part}", "", label)
            })
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.chars().count() + word.chars().count() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let part: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{part}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ParseError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ParseError) {
        eprintln!("error: {error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}
