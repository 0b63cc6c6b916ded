// Line decomposition and reassembly
// Text is split on LF or CRLF; the newline style and trailing newline are
// kept as metadata so the original layout can be rebuilt.

use std::fmt;

/// Line terminator convention of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineStyle {
    /// Unix format (\n)
    #[default]
    Lf,
    /// Windows format (\r\n)
    Crlf,
}

impl NewlineStyle {
    /// Detect the style of a text block. Any CRLF wins for the whole text.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::Crlf
        } else {
            Self::Lf
        }
    }

    /// Terminator string for this style
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for NewlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lf => write!(f, "LF"),
            Self::Crlf => write!(f, "CRLF"),
        }
    }
}

/// A text block broken into lines plus the facts needed to rebuild it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitText {
    pub lines: Vec<String>,
    pub style: NewlineStyle,
    pub trailing_newline: bool,
}

impl SplitText {
    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when there are no lines. [`decompose`] always yields at least
    /// one, but the fields are public and a hand-built value may have none.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rebuild the text with this block's own style and trailing flag
    pub fn recompose(&self) -> String {
        recompose(&self.lines, self.style, self.trailing_newline)
    }
}

/// Split text into lines, detecting newline style and trailing newline.
///
/// Empty text is a single empty line. A trailing terminator is recorded in
/// `trailing_newline` and does not produce an extra empty line. A CR that is
/// not followed by LF stays part of the line.
pub fn decompose(text: &str) -> SplitText {
    let style = NewlineStyle::detect(text);

    let (body, trailing_newline) = match text.strip_suffix('\n') {
        Some(rest) => (rest.strip_suffix('\r').unwrap_or(rest), true),
        None => (text, false),
    };

    let mut lines: Vec<String> = body.split('\n').map(str::to_string).collect();

    // Every piece except the last was followed by LF
    let last = lines.len() - 1;
    for line in &mut lines[..last] {
        if line.ends_with('\r') {
            line.pop();
        }
    }

    SplitText {
        lines,
        style,
        trailing_newline,
    }
}

/// Join lines with the given style, appending a terminator if requested.
/// No lines always yields the empty string.
pub fn recompose<S: AsRef<str>>(lines: &[S], style: NewlineStyle, trailing_newline: bool) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let terminator = style.as_str();
    let mut text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(terminator);

    if trailing_newline {
        text.push_str(terminator);
    }

    text
}
