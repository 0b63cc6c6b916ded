//! Line-range replacement applied to text and files.
//!
//! [`patch_text`] is the pure core: decompose, replace, recompose with the
//! target's own newline style and trailing newline. The `file` submodule
//! wraps it with a read and a write that is skipped when nothing changed.

use std::borrow::Cow;

use crate::encoding::TextEncoding;
use crate::error::PatchResult;
use crate::text::{decompose, recompose, replace_range, LineRange};

pub mod file;

pub use file::{
    apply_range_replacement, apply_range_replacement_sync, plan_range_replacement,
    plan_range_replacement_sync, PatchPlan,
};

/// New content for a line range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// A block of text, split with the same rules as file content. Its own
    /// newline style and trailing newline are discarded.
    Text(String),
    /// Lines without terminators
    Lines(Vec<String>),
}

impl Replacement {
    /// The replacement as a line sequence
    pub fn lines(&self) -> Cow<'_, [String]> {
        match self {
            Replacement::Text(text) => Cow::Owned(decompose(text).lines),
            Replacement::Lines(lines) => Cow::Borrowed(lines),
        }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Replacement::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Replacement::Text(text)
    }
}

impl From<Vec<String>> for Replacement {
    fn from(lines: Vec<String>) -> Self {
        Replacement::Lines(lines)
    }
}

impl From<Vec<&str>> for Replacement {
    fn from(lines: Vec<&str>) -> Self {
        Replacement::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

/// Options for file patching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Encoding used to read and write the file. Does not affect line splitting.
    pub encoding: TextEncoding,
}

impl PatchOptions {
    /// Options with the encoding named by `label`
    pub fn with_encoding_label(label: &str) -> PatchResult<Self> {
        Ok(Self {
            encoding: TextEncoding::for_label(label)?,
        })
    }
}

/// What a successful patch did to the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// New content was written
    Written,
    /// Content was identical; no write was issued
    Unchanged,
}

/// Replace lines `from..=to` of `original` and return the new text.
///
/// The result keeps the newline style and trailing newline detected in
/// `original`, whatever style the replacement text used.
pub fn patch_text(
    original: &str,
    from: usize,
    to: usize,
    replacement: &Replacement,
) -> PatchResult<String> {
    let target = decompose(original);
    let range = LineRange::new(from, to, target.len())?;
    let replacement_lines = replacement.lines();
    let lines = replace_range(&target.lines, range, &*replacement_lines);

    Ok(recompose(&lines, target.style, target.trailing_newline))
}
