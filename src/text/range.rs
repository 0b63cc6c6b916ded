use std::fmt;

use crate::error::{PatchError, PatchResult};

/// A validated, 1-based, inclusive line range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    from: usize,
    to: usize,
}

impl LineRange {
    /// Validate `from..=to` against a sequence of `len` lines.
    ///
    /// Checks run in order: `from >= 1`, then `to >= from`, then `to <= len`.
    pub fn new(from: usize, to: usize, len: usize) -> PatchResult<Self> {
        if from < 1 {
            return Err(PatchError::invalid_bounds(format!(
                "line numbers start at 1, got from = {from}"
            )));
        }
        if to < from {
            return Err(PatchError::InvalidRangeOrder { from, to });
        }
        if to > len {
            return Err(PatchError::RangeOutOfBounds { len, to });
        }

        Ok(Self { from, to })
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    /// Number of lines covered
    pub fn span(&self) -> usize {
        self.to - self.from + 1
    }

    /// 0-based, half-open index range for slicing
    pub fn as_indices(&self) -> std::ops::Range<usize> {
        self.from - 1..self.to
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Parse a textual line number. Anything that is not a positive integer is
/// reported as `InvalidRangeBounds`.
pub fn parse_line_number(input: &str) -> PatchResult<usize> {
    let trimmed = input.trim();
    match trimmed.parse::<usize>() {
        Ok(0) => Err(PatchError::invalid_bounds(
            "line numbers start at 1, got 0",
        )),
        Ok(n) => Ok(n),
        Err(_) => Err(PatchError::invalid_bounds(format!(
            "'{trimmed}' is not a positive integer"
        ))),
    }
}

/// Replace lines `from..=to` (1-based, inclusive) with `replacement`.
///
/// The input is left untouched. An empty replacement deletes the range and
/// may produce an empty sequence.
pub fn replace<S: AsRef<str>>(
    lines: &[String],
    from: usize,
    to: usize,
    replacement: &[S],
) -> PatchResult<Vec<String>> {
    let range = LineRange::new(from, to, lines.len())?;
    Ok(replace_range(lines, range, replacement))
}

/// Infallible form of [`replace`] for an already validated range
pub fn replace_range<S: AsRef<str>>(
    lines: &[String],
    range: LineRange,
    replacement: &[S],
) -> Vec<String> {
    let indices = range.as_indices();
    let mut result =
        Vec::with_capacity(lines.len() - range.span() + replacement.len());

    result.extend_from_slice(&lines[..indices.start]);
    result.extend(replacement.iter().map(|line| line.as_ref().to_string()));
    result.extend_from_slice(&lines[indices.end..]);

    result
}
