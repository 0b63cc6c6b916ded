use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Lines of context around each hunk
const CONTEXT_RADIUS: usize = 3;

/// Render a unified diff between two versions of the file at `path`.
/// Returns an empty string when the texts are equal.
pub fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let name = path.display().to_string();
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&format!("a/{name}"), &format!("b/{name}"))
        .to_string()
}

/// Count inserted and deleted lines between two texts
pub fn change_counts(old: &str, new: &str) -> (usize, usize) {
    let diff = TextDiff::from_lines(old, new);
    let mut inserted = 0;
    let mut deleted = 0;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => inserted += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }

    (inserted, deleted)
}
