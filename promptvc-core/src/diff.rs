//! # Line comparison
//!
//! Positional, line-by-line comparison of two prompt contents.
//!
//! Lines are matched by index only: line `i` of one side is compared with line `i`
//! of the other. Inserting a line near the top therefore reports every following
//! line as modified. Callers rely on this exact output, so it must not be
//! replaced by an alignment-based diff.

use serde::Serialize;

/// Lines that differ between two contents, each list in ascending line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

impl LineChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}

/// Compares `from` and `to` line by line.
///
/// Both contents are split on `'\n'`. Line numbers in the descriptions are 1-based.
///
/// # Examples
///
/// ```rust
/// use promptvc_core::diff::compare_lines;
///
/// let changes = compare_lines("Line 1\nLine 2", "Line 1 modified\nLine 2\nLine 3");
/// assert_eq!(changes.modified, vec!["Line 1: \"Line 1\" → \"Line 1 modified\""]);
/// assert_eq!(changes.added, vec!["Line 3: Line 3"]);
/// assert!(changes.removed.is_empty());
/// ```
pub fn compare_lines(from: &str, to: &str) -> LineChanges {
    let from_lines: Vec<&str> = from.split('\n').collect();
    let to_lines: Vec<&str> = to.split('\n').collect();
    let mut changes = LineChanges::default();

    for i in 0..from_lines.len().max(to_lines.len()) {
        let line_number = i + 1;
        match (from_lines.get(i), to_lines.get(i)) {
            (None, Some(added)) => changes.added.push(format!("Line {}: {}", line_number, added)),
            (Some(removed), None) => {
                changes.removed.push(format!("Line {}: {}", line_number, removed))
            }
            (Some(before), Some(after)) if before != after => changes
                .modified
                .push(format!("Line {}: \"{}\" → \"{}\"", line_number, before, after)),
            _ => {}
        }
    }

    changes
}
