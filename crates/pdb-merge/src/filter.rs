//! Line filters separating essential configuration from sample data
//!
//! All filters split on `\n` and re-join with `\n`, so line endings and
//! everything not dropped come through byte for byte.

use pdb_core::{classify_insert, is_sample_insert, InsertKind};

fn is_comment_or_blank(line: &str) -> bool {
    line.starts_with("--") || line.trim().is_empty()
}

/// Drop every sample-data `INSERT` line, keep everything else
pub fn strip_sample_inserts(section: &str) -> String {
    section
        .split('\n')
        .filter(|line| !is_sample_insert(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep essential inserts, plus comment and blank lines.
///
/// An essential `INSERT` turns inclusion on, and it stays on for the
/// statement's continuation lines until the next non-essential `INSERT`.
pub fn filter_essential_lines(section: &str) -> String {
    let mut in_essential = false;
    section
        .split('\n')
        .filter(|line| {
            match classify_insert(line) {
                InsertKind::NotInsert => {}
                kind => in_essential = kind.is_essential(),
            }
            in_essential || is_comment_or_blank(line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Keep sample-data `INSERT` lines, plus comment and blank lines
pub fn filter_sample_lines(section: &str) -> String {
    section
        .split('\n')
        .filter(|line| is_sample_insert(line) || is_comment_or_blank(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
