//! Positional line diff and diff-line classification.
//!
//! `unified_diff` aligns the two texts strictly by line index. It does not
//! search for a minimal edit script: one inserted line shifts every later
//! index, so all following lines come out as `-`/`+` pairs even when they
//! would otherwise match. Downstream output (and the self-test oracle) depends
//! on exactly this behaviour.

use crate::types::{DiffLine, DiffLineKind};

/// Produces diff text for `old` → `new`.
///
/// The first line is always `@@ -1,<old_count> +1,<new_count> @@`. No
/// `---`/`+++` file headers are emitted, so any line starting with `+` or `-`
/// is a real body line. Every line, header included, ends with `'\n'`.
///
/// Splitting the empty string yields one empty line, so `("", "")` produces
/// the header `@@ -1,1 +1,1 @@` followed by a single blank context line.
pub fn unified_diff(old: &str, new: &str) -> String {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let max = old_lines.len().max(new_lines.len());

    let mut out = format!("@@ -1,{} +1,{} @@\n", old_lines.len(), new_lines.len());
    for i in 0..max {
        let a = old_lines.get(i).copied().unwrap_or("");
        let b = new_lines.get(i).copied().unwrap_or("");
        if a == b {
            out.push(' ');
            out.push_str(a);
            out.push('\n');
            continue;
        }
        // Deletion always precedes the addition at the same index.
        if !a.is_empty() {
            out.push('-');
            out.push_str(a);
            out.push('\n');
        }
        if !b.is_empty() {
            out.push('+');
            out.push_str(b);
            out.push('\n');
        }
    }
    out
}

/// Classifies one line of diff text.
///
/// `@@` is checked first so a header is never mistaken for context.
pub fn classify(line: &str) -> DiffLineKind {
    if line.starts_with("@@") {
        DiffLineKind::Meta
    } else if line.starts_with('+') {
        DiffLineKind::Add
    } else if line.starts_with('-') {
        DiffLineKind::Del
    } else {
        DiffLineKind::Context
    }
}

/// Splits diff text on `'\n'` and classifies each piece.
///
/// A trailing newline yields a final empty `Context` line, which the viewer
/// renders as a blank row.
pub fn diff_lines(diff_text: &str) -> Vec<DiffLine> {
    diff_text
        .split('\n')
        .map(|text| DiffLine { text: text.to_owned(), kind: classify(text) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_counts_include_empty_split() {
        assert!(unified_diff("", "").starts_with("@@ -1,1 +1,1 @@\n"));
        assert!(unified_diff("a\nb\nc", "").starts_with("@@ -1,3 +1,1 @@\n"));
    }

    #[test]
    fn identical_text_is_all_context() {
        assert_eq!(unified_diff("a\nb", "a\nb"), "@@ -1,2 +1,2 @@\n a\n b\n");
    }

    #[test]
    fn insertion_cascades_through_later_lines() {
        let diff = unified_diff("a\nc\nd", "a\nb\nc\nd");
        assert_eq!(diff, "@@ -1,3 +1,4 @@\n a\n-c\n+b\n-d\n+c\n+d\n");
    }

    #[test]
    fn empty_side_suppresses_marker_line() {
        // "a" vs "" at index 0: only the deletion is emitted.
        assert_eq!(unified_diff("a", ""), "@@ -1,1 +1,1 @@\n-a\n");
        assert_eq!(unified_diff("", "z"), "@@ -1,1 +1,1 @@\n+z\n");
    }

    #[test]
    fn classify_checks_meta_first() {
        assert_eq!(classify("@@ -1,1 +1,1 @@"), DiffLineKind::Meta);
        assert_eq!(classify("@"), DiffLineKind::Context);
        assert_eq!(classify("+++"), DiffLineKind::Add);
        assert_eq!(classify("---"), DiffLineKind::Del);
        assert_eq!(classify(""), DiffLineKind::Context);
    }

    #[test]
    fn diff_lines_keeps_trailing_blank() {
        let lines = diff_lines("@@ -1,1 +1,1 @@\n-a\n+z\n");
        let kinds: Vec<DiffLineKind> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![DiffLineKind::Meta, DiffLineKind::Del, DiffLineKind::Add, DiffLineKind::Context]
        );
        assert_eq!(lines[3].text, "");
    }
}
