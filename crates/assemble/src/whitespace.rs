//! Line-aware whitespace normalization.
//!
//! Unlike a flat whitespace collapse, these helpers keep single line breaks
//! intact: a plain-text file's own layout survives extraction, and the
//! page/paragraph separators the joiners insert stay exactly one blank line
//! wide.

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            normalized.push('\n');
        } else {
            normalized.push(c);
        }
    }
    normalized
}

/// Collapses runs of blank lines to at most one blank line.
///
/// A line is blank when it is empty after trimming, so whitespace-only lines
/// count as blank and do not survive. Leading and trailing blank lines are
/// dropped entirely; [`finalize`](crate::finalize) trims the edges anyway.
pub fn collapse_blank_lines(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut pending_blank = false;
    let mut wrote_any = false;

    for line in text.split('\n') {
        if line.trim().is_empty() {
            pending_blank = true;
            continue;
        }
        if wrote_any {
            collapsed.push('\n');
            if pending_blank {
                collapsed.push('\n');
            }
        }
        collapsed.push_str(line);
        wrote_any = true;
        pending_blank = false;
    }

    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_and_mac_line_endings_normalize() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn single_line_breaks_survive_collapsing() {
        assert_eq!(collapse_blank_lines("Hello\nWorld"), "Hello\nWorld");
    }

    #[test]
    fn blank_runs_collapse_to_one() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn whitespace_only_lines_count_as_blank() {
        assert_eq!(collapse_blank_lines("a\n \t \n  \nb"), "a\n\nb");
    }

    #[test]
    fn leading_and_trailing_blanks_are_dropped() {
        assert_eq!(collapse_blank_lines("\n\na\n\n"), "a");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(collapse_blank_lines(""), "");
        assert_eq!(normalize_newlines(""), "");
    }
}
