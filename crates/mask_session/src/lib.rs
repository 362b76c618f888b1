//! Scripted replay of host events against a numeric mask.
//!
//! A [`Session`] is loaded from TOML and replayed with [`replay`], producing a
//! line transcript (compared by golden tests with [`diff_lines`]) and a
//! [`ReplaySnapshot`] that serializes to JSON.

mod error;
pub mod replay;
pub mod session;

pub use error::SessionError;
pub use replay::{FinalState, Replay, ReplaySnapshot, StepRecord, replay};
pub use session::{Op, Session, Step, ValueSpec};

use std::fmt::Write;

/// Escape text for a double-quoted transcript field.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(out, "\\u{{{:04X}}}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out
}

/// Render the first difference between two transcripts with a little
/// surrounding context. Returns an empty string when they are equal.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    const MISSING: &str = "<missing>";
    let line = |lines: &[String], i: usize| lines.get(i).map_or(MISSING, String::as_str).to_string();

    let total = expected.len().max(actual.len());
    let Some(first) = (0..total).find(|&i| line(expected, i) != line(actual, i)) else {
        return String::new();
    };

    let mut out = format!("first mismatch at line {}:\n", first + 1);
    for i in first.saturating_sub(2)..(first + 3).min(total) {
        let marker = if i == first { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>4}  expected: {}", i + 1, line(expected, i));
        let _ = writeln!(out, "{marker} {:>4}    actual: {}", i + 1, line(actual, i));
    }
    let _ = writeln!(
        out,
        "expected {} lines, actual {} lines",
        expected.len(),
        actual.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn escape_text_quotes_and_controls() {
        assert_eq!(escape_text(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_text("1\n2\t3"), "1\\n2\\t3");
        assert_eq!(escape_text("\u{7}"), "\\u{0007}");
        assert_eq!(escape_text("1.000,50 €"), "1.000,50 €");
    }

    #[test]
    fn diff_lines_points_at_first_mismatch() {
        let expected = lines(&["a", "b", "c", "d"]);
        let actual = lines(&["a", "b", "x", "d"]);
        let diff = diff_lines(&expected, &actual);
        assert!(diff.starts_with("first mismatch at line 3:"));
        assert!(diff.contains(">    3  expected: c"));
        assert!(diff.contains(">    3    actual: x"));
    }

    #[test]
    fn diff_lines_reports_missing_tail() {
        let diff = diff_lines(&lines(&["a", "EOF"]), &lines(&["a"]));
        assert!(diff.contains("actual: <missing>"));
        assert!(diff.ends_with("expected 2 lines, actual 1 lines\n"));
    }

    #[test]
    fn equal_transcripts_have_no_diff() {
        assert!(diff_lines(&lines(&["a"]), &lines(&["a"])).is_empty());
    }
}
