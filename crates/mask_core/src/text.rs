//! UTF-8 text utilities for caret handling and text cleanup.
//!
//! Carets and selections are byte offsets. Hosts may report offsets that
//! fall inside a multi-byte character (a `€` suffix, a `·` separator), so
//! every offset is clamped before it is used to slice.

use crate::selection::SelectionRange;
use std::borrow::Cow;

/// Clamp an arbitrary byte index to a valid UTF-8 character boundary.
///
/// Indices past the end clamp to `s.len()`; indices inside a multi-byte
/// character move back to the start of that character.
///
/// ```
/// use mask_core::clamp_to_char_boundary;
///
/// let s = "1·5"; // '·' is 2 bytes
/// assert_eq!(clamp_to_char_boundary(s, 1), 1);
/// assert_eq!(clamp_to_char_boundary(s, 2), 1);
/// assert_eq!(clamp_to_char_boundary(s, 3), 3);
/// assert_eq!(clamp_to_char_boundary(s, 100), 4);
/// ```
#[inline]
pub fn clamp_to_char_boundary(s: &str, index: usize) -> usize {
    let mut index = index.min(s.len());
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Byte offset of the character boundary before `i` (0 at the start).
pub fn prev_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[..i].char_indices().last().map(|(idx, _)| idx).unwrap_or(0)
}

/// Byte offset of the character boundary after `i` (`s.len()` at the end).
pub fn next_cursor_boundary(s: &str, i: usize) -> usize {
    let i = clamp_to_char_boundary(s, i);
    s[i..].chars().next().map(|ch| i + ch.len_utf8()).unwrap_or(s.len())
}

/// Remove every occurrence of `pattern` from `s`.
///
/// Borrows when there is nothing to remove; an empty pattern removes nothing.
///
/// ```
/// use mask_core::remove_all;
///
/// assert_eq!(remove_all("1,234,567", ","), "1234567");
/// assert_eq!(remove_all("1234", ","), "1234");
/// assert_eq!(remove_all("1234", ""), "1234");
/// ```
pub fn remove_all<'a>(s: &'a str, pattern: &str) -> Cow<'a, str> {
    if pattern.is_empty() || !s.contains(pattern) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.replace(pattern, ""))
}

/// Replace the bytes covered by `range` with `insert`.
///
/// The range is clamped to character boundaries first. Returns the new text
/// and the byte offset just past the inserted text.
pub fn splice(s: &str, range: SelectionRange, insert: &str) -> (String, usize) {
    let start = clamp_to_char_boundary(s, range.start);
    let end = clamp_to_char_boundary(s, range.end).max(start);
    let mut out = String::with_capacity(s.len() - (end - start) + insert.len());
    out.push_str(&s[..start]);
    out.push_str(insert);
    out.push_str(&s[end..]);
    (out, start + insert.len())
}
