//! Selected text reported by the host alongside a keystroke.

/// A byte range of the displayed text, normalized so `start <= end`.
///
/// A typed character replaces the selection, so the edit filter judges the
/// text as it would look with the range removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl SelectionRange {
    /// Create a range from two offsets in either order.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A zero-width range at `caret`.
    #[inline]
    pub fn collapsed(caret: usize) -> Self {
        Self::new(caret, caret)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_range_normalizes() {
        let range = SelectionRange::new(5, 2);
        assert_eq!(range, SelectionRange { start: 2, end: 5 });
    }

    #[test]
    fn collapsed_range_is_empty() {
        assert!(SelectionRange::collapsed(4).is_empty());
        assert!(!SelectionRange::new(1, 2).is_empty());
    }
}
