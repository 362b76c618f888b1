//! Per-field mask state.
//!
//! A [`MaskState`] owns the raw value of one bound input, the formatted string
//! derived from it, and the bookkeeping of the current edit session (what the
//! field displays, where the caret is, whether it has focus). Every mutation
//! of the raw value goes through one place, so `formatted == format(raw)`
//! holds whenever control returns to the host.

use crate::config::MaskConfig;
use crate::error::{InvalidValueError, ParseRejected};
use crate::filter::{KeyDecision, KeyIntent, RejectReason, admit_key};
use crate::number::{format, is_numeric, raw_from_number, strip_leading_zeros, to_number};
use crate::paste::{PasteOutcome, sanitize_paste};
use crate::selection::SelectionRange;
use crate::text::{clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary, splice};
use std::fmt;

/// Called with the numeric value (or `None` for an empty field) after every
/// accepted change.
pub type ChangeNotifier = Box<dyn FnMut(Option<f64>)>;

/// Called when the field loses focus.
pub type TouchNotifier = Box<dyn FnMut()>;

/// A value written programmatically into a mask.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskValue {
    Empty,
    Number(f64),
    Text(String),
}

impl From<f64> for MaskValue {
    fn from(value: f64) -> Self {
        MaskValue::Number(value)
    }
}

impl From<u32> for MaskValue {
    fn from(value: u32) -> Self {
        MaskValue::Number(f64::from(value))
    }
}

impl From<i32> for MaskValue {
    fn from(value: i32) -> Self {
        MaskValue::Number(f64::from(value))
    }
}

impl From<&str> for MaskValue {
    fn from(value: &str) -> Self {
        MaskValue::Text(value.to_string())
    }
}

impl From<String> for MaskValue {
    fn from(value: String) -> Self {
        MaskValue::Text(value)
    }
}

impl<T: Into<MaskValue>> From<Option<T>> for MaskValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(MaskValue::Empty, Into::into)
    }
}

/// Result of reconciling host-applied text with the mask.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// The text was not a number; nothing changed.
    Rejected(ParseRejected),
}

impl CommitOutcome {
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed)
    }
}

/// Result of one host-side editing step (see [`MaskState::type_char`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The edit was applied and committed.
    Committed,
    /// The keystroke was refused by the edit filter.
    Rejected(RejectReason),
    /// The keystroke passed the filter but the resulting text was not a
    /// number, so the commit was vetoed.
    Vetoed,
    /// Nothing to do (e.g. backspace at the start of the field).
    Unchanged,
}

/// State of one masked input.
pub struct MaskState {
    config: MaskConfig,
    raw: Option<String>,
    formatted: String,
    display: String,
    caret: usize,
    selection_anchor: Option<usize>,
    focused: bool,
    disabled: bool,
    value_rev: u64,
    on_change: Option<ChangeNotifier>,
    on_touched: Option<TouchNotifier>,
}

impl MaskState {
    /// An empty field.
    pub fn new(config: MaskConfig) -> Self {
        Self {
            config,
            raw: None,
            formatted: String::new(),
            display: String::new(),
            caret: 0,
            selection_anchor: None,
            focused: false,
            disabled: false,
            value_rev: 0,
            on_change: None,
            on_touched: None,
        }
    }

    /// A field seeded with `initial`, displayed formatted.
    ///
    /// Fails like [`set_value`](Self::set_value) for non-numeric input.
    pub fn with_value(
        config: MaskConfig,
        initial: impl Into<MaskValue>,
    ) -> Result<Self, InvalidValueError> {
        let mut state = Self::new(config);
        let raw = resolve_value(initial.into(), &state.config)?;
        state.set_raw(raw);
        state.show_formatted();
        state.value_rev = 0;
        Ok(state)
    }

    // =========================================================================
    // Read-only accessors
    // =========================================================================

    pub fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Canonical raw value, `None` when the field is empty.
    pub fn raw_value(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// The raw value as a number.
    pub fn numeric_value(&self) -> Option<f64> {
        self.raw.as_deref().and_then(|raw| to_number(raw, &self.config))
    }

    /// Always equal to `format(raw_value())`.
    pub fn formatted_value(&self) -> &str {
        &self.formatted
    }

    /// What the field currently shows: the raw text while focused, the
    /// formatted value otherwise.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// Caret as a byte offset into [`display_text`](Self::display_text).
    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn selection(&self) -> Option<SelectionRange> {
        let anchor = self.selection_anchor?;
        (anchor != self.caret).then(|| SelectionRange::new(anchor, self.caret))
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Monotonic counter bumped on every accepted value change.
    pub fn value_revision(&self) -> u64 {
        self.value_rev
    }

    // =========================================================================
    // Host boundary
    // =========================================================================

    /// Install the single change callback, replacing any previous one.
    pub fn register_change_notifier(&mut self, notifier: impl FnMut(Option<f64>) + 'static) {
        self.on_change = Some(Box::new(notifier));
    }

    /// Install the single touch callback, replacing any previous one.
    pub fn register_touch_notifier(&mut self, notifier: impl FnMut() + 'static) {
        self.on_touched = Some(Box::new(notifier));
    }

    /// Advisory only: stored for the host, never consulted by the engine.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Decide whether `ch` may be typed into `text` at `caret`.
    pub fn handle_key_intent(&self, text: &str, caret: usize, ch: char) -> KeyDecision {
        admit_key(&KeyIntent::new(text, caret, ch), &self.config)
    }

    /// Same as [`handle_key_intent`](Self::handle_key_intent) with a full
    /// intent, including a selection.
    pub fn admit(&self, intent: &KeyIntent<'_>) -> KeyDecision {
        admit_key(intent, &self.config)
    }

    /// Reconcile the text the host now shows after an accepted edit.
    ///
    /// Non-numeric text is vetoed without touching any state. Otherwise
    /// leading zeros are stripped, an empty field becomes an absent value,
    /// the formatted value is recomputed and the change notifier fires.
    pub fn commit_input(&mut self, text: &str) -> CommitOutcome {
        if !text.is_empty() && !is_numeric(text, &self.config) {
            log::debug!(target: "mask.commit", "veto non-numeric edit {text:?}");
            return CommitOutcome::Rejected(ParseRejected {
                text: text.to_string(),
            });
        }

        let cleaned = strip_leading_zeros(text);
        let raw = (!cleaned.is_empty()).then(|| cleaned.to_string());
        self.display = text.to_string();
        self.caret = clamp_to_char_boundary(&self.display, self.caret);
        self.selection_anchor = None;
        self.set_raw(raw);
        log::trace!(
            target: "mask.commit",
            "commit {text:?} -> raw {:?} formatted {:?}",
            self.raw,
            self.formatted
        );
        self.notify_change();
        CommitOutcome::Committed
    }

    /// Replace the value with sanitized clipboard text.
    ///
    /// The clipboard text itself never reaches the field: on success the field
    /// shows the formatted value, on rejection nothing changes.
    ///
    /// A focused field stays focused but shows decorated text, which the edit
    /// helpers cannot extend. Hosts that keep editing after a paste should
    /// leave and re-enter focus first to get the raw text back.
    pub fn handle_paste(&mut self, clipboard: &str) -> PasteOutcome {
        let Some(raw) = sanitize_paste(clipboard, &self.config) else {
            return PasteOutcome::Rejected;
        };

        self.set_raw(Some(raw.clone()));
        self.show_formatted();
        log::debug!(
            target: "mask.paste",
            "paste {clipboard:?} -> raw {raw:?} display {:?}",
            self.display
        );
        self.notify_change();
        PasteOutcome::Accepted {
            display_text: self.display.clone(),
            raw_value: raw,
        }
    }

    /// Enter edit mode: show the raw value undecorated.
    ///
    /// Focusing an already focused field leaves the text being edited alone.
    pub fn handle_focus_enter(&mut self) -> &str {
        if !self.focused {
            self.focused = true;
            self.display = self.raw.clone().unwrap_or_default();
            self.caret = self.display.len();
            self.selection_anchor = None;
            log::trace!(target: "mask.focus", "focus, editing {:?}", self.display);
        }
        &self.display
    }

    /// Leave edit mode: show the formatted value and report the touch.
    ///
    /// The touch notifier fires once per focus/blur cycle; blurring a field
    /// that is not focused only refreshes the display.
    pub fn handle_focus_leave(&mut self) -> &str {
        self.show_formatted();
        if self.focused {
            self.focused = false;
            log::trace!(target: "mask.focus", "blur, showing {:?}", self.display);
            if let Some(notify) = self.on_touched.as_mut() {
                notify();
            }
        }
        &self.display
    }

    /// Programmatic write.
    ///
    /// Accepts an absent value, a finite non-negative number, or numeric
    /// text. Anything else is a caller error and leaves the field untouched.
    ///
    /// ```
    /// use mask_core::{MaskConfig, MaskState, MaskValue};
    ///
    /// let mut state = MaskState::new(MaskConfig::default());
    /// state.set_value(1234.5).unwrap();
    /// assert_eq!(state.display_text(), "$1,234.50");
    ///
    /// assert!(state.set_value("abc").is_err());
    /// assert_eq!(state.raw_value(), Some("1234.5"));
    ///
    /// state.set_value(MaskValue::Empty).unwrap();
    /// assert_eq!(state.display_text(), "");
    /// ```
    pub fn set_value(&mut self, value: impl Into<MaskValue>) -> Result<(), InvalidValueError> {
        let raw = resolve_value(value.into(), &self.config)?;
        self.set_raw(raw);
        self.show_formatted();
        log::debug!(target: "mask.value", "set raw {:?}", self.raw);
        self.notify_change();
        Ok(())
    }

    // =========================================================================
    // Host-side editing
    // =========================================================================

    /// Type one character the way a text field would: filter it, insert it
    /// at the caret (replacing any selection) and commit.
    ///
    /// An unfocused field is focused first, as a click into it would.
    pub fn type_char(&mut self, ch: char) -> EditOutcome {
        self.ensure_focused();
        let range = self
            .selection()
            .unwrap_or(SelectionRange::collapsed(self.caret));

        let mut intent = KeyIntent::new(&self.display, self.caret, ch);
        if !range.is_empty() {
            intent = intent.with_selection(range);
        }
        if let KeyDecision::Reject(reason) = admit_key(&intent, &self.config) {
            return EditOutcome::Rejected(reason);
        }

        let mut buf = [0u8; 4];
        let (candidate, caret) = splice(&self.display, range, ch.encode_utf8(&mut buf));
        self.apply_edit(&candidate, caret)
    }

    /// Type each character of `text` in turn.
    pub fn type_str(&mut self, text: &str) -> Vec<EditOutcome> {
        text.chars().map(|ch| self.type_char(ch)).collect()
    }

    /// Delete the selection, or the character before the caret.
    pub fn backspace(&mut self) -> EditOutcome {
        self.ensure_focused();
        let range = match self.selection() {
            Some(sel) => sel,
            None if self.caret == 0 => return EditOutcome::Unchanged,
            None => SelectionRange::new(prev_cursor_boundary(&self.display, self.caret), self.caret),
        };
        let (candidate, caret) = splice(&self.display, range, "");
        self.apply_edit(&candidate, caret)
    }

    /// Delete the selection, or the character after the caret.
    pub fn delete_forward(&mut self) -> EditOutcome {
        self.ensure_focused();
        let range = match self.selection() {
            Some(sel) => sel,
            None if self.caret >= self.display.len() => return EditOutcome::Unchanged,
            None => SelectionRange::new(self.caret, next_cursor_boundary(&self.display, self.caret)),
        };
        let (candidate, caret) = splice(&self.display, range, "");
        self.apply_edit(&candidate, caret)
    }

    /// Place the caret, clearing any selection.
    pub fn set_caret(&mut self, caret: usize) {
        self.ensure_focused();
        self.caret = clamp_to_char_boundary(&self.display, caret);
        self.selection_anchor = None;
    }

    /// Select from `anchor` to `caret`; the caret ends up at `caret`.
    pub fn select(&mut self, anchor: usize, caret: usize) {
        self.ensure_focused();
        let anchor = clamp_to_char_boundary(&self.display, anchor);
        self.caret = clamp_to_char_boundary(&self.display, caret);
        self.selection_anchor = (anchor != self.caret).then_some(anchor);
    }

    pub fn select_all(&mut self) {
        self.select(0, usize::MAX);
    }

    /// Move left one character, or collapse a selection to its start.
    pub fn move_caret_left(&mut self) {
        self.ensure_focused();
        self.caret = match self.selection() {
            Some(sel) => sel.start,
            None => prev_cursor_boundary(&self.display, self.caret),
        };
        self.selection_anchor = None;
    }

    /// Move right one character, or collapse a selection to its end.
    pub fn move_caret_right(&mut self) {
        self.ensure_focused();
        self.caret = match self.selection() {
            Some(sel) => sel.end,
            None => next_cursor_boundary(&self.display, self.caret),
        };
        self.selection_anchor = None;
    }

    pub fn move_caret_to_start(&mut self) {
        self.set_caret(0);
    }

    pub fn move_caret_to_end(&mut self) {
        self.set_caret(usize::MAX);
    }

    // --- internals ---

    fn ensure_focused(&mut self) {
        if !self.focused {
            self.handle_focus_enter();
        }
    }

    fn apply_edit(&mut self, candidate: &str, caret: usize) -> EditOutcome {
        match self.commit_input(candidate) {
            CommitOutcome::Committed => {
                self.caret = clamp_to_char_boundary(&self.display, caret);
                EditOutcome::Committed
            }
            CommitOutcome::Rejected(_) => EditOutcome::Vetoed,
        }
    }

    fn set_raw(&mut self, raw: Option<String>) {
        self.formatted = format(raw.as_deref(), &self.config);
        self.raw = raw;
        self.value_rev = self.value_rev.wrapping_add(1);
    }

    fn show_formatted(&mut self) {
        self.display = self.formatted.clone();
        self.caret = self.display.len();
        self.selection_anchor = None;
    }

    fn notify_change(&mut self) {
        let value = self.numeric_value();
        if let Some(notify) = self.on_change.as_mut() {
            notify(value);
        }
    }
}

impl Default for MaskState {
    fn default() -> Self {
        Self::new(MaskConfig::default())
    }
}

impl fmt::Debug for MaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaskState")
            .field("config", &self.config)
            .field("raw", &self.raw)
            .field("formatted", &self.formatted)
            .field("display", &self.display)
            .field("caret", &self.caret)
            .field("selection_anchor", &self.selection_anchor)
            .field("focused", &self.focused)
            .field("disabled", &self.disabled)
            .field("value_rev", &self.value_rev)
            .field("on_change", &self.on_change.is_some())
            .field("on_touched", &self.on_touched.is_some())
            .finish()
    }
}

fn resolve_value(value: MaskValue, config: &MaskConfig) -> Result<Option<String>, InvalidValueError> {
    match value {
        MaskValue::Empty => Ok(None),
        MaskValue::Number(number) => raw_from_number(number, config)
            .map(Some)
            .ok_or_else(|| InvalidValueError {
                value: number.to_string(),
            }),
        MaskValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else if is_numeric(trimmed, config) {
                Ok(Some(strip_leading_zeros(trimmed).to_string()))
            } else {
                Err(InvalidValueError {
                    value: format!("{text:?}"),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaskOptions;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded(state: &mut MaskState) -> Rc<RefCell<Vec<Option<f64>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        state.register_change_notifier(move |value| sink.borrow_mut().push(value));
        log
    }

    fn touches(state: &mut MaskState) -> Rc<RefCell<usize>> {
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        state.register_touch_notifier(move || *sink.borrow_mut() += 1);
        count
    }

    #[test]
    fn refocus_after_paste_resumes_raw_editing() {
        let mut state = MaskState::new(MaskConfig::default());
        state.handle_focus_enter();
        assert!(state.handle_paste("1234.5").is_accepted());
        assert!(state.is_focused());
        assert_eq!(state.display_text(), "$1,234.50");

        state.handle_focus_leave();
        assert_eq!(state.handle_focus_enter(), "1234.5");
        assert_eq!(state.backspace(), EditOutcome::Committed);
        assert_eq!(state.type_char('9'), EditOutcome::Committed);
        assert_eq!(state.raw_value(), Some("1234.9"));
    }

    #[test]
    fn new_state_is_empty() {
        let state = MaskState::default();
        assert_eq!(state.raw_value(), None);
        assert_eq!(state.formatted_value(), "");
        assert_eq!(state.display_text(), "");
        assert_eq!(state.value_revision(), 0);
    }

    #[test]
    fn commit_strips_leading_zeros_and_notifies() {
        let mut state = MaskState::default();
        let changes = recorded(&mut state);

        assert!(state.commit_input("00450").is_committed());
        assert_eq!(state.raw_value(), Some("450"));
        assert_eq!(state.formatted_value(), "$450.00");
        assert_eq!(state.display_text(), "00450");
        assert_eq!(*changes.borrow(), vec![Some(450.0)]);
    }

    #[test]
    fn commit_keeps_a_single_zero() {
        let mut state = MaskState::default();
        state.commit_input("00");
        assert_eq!(state.raw_value(), Some("0"));
        state.commit_input("007.5");
        assert_eq!(state.raw_value(), Some("7.5"));
    }

    #[test]
    fn commit_of_empty_text_clears_the_value() {
        let mut state = MaskState::with_value(MaskConfig::default(), 5.0).unwrap();
        let changes = recorded(&mut state);
        assert!(state.commit_input("").is_committed());
        assert_eq!(state.raw_value(), None);
        assert_eq!(state.formatted_value(), "");
        assert_eq!(*changes.borrow(), vec![None]);
    }

    #[test]
    fn non_numeric_commit_is_vetoed_without_side_effects() {
        let mut state = MaskState::with_value(MaskConfig::default(), "12").unwrap();
        let changes = recorded(&mut state);
        let rev = state.value_revision();

        let outcome = state.commit_input("12,3");
        assert_eq!(
            outcome,
            CommitOutcome::Rejected(ParseRejected {
                text: "12,3".to_string()
            })
        );
        assert_eq!(state.raw_value(), Some("12"));
        assert_eq!(state.display_text(), "$12.00");
        assert_eq!(state.value_revision(), rev);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn paste_replaces_value_and_display() {
        let mut state = MaskState::default();
        let changes = recorded(&mut state);

        let outcome = state.handle_paste("$1,234.50");
        assert_eq!(
            outcome,
            PasteOutcome::Accepted {
                display_text: "$1,234.50".to_string(),
                raw_value: "1234.50".to_string(),
            }
        );
        assert_eq!(state.raw_value(), Some("1234.50"));
        assert_eq!(state.display_text(), "$1,234.50");
        assert_eq!(*changes.borrow(), vec![Some(1234.5)]);
    }

    #[test]
    fn paste_truncates_instead_of_rounding() {
        let mut state = MaskState::default();
        state.handle_paste("12.3459");
        assert_eq!(state.raw_value(), Some("12.34"));
        assert_eq!(state.formatted_value(), "$12.34");
    }

    #[test]
    fn rejected_paste_changes_nothing() {
        let mut state = MaskState::with_value(MaskConfig::default(), 3.0).unwrap();
        let changes = recorded(&mut state);
        assert_eq!(state.handle_paste("three dollars"), PasteOutcome::Rejected);
        assert_eq!(state.raw_value(), Some("3"));
        assert_eq!(state.display_text(), "$3.00");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn focus_shows_raw_and_blur_shows_formatted() {
        let mut state = MaskState::with_value(MaskConfig::default(), 1234567.0).unwrap();
        let touched = touches(&mut state);

        assert_eq!(state.display_text(), "$1,234,567.00");
        assert_eq!(state.handle_focus_enter(), "1234567");
        assert_eq!(state.handle_focus_leave(), "$1,234,567.00");
        assert_eq!(*touched.borrow(), 1);
    }

    #[test]
    fn touch_fires_once_per_cycle() {
        let mut state = MaskState::default();
        let touched = touches(&mut state);

        state.handle_focus_leave();
        assert_eq!(*touched.borrow(), 0);

        state.handle_focus_enter();
        state.handle_focus_enter();
        state.handle_focus_leave();
        state.handle_focus_leave();
        assert_eq!(*touched.borrow(), 1);
    }

    #[test]
    fn empty_round_trip_stays_empty() {
        let mut state = MaskState::with_value(MaskConfig::default(), 9.0).unwrap();
        state.set_value(MaskValue::Empty).unwrap();
        assert_eq!(state.formatted_value(), "");
        assert_eq!(state.handle_focus_enter(), "");
        assert_eq!(state.handle_focus_leave(), "");
    }

    #[test]
    fn invalid_set_value_keeps_prior_value() {
        let mut state = MaskState::with_value(MaskConfig::default(), "42.1").unwrap();
        let changes = recorded(&mut state);

        let err = state.set_value("abc").unwrap_err();
        assert_eq!(err.value, "\"abc\"");
        assert!(state.set_value(-3.0).is_err());
        assert!(state.set_value(f64::NAN).is_err());

        assert_eq!(state.raw_value(), Some("42.1"));
        assert_eq!(state.display_text(), "$42.10");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn set_value_accepts_numbers_text_and_absence() {
        let mut state = MaskState::default();
        let changes = recorded(&mut state);

        state.set_value(12).unwrap();
        assert_eq!(state.display_text(), "$12.00");
        state.set_value(" 0099.5 ").unwrap();
        assert_eq!(state.raw_value(), Some("99.5"));
        state.set_value(None::<f64>).unwrap();
        assert_eq!(state.raw_value(), None);
        state.set_value("").unwrap();
        assert_eq!(state.raw_value(), None);

        assert_eq!(*changes.borrow(), vec![Some(12.0), Some(99.5), None, None]);
    }

    #[test]
    fn with_value_does_not_count_as_a_change() {
        let state = MaskState::with_value(MaskConfig::default(), 1.5).unwrap();
        assert_eq!(state.value_revision(), 0);
        assert_eq!(state.display_text(), "$1.50");
        assert!(MaskState::with_value(MaskConfig::default(), "x").is_err());
    }

    #[test]
    fn revision_counts_accepted_changes_only() {
        let mut state = MaskState::default();
        state.commit_input("1");
        state.commit_input("1a");
        state.handle_paste("nope");
        state.handle_paste("2");
        state.set_value(3.0).unwrap();
        assert_eq!(state.value_revision(), 3);
    }

    #[test]
    fn disabled_flag_is_advisory() {
        let mut state = MaskState::default();
        state.set_disabled(true);
        assert!(state.is_disabled());
        assert!(state.commit_input("5").is_committed());
        assert!(state.handle_key_intent("5", 1, '1').is_accepted());
    }

    #[test]
    fn typing_builds_the_value_character_by_character() {
        let mut state = MaskState::default();
        let changes = recorded(&mut state);

        let outcomes = state.type_str("1234.567");
        assert_eq!(
            &outcomes[..],
            &[
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Committed,
                EditOutcome::Rejected(RejectReason::PrecisionExceeded),
            ]
        );
        assert_eq!(state.display_text(), "1234.56");
        assert_eq!(state.raw_value(), Some("1234.56"));
        assert_eq!(changes.borrow().len(), 7);

        assert_eq!(state.handle_focus_leave(), "$1,234.56");
    }

    #[test]
    fn typing_a_trailing_separator_commits() {
        let mut state = MaskState::default();
        state.type_str("12.");
        assert_eq!(state.raw_value(), Some("12."));
        assert_eq!(state.formatted_value(), "$12.00");
    }

    #[test]
    fn typed_thousands_separator_is_vetoed_by_commit() {
        let mut state = MaskState::default();
        state.type_str("12");
        assert_eq!(state.type_char(','), EditOutcome::Vetoed);
        assert_eq!(state.display_text(), "12");
        assert_eq!(state.caret(), 2);
    }

    #[test]
    fn integer_digits_stay_free_when_the_fraction_is_full() {
        let mut state = MaskState::default();
        state.type_str("12.34");
        assert_eq!(
            state.type_char('5'),
            EditOutcome::Rejected(RejectReason::PrecisionExceeded)
        );
        state.move_caret_to_start();
        assert_eq!(state.type_char('9'), EditOutcome::Committed);
        assert_eq!(state.display_text(), "912.34");
        assert_eq!(state.caret(), 1);
    }

    #[test]
    fn selection_is_replaced_by_typing() {
        let mut state = MaskState::default();
        state.type_str("12.34");
        state.select(3, 5);
        assert_eq!(state.type_char('9'), EditOutcome::Committed);
        assert_eq!(state.display_text(), "12.9");
        assert_eq!(state.caret(), 4);
        assert_eq!(state.selection(), None);
    }

    #[test]
    fn backspace_and_delete_commit_the_shorter_text() {
        let mut state = MaskState::default();
        state.type_str("105");
        assert_eq!(state.backspace(), EditOutcome::Committed);
        assert_eq!(state.raw_value(), Some("10"));

        state.move_caret_to_start();
        assert_eq!(state.backspace(), EditOutcome::Unchanged);
        assert_eq!(state.delete_forward(), EditOutcome::Committed);
        assert_eq!(state.display_text(), "0");
        assert_eq!(state.raw_value(), Some("0"));

        state.select_all();
        assert_eq!(state.backspace(), EditOutcome::Committed);
        assert_eq!(state.raw_value(), None);
        assert_eq!(state.delete_forward(), EditOutcome::Unchanged);
    }

    #[test]
    fn deleting_every_digit_around_a_separator_is_vetoed() {
        let mut state = MaskState::default();
        state.type_str("1.");
        state.move_caret_to_start();
        assert_eq!(state.delete_forward(), EditOutcome::Vetoed);
        assert_eq!(state.display_text(), "1.");
    }

    #[test]
    fn caret_moves_collapse_selections() {
        let mut state = MaskState::default();
        state.type_str("1234");
        state.select(1, 3);
        state.move_caret_left();
        assert_eq!(state.caret(), 1);
        state.select(1, 3);
        state.move_caret_right();
        assert_eq!(state.caret(), 3);
        state.move_caret_right();
        state.move_caret_right();
        assert_eq!(state.caret(), 4);
        state.move_caret_left();
        assert_eq!(state.caret(), 3);
    }

    #[test]
    fn typing_into_an_unfocused_field_edits_the_raw_text() {
        let mut state = MaskState::with_value(MaskConfig::default(), 12.0).unwrap();
        assert_eq!(state.type_char('3'), EditOutcome::Committed);
        assert!(state.is_focused());
        assert_eq!(state.display_text(), "123");
    }

    #[test]
    fn custom_config_flows_through_every_path() {
        let config = MaskConfig::new(MaskOptions {
            prefix: String::new(),
            suffix: " kg".to_string(),
            decimal_places: 3,
            thousands_separator: '\'',
            ..MaskOptions::default()
        })
        .unwrap();
        let mut state = MaskState::new(config);
        state.type_str("12345.6789");
        assert_eq!(state.raw_value(), Some("12345.678"));
        assert_eq!(state.handle_focus_leave(), "12'345.678 kg");
        state.handle_paste("1'000.5 kg");
        assert_eq!(state.raw_value(), Some("1000.5"));
        assert_eq!(state.display_text(), "1'000.500 kg");
    }
}
