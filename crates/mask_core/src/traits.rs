//! The boundary a form-binding layer talks to.
//!
//! [`MaskedInput`] is what a host sees of one bound input: value accessor
//! registration, programmatic writes, and the three event kinds (key intent,
//! paste, focus transitions). Host glue can be written against the trait and
//! driven by a [`MaskState`](crate::MaskState) or a test double.
//!
//! ```ignore
//! fn on_key<I: MaskedInput + ?Sized>(field: &mut I, ev: &KeyEvent) -> bool {
//!     field.handle_key_intent(ev.text, ev.caret, ev.ch).is_accepted()
//! }
//! ```

use crate::error::InvalidValueError;
use crate::filter::KeyDecision;
use crate::paste::PasteOutcome;
use crate::state::{ChangeNotifier, CommitOutcome, MaskValue, TouchNotifier};

pub trait MaskedInput {
    // =========================================================================
    // Value accessor registration
    // =========================================================================

    /// Install the change callback; invoked once per accepted change, never
    /// on a rejection.
    fn register_change_notifier(&mut self, notifier: ChangeNotifier);

    /// Install the touch callback; invoked on each blur transition.
    fn register_touch_notifier(&mut self, notifier: TouchNotifier);

    /// Programmatic write; non-numeric values are a caller error.
    fn set_value(&mut self, value: MaskValue) -> Result<(), InvalidValueError>;

    /// Advisory passthrough of the host's disabled state.
    fn set_disabled(&mut self, disabled: bool);

    // =========================================================================
    // Events
    // =========================================================================

    /// Accept or reject one keystroke before it reaches the field.
    fn handle_key_intent(&self, text: &str, caret: usize, ch: char) -> KeyDecision;

    /// Reconcile the field text after the host applied an accepted edit.
    fn commit_input(&mut self, text: &str) -> CommitOutcome;

    /// Sanitize clipboard text into a new value. The host must suppress its
    /// own paste regardless of the outcome.
    fn handle_paste(&mut self, clipboard: &str) -> PasteOutcome;

    /// Returns the text to show while editing.
    fn handle_focus_enter(&mut self) -> &str;

    /// Returns the text to show once editing ends.
    fn handle_focus_leave(&mut self) -> &str;

    // =========================================================================
    // Read-only getters
    // =========================================================================

    fn raw_value(&self) -> Option<&str>;

    fn formatted_value(&self) -> &str;

    fn display_text(&self) -> &str;
}

impl MaskedInput for crate::state::MaskState {
    #[inline]
    fn register_change_notifier(&mut self, notifier: ChangeNotifier) {
        crate::state::MaskState::register_change_notifier(self, notifier)
    }

    #[inline]
    fn register_touch_notifier(&mut self, notifier: TouchNotifier) {
        crate::state::MaskState::register_touch_notifier(self, notifier)
    }

    #[inline]
    fn set_value(&mut self, value: MaskValue) -> Result<(), InvalidValueError> {
        crate::state::MaskState::set_value(self, value)
    }

    #[inline]
    fn set_disabled(&mut self, disabled: bool) {
        crate::state::MaskState::set_disabled(self, disabled)
    }

    #[inline]
    fn handle_key_intent(&self, text: &str, caret: usize, ch: char) -> KeyDecision {
        crate::state::MaskState::handle_key_intent(self, text, caret, ch)
    }

    #[inline]
    fn commit_input(&mut self, text: &str) -> CommitOutcome {
        crate::state::MaskState::commit_input(self, text)
    }

    #[inline]
    fn handle_paste(&mut self, clipboard: &str) -> PasteOutcome {
        crate::state::MaskState::handle_paste(self, clipboard)
    }

    #[inline]
    fn handle_focus_enter(&mut self) -> &str {
        crate::state::MaskState::handle_focus_enter(self)
    }

    #[inline]
    fn handle_focus_leave(&mut self) -> &str {
        crate::state::MaskState::handle_focus_leave(self)
    }

    #[inline]
    fn raw_value(&self) -> Option<&str> {
        crate::state::MaskState::raw_value(self)
    }

    #[inline]
    fn formatted_value(&self) -> &str {
        crate::state::MaskState::formatted_value(self)
    }

    #[inline]
    fn display_text(&self) -> &str {
        crate::state::MaskState::display_text(self)
    }
}
