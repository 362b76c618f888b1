//! Keystroke admission.
//!
//! Decides, before a character reaches the field, whether the host should let
//! it through. The filter only reads; committing the edit is the job of
//! [`MaskState::commit_input`](crate::MaskState::commit_input).

use crate::config::MaskConfig;
use crate::selection::SelectionRange;
use crate::text::{clamp_to_char_boundary, splice};
use std::borrow::Cow;

/// Why a keystroke was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Not a digit and not one of the configured separators.
    NotNumeric,
    /// A second decimal separator.
    DuplicateDecimalSeparator,
    /// A fraction digit beyond the configured decimal places.
    PrecisionExceeded,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDecision {
    Accept,
    Reject(RejectReason),
}

impl KeyDecision {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, KeyDecision::Accept)
    }
}

/// One keystroke as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyIntent<'a> {
    /// Text currently in the field.
    pub text: &'a str,
    /// Caret byte offset into `text`.
    pub caret: usize,
    /// Selection the character would replace, if any.
    pub selection: Option<SelectionRange>,
    pub ch: char,
}

impl<'a> KeyIntent<'a> {
    pub fn new(text: &'a str, caret: usize, ch: char) -> Self {
        Self {
            text,
            caret,
            selection: None,
            ch,
        }
    }

    pub fn with_selection(mut self, selection: SelectionRange) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// Accept or reject `intent` under `config`.
///
/// Rules, first rejection wins:
/// 1. only digits and the two configured separators are admitted;
/// 2. a decimal separator is refused when the text already has one;
/// 3. a digit typed after the decimal separator is refused once the fraction
///    holds `decimal_places` digits. Digits before the separator are free.
///
/// A non-empty selection is evaluated as already removed, with the caret at
/// its start.
///
/// ```
/// use mask_core::{KeyDecision, KeyIntent, MaskConfig, RejectReason, admit_key};
///
/// let config = MaskConfig::default();
/// assert_eq!(admit_key(&KeyIntent::new("12.34", 1, '9'), &config), KeyDecision::Accept);
/// assert_eq!(
///     admit_key(&KeyIntent::new("12.34", 5, '9'), &config),
///     KeyDecision::Reject(RejectReason::PrecisionExceeded)
/// );
/// ```
pub fn admit_key(intent: &KeyIntent<'_>, config: &MaskConfig) -> KeyDecision {
    let decision = evaluate(intent, config);
    if let KeyDecision::Reject(reason) = decision {
        log::trace!(
            target: "mask.filter",
            "reject {:?} at {} in {:?}: {reason:?}",
            intent.ch,
            intent.caret,
            intent.text
        );
    }
    decision
}

fn evaluate(intent: &KeyIntent<'_>, config: &MaskConfig) -> KeyDecision {
    let ch = intent.ch;
    let decimal = config.decimal_separator();
    let is_digit = ch.is_ascii_digit();

    if !(is_digit || ch == decimal || ch == config.thousands_separator()) {
        return KeyDecision::Reject(RejectReason::NotNumeric);
    }

    let (text, caret) = match intent.selection.filter(|sel| !sel.is_empty()) {
        Some(sel) => {
            let (rest, caret) = splice(intent.text, sel, "");
            (Cow::Owned(rest), caret)
        }
        None => (
            Cow::Borrowed(intent.text),
            clamp_to_char_boundary(intent.text, intent.caret),
        ),
    };
    let separator_at = text.find(decimal);

    if ch == decimal && separator_at.is_some() {
        return KeyDecision::Reject(RejectReason::DuplicateDecimalSeparator);
    }

    if is_digit
        && let Some(at) = separator_at
        && caret > at
    {
        let fraction_digits = text[at + decimal.len_utf8()..]
            .chars()
            .filter(char::is_ascii_digit)
            .count();
        if fraction_digits >= config.decimal_places() {
            return KeyDecision::Reject(RejectReason::PrecisionExceeded);
        }
    }

    KeyDecision::Accept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MaskOptions;

    fn admit(text: &str, caret: usize, ch: char) -> KeyDecision {
        admit_key(&KeyIntent::new(text, caret, ch), &MaskConfig::default())
    }

    #[test]
    fn letters_and_signs_are_rejected() {
        for ch in ['a', '-', '+', ' ', 'e', '$'] {
            assert_eq!(
                admit("12", 2, ch),
                KeyDecision::Reject(RejectReason::NotNumeric),
                "char {ch:?}"
            );
        }
    }

    #[test]
    fn digits_and_separators_are_admitted() {
        assert!(admit("", 0, '7').is_accepted());
        assert!(admit("12", 2, '.').is_accepted());
        assert!(admit("1234", 1, ',').is_accepted());
    }

    #[test]
    fn second_decimal_separator_is_rejected_everywhere() {
        let text = "12.34";
        for caret in 0..=text.len() {
            assert_eq!(
                admit(text, caret, '.'),
                KeyDecision::Reject(RejectReason::DuplicateDecimalSeparator),
                "caret {caret}"
            );
        }
    }

    #[test]
    fn precision_is_bounded_only_after_the_separator() {
        // Before the separator: integer part is unrestricted.
        assert!(admit("12.34", 0, '9').is_accepted());
        assert!(admit("12.34", 2, '9').is_accepted());
        // After it: the fraction is full.
        for caret in 3..=5 {
            assert_eq!(
                admit("12.34", caret, '9'),
                KeyDecision::Reject(RejectReason::PrecisionExceeded),
                "caret {caret}"
            );
        }
        // Room left in the fraction.
        assert!(admit("12.3", 4, '9').is_accepted());
    }

    #[test]
    fn zero_decimal_places_refuses_any_fraction_digit() {
        let config = MaskConfig::new(MaskOptions {
            decimal_places: 0,
            ..MaskOptions::default()
        })
        .unwrap();
        let decision = admit_key(&KeyIntent::new("12.", 3, '5'), &config);
        assert_eq!(decision, KeyDecision::Reject(RejectReason::PrecisionExceeded));
    }

    #[test]
    fn caret_past_the_end_is_clamped() {
        assert_eq!(
            admit("1.23", 99, '4'),
            KeyDecision::Reject(RejectReason::PrecisionExceeded)
        );
    }

    #[test]
    fn selection_over_fraction_digits_frees_room() {
        let config = MaskConfig::default();
        let intent = KeyIntent::new("12.34", 4, '9').with_selection(SelectionRange::new(4, 5));
        assert!(admit_key(&intent, &config).is_accepted());
    }

    #[test]
    fn selection_over_the_separator_allows_a_new_one() {
        let config = MaskConfig::default();
        let intent = KeyIntent::new("12.34", 2, '.').with_selection(SelectionRange::new(2, 3));
        assert!(admit_key(&intent, &config).is_accepted());
    }

    #[test]
    fn empty_selection_behaves_like_a_caret() {
        let config = MaskConfig::default();
        let intent = KeyIntent::new("12.34", 5, '9').with_selection(SelectionRange::collapsed(5));
        assert_eq!(
            admit_key(&intent, &config),
            KeyDecision::Reject(RejectReason::PrecisionExceeded)
        );
    }

    #[test]
    fn custom_separators_drive_the_rules() {
        let config = MaskConfig::new(MaskOptions {
            decimal_separator: ',',
            thousands_separator: '.',
            ..MaskOptions::default()
        })
        .unwrap();
        assert_eq!(
            admit_key(&KeyIntent::new("1,5", 0, ','), &config),
            KeyDecision::Reject(RejectReason::DuplicateDecimalSeparator)
        );
        assert!(admit_key(&KeyIntent::new("1,5", 3, '0'), &config).is_accepted());
        assert!(admit_key(&KeyIntent::new("1,5", 1, '.'), &config).is_accepted());
    }
}
