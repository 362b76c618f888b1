//! # mask_core
//!
//! UI-agnostic numeric input mask engine.
//!
//! A mask binds to one text input and keeps three things consistent: the raw
//! value (digits and at most one decimal separator), the formatted string
//! shown when the field is not being edited (prefix, thousands grouping,
//! padded fraction, suffix), and what the field displays right now.
//!
//! This crate provides:
//! - [`MaskConfig`]: validated formatting options, loadable from TOML
//! - [`admit_key`]: the per-keystroke edit filter
//! - [`sanitize_paste`]: turning clipboard text into a raw value
//! - [`format`] and friends: raw value to display string
//! - [`MaskState`]: one bound field, driven by host events
//! - [`MaskStore`]: every field of a form, keyed by [`FieldId`]
//! - [`MaskedInput`]: the boundary trait host glue is written against
//!
//! ## Design Principles
//!
//! The engine does not know about any widget toolkit. Hosts translate their
//! own key, paste and focus events into the calls exposed here, and apply
//! the returned decisions and display text to their widgets.
//!
//! ## Example
//!
//! ```
//! use mask_core::{MaskConfig, MaskState};
//!
//! let mut price = MaskState::new(MaskConfig::default());
//! price.handle_focus_enter();
//! price.type_str("1234.567");
//! assert_eq!(price.display_text(), "1234.56");
//! assert_eq!(price.handle_focus_leave(), "$1,234.56");
//! ```

mod config;
mod error;
mod filter;
mod id;
mod number;
mod paste;
mod selection;
mod state;
mod store;
mod text;
mod traits;

pub use config::{MAX_DECIMAL_PLACES, MaskConfig, MaskOptions};
pub use error::{ConfigError, InvalidValueError, ParseRejected, SeparatorRole, StoreError};
pub use filter::{KeyDecision, KeyIntent, RejectReason, admit_key};
pub use id::FieldId;
pub use paste::{PasteOutcome, sanitize_paste};
pub use selection::SelectionRange;
pub use state::{
    ChangeNotifier, CommitOutcome, EditOutcome, MaskState, MaskValue, TouchNotifier,
};
pub use store::MaskStore;
pub use traits::MaskedInput;

// Pure formatting helpers, for hosts that render values without binding a
// field (e.g. read-only table cells).
pub use number::{
    format, insert_thousands_separators, is_numeric, normalize_decimal_places, raw_from_number,
    strip_leading_zeros, to_number, truncate_decimal_places,
};

// Re-export text utilities for integration layers that track carets
// themselves.
pub use text::{clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary, remove_all, splice};
