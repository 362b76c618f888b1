//! Central store for the masks of a form.
//!
//! The store owns one [`MaskState`] per bound field and tracks which of them
//! has focus, so that at most one field is in edit mode at a time. It is
//! UI-agnostic: integration layers map their own element ids to [`FieldId`]
//! and route events here.

use crate::config::MaskConfig;
use crate::error::{InvalidValueError, StoreError};
use crate::filter::KeyDecision;
use crate::id::FieldId;
use crate::paste::PasteOutcome;
use crate::state::{CommitOutcome, EditOutcome, MaskState, MaskValue};
use std::collections::HashMap;

/// Central store for mask state.
///
/// # Example
///
/// ```
/// use mask_core::{FieldId, MaskConfig, MaskStore, MaskValue};
///
/// let mut store = MaskStore::new();
/// let price = FieldId::from_raw(1);
///
/// store.bind(price, MaskConfig::default(), MaskValue::Empty).unwrap();
/// store.focus(price).unwrap();
/// store.type_str(price, "1234.5").unwrap();
/// store.blur();
///
/// assert_eq!(store.display_text(price), Some("$1,234.50"));
/// assert_eq!(store.raw_value(price), Some("1234.5"));
/// ```
#[derive(Debug, Default)]
pub struct MaskStore {
    fields: HashMap<FieldId, MaskState>,
    focused: Option<FieldId>,
}

impl MaskStore {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            focused: None,
        }
    }

    /// Bind a mask seeded with `initial` to `id`, replacing any previous
    /// binding. A non-numeric initial value leaves the store unchanged.
    pub fn bind(
        &mut self,
        id: FieldId,
        config: MaskConfig,
        initial: impl Into<MaskValue>,
    ) -> Result<&mut MaskState, InvalidValueError> {
        let state = MaskState::with_value(config, initial)?;
        Ok(self.bind_state(id, state))
    }

    /// Bind an already constructed state (e.g. one with notifiers attached).
    pub fn bind_state(&mut self, id: FieldId, state: MaskState) -> &mut MaskState {
        log::trace!(target: "mask.store", "bind {id}");
        if self.focused == Some(id) {
            self.focused = None;
        }
        let slot = self.fields.entry(id).insert_entry(state);
        slot.into_mut()
    }

    /// Drop the binding for `id`, returning its state.
    pub fn unbind(&mut self, id: FieldId) -> Option<MaskState> {
        if self.focused == Some(id) {
            self.focused = None;
        }
        let removed = self.fields.remove(&id);
        if removed.is_some() {
            log::trace!(target: "mask.store", "unbind {id}");
        }
        removed
    }

    /// Returns `true` if a mask is bound to `id`.
    pub fn has(&self, id: FieldId) -> bool {
        self.fields.contains_key(&id)
    }

    pub fn field(&self, id: FieldId) -> Option<&MaskState> {
        self.fields.get(&id)
    }

    /// Direct access to a bound state.
    ///
    /// The editing helpers on [`MaskState`] focus the field they act on, which
    /// the store does not see. Prefer the id-keyed forwards below; a field
    /// focused this way is blurred by the next [`focus`](Self::focus).
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut MaskState> {
        self.fields.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bound ids in ascending order.
    pub fn ids(&self) -> Vec<FieldId> {
        let mut ids: Vec<FieldId> = self.fields.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Forget every binding. No touch notifiers fire.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.focused = None;
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The field currently in edit mode, if any.
    pub fn focused(&self) -> Option<FieldId> {
        self.focused
    }

    /// Move focus to `id`, blurring the previously focused field first.
    pub fn focus(&mut self, id: FieldId) -> Result<&str, StoreError> {
        if !self.has(id) {
            return Err(StoreError::UnknownField(id));
        }
        if self.focused != Some(id) {
            self.blur();
        }
        self.blur_stray(id);
        self.focused = Some(id);
        log::trace!(target: "mask.store", "focus {id}");
        Ok(self.require_mut(id)?.handle_focus_enter())
    }

    /// Blur the focused field, if any.
    pub fn blur(&mut self) {
        let Some(id) = self.focused.take() else {
            return;
        };
        log::trace!(target: "mask.store", "blur {id}");
        if let Some(state) = self.fields.get_mut(&id) {
            state.handle_focus_leave();
        }
    }

    /// Blur fields other than `keep` that entered edit mode behind the store's
    /// back, in id order.
    fn blur_stray(&mut self, keep: FieldId) {
        let mut stray: Vec<FieldId> = self
            .fields
            .iter()
            .filter(|(id, state)| **id != keep && state.is_focused())
            .map(|(id, _)| *id)
            .collect();
        stray.sort_unstable();
        for id in stray {
            log::trace!(target: "mask.store", "blur untracked {id}");
            if let Some(state) = self.fields.get_mut(&id) {
                state.handle_focus_leave();
            }
        }
    }

    // =========================================================================
    // Id-keyed event forwarding
    // =========================================================================

    pub fn handle_key_intent(
        &self,
        id: FieldId,
        text: &str,
        caret: usize,
        ch: char,
    ) -> Result<KeyDecision, StoreError> {
        Ok(self.require(id)?.handle_key_intent(text, caret, ch))
    }

    pub fn commit_input(&mut self, id: FieldId, text: &str) -> Result<CommitOutcome, StoreError> {
        Ok(self.require_mut(id)?.commit_input(text))
    }

    pub fn handle_paste(&mut self, id: FieldId, clipboard: &str) -> Result<PasteOutcome, StoreError> {
        Ok(self.require_mut(id)?.handle_paste(clipboard))
    }

    pub fn set_value(
        &mut self,
        id: FieldId,
        value: impl Into<MaskValue>,
    ) -> Result<(), StoreError> {
        self.require_mut(id)?.set_value(value)?;
        Ok(())
    }

    /// Type into `id`, focusing it first if another field has focus.
    pub fn type_str(&mut self, id: FieldId, text: &str) -> Result<Vec<EditOutcome>, StoreError> {
        self.focus(id)?;
        Ok(self.require_mut(id)?.type_str(text))
    }

    pub fn type_char(&mut self, id: FieldId, ch: char) -> Result<EditOutcome, StoreError> {
        self.focus(id)?;
        Ok(self.require_mut(id)?.type_char(ch))
    }

    pub fn backspace(&mut self, id: FieldId) -> Result<EditOutcome, StoreError> {
        self.focus(id)?;
        Ok(self.require_mut(id)?.backspace())
    }

    pub fn delete_forward(&mut self, id: FieldId) -> Result<EditOutcome, StoreError> {
        self.focus(id)?;
        Ok(self.require_mut(id)?.delete_forward())
    }

    pub fn set_caret(&mut self, id: FieldId, caret: usize) -> Result<(), StoreError> {
        self.focus(id)?;
        self.require_mut(id)?.set_caret(caret);
        Ok(())
    }

    pub fn select(&mut self, id: FieldId, anchor: usize, caret: usize) -> Result<(), StoreError> {
        self.focus(id)?;
        self.require_mut(id)?.select(anchor, caret);
        Ok(())
    }

    pub fn raw_value(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).and_then(MaskState::raw_value)
    }

    pub fn display_text(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(MaskState::display_text)
    }

    pub fn formatted_value(&self, id: FieldId) -> Option<&str> {
        self.fields.get(&id).map(MaskState::formatted_value)
    }

    /// Revision counter of the field's raw value; `0` for unbound ids.
    pub fn value_revision(&self, id: FieldId) -> u64 {
        self.fields.get(&id).map(MaskState::value_revision).unwrap_or(0)
    }

    // --- internals ---

    fn require(&self, id: FieldId) -> Result<&MaskState, StoreError> {
        self.fields.get(&id).ok_or(StoreError::UnknownField(id))
    }

    fn require_mut(&mut self, id: FieldId) -> Result<&mut MaskState, StoreError> {
        self.fields.get_mut(&id).ok_or(StoreError::UnknownField(id))
    }
}
