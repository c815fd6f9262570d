use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::SessionError;
use crate::history::HistoryField;
use crate::validation::{FieldKind, FieldValue, pre_validate, validate};

/// What happened to an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EditOutcome {
    /// Failed the keystroke check; nothing was stored.
    Rejected,
    /// Stored. `valid` is false when the field is now unclean.
    Accepted { valid: bool },
}

#[derive(Debug, Clone)]
struct FieldState {
    field: HistoryField<FieldValue>,
    unclean: bool,
}

/// Every field being edited, keyed by the pane or fragment it belongs to.
#[derive(Debug, Clone)]
pub struct EditSession {
    config: Config,
    fields: IndexMap<(String, FieldKind), FieldState>,
}

/// One field's state, as reported by [`EditSession::snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSnapshot {
    pub id: String,
    pub field: FieldKind,
    pub current: FieldValue,
    pub original: FieldValue,
    pub unsaved: bool,
    pub unclean: bool,
    pub undo_depth: usize,
}

impl EditSession {
    pub fn new(config: Config) -> Self {
        EditSession {
            config,
            fields: IndexMap::new(),
        }
    }

    /// Start tracking a field at its saved value. Reloading a field discards
    /// its history.
    pub fn load(&mut self, id: impl Into<String>, kind: FieldKind, value: FieldValue) {
        let unclean = !validate(kind, &value);
        self.fields.insert(
            (id.into(), kind),
            FieldState {
                field: HistoryField::new(value),
                unclean,
            },
        );
    }

    pub fn handle_edit(
        &mut self,
        id: &str,
        kind: FieldKind,
        value: FieldValue,
        now: u64,
    ) -> Result<EditOutcome, SessionError> {
        let limits = self.config.fields;
        let history = self.config.history;
        let state = self.state_mut(id, kind)?;

        if !pre_validate(kind, &value, &limits) {
            debug!(id, field = %kind, ?value, "edit rejected");
            return Ok(EditOutcome::Rejected);
        }

        state.field.update(value, now, &history);
        let valid = validate(kind, state.field.current());
        state.unclean = !valid;
        Ok(EditOutcome::Accepted { valid })
    }

    /// Step a field back one history entry. Returns the restored value, or
    /// `None` when there was nothing to undo.
    pub fn undo(&mut self, id: &str, kind: FieldKind) -> Result<Option<FieldValue>, SessionError> {
        let state = self.state_mut(id, kind)?;
        let Some(restored) = state.field.undo().cloned() else {
            return Ok(None);
        };
        state.unclean = !validate(kind, &restored);
        Ok(Some(restored))
    }

    pub fn current(&self, id: &str, kind: FieldKind) -> Option<&FieldValue> {
        self.state(id, kind).map(|state| state.field.current())
    }

    pub fn is_unsaved(&self, id: &str, kind: FieldKind) -> bool {
        self.state(id, kind).is_some_and(|state| state.field.is_unsaved())
    }

    pub fn is_unclean(&self, id: &str, kind: FieldKind) -> bool {
        self.state(id, kind).is_some_and(|state| state.unclean)
    }

    /// Fields of `id` whose value differs from the saved one.
    pub fn unsaved_fields(&self, id: &str) -> Vec<FieldKind> {
        self.fields
            .iter()
            .filter(|((owner, _), state)| owner == id && state.field.is_unsaved())
            .map(|((_, kind), _)| *kind)
            .collect()
    }

    /// Whether any field of `id` holds a value that may not be saved.
    pub fn has_unclean(&self, id: &str) -> bool {
        self.fields
            .iter()
            .any(|((owner, _), state)| owner == id && state.unclean)
    }

    /// Accept the current values of `id` as saved.
    pub fn mark_saved(&mut self, id: &str) {
        for ((owner, _), state) in self.fields.iter_mut() {
            if owner == id {
                state.field.mark_saved();
            }
        }
    }

    pub fn snapshot(&self) -> Vec<FieldSnapshot> {
        self.fields
            .iter()
            .map(|((id, kind), state)| FieldSnapshot {
                id: id.clone(),
                field: *kind,
                current: state.field.current().clone(),
                original: state.field.original().clone(),
                unsaved: state.field.is_unsaved(),
                unclean: state.unclean,
                undo_depth: state.field.history().len(),
            })
            .collect()
    }

    fn state(&self, id: &str, kind: FieldKind) -> Option<&FieldState> {
        self.fields.get(&(id.to_string(), kind))
    }

    fn state_mut(&mut self, id: &str, kind: FieldKind) -> Result<&mut FieldState, SessionError> {
        self.fields
            .get_mut(&(id.to_string(), kind))
            .ok_or_else(|| SessionError::UnknownField {
                id: id.to_string(),
                field: kind,
            })
    }
}
