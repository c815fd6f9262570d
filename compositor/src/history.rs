use serde::Serialize;
use tracing::debug;

use crate::config::HistoryConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry<T> {
    pub value: T,
    /// Milliseconds, on whatever clock the caller passes to `update`.
    pub timestamp: u64,
}

/// An editable value with debounced undo history.
///
/// `history` is ordered oldest first. The first entry is the baseline the
/// field can always be undone back to; it survives eviction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryField<T> {
    current: T,
    original: T,
    history: Vec<HistoryEntry<T>>,
}

impl<T: Clone + PartialEq> HistoryField<T> {
    pub fn new(value: T) -> Self {
        HistoryField {
            current: value.clone(),
            original: value,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn original(&self) -> &T {
        &self.original
    }

    pub fn history(&self) -> &[HistoryEntry<T>] {
        &self.history
    }

    /// Set a new value at time `now`. Returns `false` if nothing changed.
    pub fn update(&mut self, value: T, now: u64, config: &HistoryConfig) -> bool {
        if value == self.current {
            return false;
        }

        let record = match self.history.last() {
            None => true,
            Some(last) => now.saturating_sub(last.timestamp) > config.debounce_ms,
        };
        if record {
            let previous = std::mem::replace(&mut self.current, value);
            self.history.push(HistoryEntry {
                value: previous,
                timestamp: now,
            });
            if self.history.len() > config.max_length.max(2) {
                self.history.remove(1);
            }
        } else {
            debug!(now, "edit within debounce window; no new undo step");
            self.current = value;
        }
        true
    }

    /// Restore the newest history entry. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<&T> {
        let entry = self.history.pop()?;
        self.current = entry.value;
        Some(&self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn is_unsaved(&self) -> bool {
        self.current != self.original
    }

    pub fn mark_saved(&mut self) {
        self.original = self.current.clone();
    }
}
