use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::phrase::PhraseRow;
use crate::services::store::RowStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditState {
    Viewing,
    Editing,
}

/// Tracks which rows are in edit mode and the pre-edit copy each one restores on cancel.
///
/// Field edits go straight into the `RowStore`, so the snapshot is the only
/// record of the values a row had before editing started.
#[derive(Debug, Default)]
pub struct EditSessionTracker {
    editing: HashSet<String>,
    snapshots: HashMap<String, PhraseRow>,
}

impl EditSessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, id: &str) -> EditState {
        if self.editing.contains(id) {
            EditState::Editing
        } else {
            EditState::Viewing
        }
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing.contains(id)
    }

    pub fn editing_ids(&self) -> &HashSet<String> {
        &self.editing
    }

    /// Enters edit mode. A row already being edited keeps its first snapshot.
    pub fn begin_edit(&mut self, store: &RowStore, id: &str) -> bool {
        if self.editing.contains(id) {
            return true;
        }
        let Some(row) = store.get(id) else {
            return false;
        };
        self.snapshots.insert(id.to_string(), row.clone());
        self.editing.insert(id.to_string());
        true
    }

    /// Leaves edit mode keeping the current store values.
    pub fn commit_edit(&mut self, id: &str) -> bool {
        self.snapshots.remove(id);
        self.editing.remove(id)
    }

    /// Leaves edit mode and writes the snapshot back over the row.
    pub fn cancel_edit(&mut self, store: &mut RowStore, id: &str) -> bool {
        if !self.editing.remove(id) {
            return false;
        }
        if let Some(snapshot) = self.snapshots.remove(id) {
            store.restore(snapshot);
        }
        true
    }

    /// Drops any edit state for a row that no longer exists.
    pub fn forget(&mut self, id: &str) {
        self.editing.remove(id);
        self.snapshots.remove(id);
    }

    pub fn clear(&mut self) {
        self.editing.clear();
        self.snapshots.clear();
    }
}
