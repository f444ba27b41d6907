use std::collections::HashSet;

use serde::Serialize;

use crate::model::phrase::PhraseRow;

/// State of the header checkbox over the filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderCheckState {
    None,
    Partial,
    All,
}

/// Rows checked for bulk actions, keyed by row id.
///
/// Rows hidden by a filter stay selected.
#[derive(Debug, Default)]
pub struct SelectionTracker {
    selected: HashSet<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership and returns whether the row is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Replaces the selection with exactly the given rows.
    pub fn select_all<'a>(&mut self, visible: impl IntoIterator<Item = &'a PhraseRow>) {
        self.selected = visible.into_iter().map(|r| r.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.selected
    }

    pub fn forget(&mut self, id: &str) {
        self.selected.remove(id);
    }

    pub fn take(&mut self) -> HashSet<String> {
        std::mem::take(&mut self.selected)
    }

    pub fn header_state(&self, visible: &[&PhraseRow]) -> HeaderCheckState {
        if self.selected.is_empty() {
            HeaderCheckState::None
        } else if !visible.is_empty() && visible.iter().all(|r| self.selected.contains(&r.id)) {
            HeaderCheckState::All
        } else {
            HeaderCheckState::Partial
        }
    }
}
