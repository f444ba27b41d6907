use crate::model::culture::LanguageEntry;

/// Ordered culture list with live drag reordering and a single edit slot.
///
/// Edits are buffered by the caller: `save_entry` receives the final
/// code and name, and `cancel_edit` has nothing to restore.
#[derive(Debug)]
pub struct CultureList {
    entries: Vec<LanguageEntry>,
    editing: Option<String>,
    next_id: u64,
}

impl CultureList {
    pub fn new(entries: Vec<LanguageEntry>) -> Self {
        let highest = entries
            .iter()
            .filter_map(|e| e.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next_id = highest.max(entries.len() as u64).saturating_add(1);
        Self {
            entries,
            editing: None,
            next_id,
        }
    }

    pub fn entries(&self) -> &[LanguageEntry] {
        &self.entries
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Moves the entry at `source` to `target` in one splice. Fired on every
    /// hover during a drag, so equal or out-of-range indices are ignored.
    pub fn move_entry(&mut self, source: usize, target: usize) -> bool {
        if source == target || source >= self.entries.len() || target >= self.entries.len() {
            return false;
        }
        let moved = self.entries.remove(source);
        self.entries.insert(target, moved);
        true
    }

    /// Appends a blank entry and puts it in edit mode.
    pub fn add_entry(&mut self) -> String {
        let id = self.fresh_id();
        self.entries.push(LanguageEntry::new(id.clone(), "", ""));
        self.editing = Some(id.clone());
        id
    }

    /// Next counter value. Once the counter saturates, ids get a suffix
    /// instead of repeating.
    fn fresh_id(&mut self) -> String {
        let base = self.next_id.to_string();
        self.next_id = self.next_id.saturating_add(1);
        if !self.contains(&base) {
            return base;
        }
        (1u64..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| !self.contains(id))
            .unwrap_or(base)
    }

    pub fn begin_edit(&mut self, id: &str) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.editing = Some(id.to_string());
        true
    }

    pub fn save_entry(&mut self, id: &str, code: &str, name: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.code = code.to_string();
        entry.name = name.to_string();
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete_entry(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        self.entries.len() != before
    }
}
