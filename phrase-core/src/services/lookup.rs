use std::collections::HashSet;

use crate::services::store::RowStore;

/// Loading flags for machine-translation lookups run by the front-end.
#[derive(Debug, Default)]
pub struct LookupTracker {
    loading: HashSet<String>,
}

impl LookupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a lookup as in flight. Returns false if one already is.
    pub fn begin(&mut self, id: &str) -> bool {
        self.loading.insert(id.to_string())
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.loading.contains(id)
    }

    /// Clears the flag and applies the result. A failed or blank lookup leaves
    /// the translation as it was. Returns whether the translation was written.
    pub fn finish(&mut self, store: &mut RowStore, id: &str, lang: &str, result: Option<&str>) -> bool {
        self.loading.remove(id);
        match result.map(str::trim) {
            Some(text) if !text.is_empty() => store.set_translation(id, lang, text),
            _ => false,
        }
    }

    pub fn forget(&mut self, id: &str) {
        self.loading.remove(id);
    }

    pub fn clear(&mut self) {
        self.loading.clear();
    }
}
