use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::catalog::LanguageCatalog;
use crate::model::phrase::{PhrasePatch, PhraseRow};

/// Hands out row ids from the wall clock in milliseconds, bumped so that
/// two rows created in the same millisecond still get distinct ids.
#[derive(Debug, Default)]
struct IdClock {
    last: u128,
}

impl IdClock {
    fn next(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let candidate = match self.last.checked_add(1) {
            Some(next) => next.max(now),
            None => now,
        };
        self.last = self.last.max(candidate);
        candidate.to_string()
    }

    fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u128>() {
            self.last = self.last.max(n);
        }
    }
}

/// Owns the phrase rows of the session, in insertion order.
#[derive(Debug)]
pub struct RowStore {
    rows: Vec<PhraseRow>,
    catalog: LanguageCatalog,
    clock: IdClock,
}

impl RowStore {
    pub fn new(catalog: LanguageCatalog) -> Self {
        Self {
            rows: Vec::new(),
            catalog,
            clock: IdClock::default(),
        }
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn rows(&self) -> &[PhraseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&PhraseRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut PhraseRow> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// First row carrying `phrase_key`. Blank keys never match.
    pub fn find_by_key(&self, phrase_key: &str) -> Option<&PhraseRow> {
        if phrase_key.trim().is_empty() {
            return None;
        }
        self.rows.iter().find(|r| r.phrase_key == phrase_key)
    }

    /// Clock id, suffixed when a loaded row already holds it (the clock
    /// stops advancing once it has observed the largest numeric id).
    fn fresh_id(&mut self) -> String {
        let base = self.clock.next();
        if !self.contains(&base) {
            return base;
        }
        (1u64..)
            .map(|n| format!("{base}-{n}"))
            .find(|id| !self.contains(id))
            .unwrap_or(base)
    }

    /// Appends a blank row and returns its id.
    pub fn add(&mut self) -> String {
        let id = self.fresh_id();
        self.rows.push(PhraseRow::blank(id.clone(), &self.catalog));
        id
    }

    /// Appends a row coming from outside the session. The row is normalized
    /// against the catalog and gets a fresh id when it has none or its id is taken.
    pub fn insert(&mut self, mut row: PhraseRow) -> String {
        row.normalize(&self.catalog);
        if row.id.is_empty() || self.contains(&row.id) {
            row.id = self.fresh_id();
        } else {
            self.clock.observe(&row.id);
        }
        let id = row.id.clone();
        self.rows.push(row);
        id
    }

    pub fn replace_all(&mut self, rows: Vec<PhraseRow>) -> usize {
        self.rows.clear();
        for row in rows {
            self.insert(row);
        }
        self.rows.len()
    }

    /// Writes a partial update through to an existing row.
    pub fn upsert(&mut self, id: &str, patch: &PhrasePatch) -> bool {
        match self.get_mut(id) {
            Some(row) => {
                row.apply(patch);
                true
            }
            None => false,
        }
    }

    pub fn set_translation(&mut self, id: &str, lang: &str, text: &str) -> bool {
        match self.get_mut(id) {
            Some(row) => {
                row.translations.insert(lang.to_string(), text.to_string());
                true
            }
            None => false,
        }
    }

    /// Overwrites the row with the same id, used to restore edit snapshots.
    pub fn restore(&mut self, snapshot: PhraseRow) -> bool {
        match self.get_mut(&snapshot.id) {
            Some(row) => {
                *row = snapshot;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        self.rows.len() != before
    }

    pub fn delete_many(&mut self, ids: &HashSet<String>) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| !ids.contains(&r.id));
        before - self.rows.len()
    }
}
