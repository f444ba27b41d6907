use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::model::catalog::LanguageCatalog;
use crate::model::phrase::{Namespace, PhrasePatch, PhraseRow};
use crate::services::edit_session::EditSessionTracker;
use crate::services::exchange::{self, ImportMode, ImportReport};
use crate::services::filter::{compute_visible, FilterCriteria};
use crate::services::lookup::LookupTracker;
use crate::services::selection::{HeaderCheckState, SelectionTracker};
use crate::services::store::RowStore;
use crate::services::view::{self, Pager, SortColumn, SortKey};

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    #[serde(flatten)]
    pub row: PhraseRow,
    pub editing: bool,
    pub expanded: bool,
    pub selected: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub rows: Vec<RowView>,
    pub total: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub page_size_options: Vec<usize>,
    pub sort: Option<SortKey>,
    pub selected_count: usize,
    pub header: HeaderCheckState,
    pub active_filters: usize,
}

/// Phrase table session: the row store plus every tracker that derives the
/// visible page from it.
///
/// Every mutation ends in `settle`, which clamps the pager to the current
/// filtered count so the view never lands on an empty page.
#[derive(Debug)]
pub struct PhraseManager {
    store: RowStore,
    edits: EditSessionTracker,
    selection: SelectionTracker,
    expanded: HashSet<String>,
    lookups: LookupTracker,
    criteria: FilterCriteria,
    sort: Option<SortKey>,
    pager: Pager,
    page_size_options: Vec<usize>,
}

impl PhraseManager {
    pub fn new(catalog: LanguageCatalog, page_size: usize, page_size_options: Vec<usize>) -> Self {
        Self {
            store: RowStore::new(catalog),
            edits: EditSessionTracker::new(),
            selection: SelectionTracker::new(),
            expanded: HashSet::new(),
            lookups: LookupTracker::new(),
            criteria: FilterCriteria::default(),
            sort: None,
            pager: Pager::new(page_size),
            page_size_options,
        }
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        self.store.catalog()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn pager(&self) -> Pager {
        self.pager
    }

    pub fn edits(&self) -> &EditSessionTracker {
        &self.edits
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.lookups.is_loading(id)
    }

    pub fn filtered(&self) -> Vec<&PhraseRow> {
        compute_visible(self.store.rows(), &self.criteria, self.edits.editing_ids())
    }

    fn sorted(&self) -> Vec<&PhraseRow> {
        let mut rows = self.filtered();
        view::sort_rows(&mut rows, self.sort);
        rows
    }

    fn settle(&mut self) {
        let total = self.filtered().len();
        let before = self.pager.page_index;
        if self.pager.clamp(total) {
            debug!(from = before, to = self.pager.page_index, total, "page clamped");
        }
    }

    fn forget(&mut self, id: &str) {
        self.edits.forget(id);
        self.selection.forget(id);
        self.expanded.remove(id);
        self.lookups.forget(id);
    }

    // rows

    /// Replaces every row and resets all per-row state.
    pub fn load_rows(&mut self, rows: Vec<PhraseRow>) -> usize {
        let count = self.store.replace_all(rows);
        self.edits.clear();
        self.selection.clear();
        self.expanded.clear();
        self.lookups.clear();
        self.pager.page_index = 0;
        info!(count, "rows loaded");
        count
    }

    /// "Add Phrase": a blank row that starts in edit mode, expanded, on the
    /// page where it shows up.
    pub fn add_phrase(&mut self) -> String {
        let id = self.store.add();
        self.edits.begin_edit(&self.store, &id);
        self.expanded.insert(id.clone());

        if let Some(pos) = self.sorted().iter().position(|r| r.id == id) {
            self.pager.page_index = self.pager.page_of(pos);
        }
        debug!(%id, page = self.pager.page_index, "phrase added");
        id
    }

    pub fn update_phrase(&mut self, id: &str, patch: &PhrasePatch) -> bool {
        let ok = self.store.upsert(id, patch);
        self.settle();
        ok
    }

    pub fn set_translation(&mut self, id: &str, lang: &str, text: &str) -> bool {
        let ok = self.store.set_translation(id, lang, text);
        self.settle();
        ok
    }

    pub fn delete_phrase(&mut self, id: &str) -> bool {
        let ok = self.store.delete(id);
        if ok {
            self.forget(id);
            info!(%id, "phrase deleted");
        }
        self.settle();
        ok
    }

    /// Applies an import. Rows in edit mode are never merge targets.
    pub fn import_rows(&mut self, rows: Vec<PhraseRow>, mode: ImportMode) -> ImportReport {
        let report = exchange::apply_import(&mut self.store, rows, mode, self.edits.editing_ids());
        self.settle();
        report
    }

    // edit session

    pub fn begin_edit(&mut self, id: &str) -> bool {
        self.edits.begin_edit(&self.store, id)
    }

    pub fn commit_edit(&mut self, id: &str) -> bool {
        let ok = self.edits.commit_edit(id);
        self.settle();
        ok
    }

    pub fn cancel_edit(&mut self, id: &str) -> bool {
        let ok = self.edits.cancel_edit(&mut self.store, id);
        self.settle();
        ok
    }

    // expansion

    /// Opens or closes the per-language panel. Returns the new state.
    pub fn toggle_expanded(&mut self, id: &str) -> Option<bool> {
        if !self.store.contains(id) {
            return None;
        }
        if self.expanded.remove(id) {
            Some(false)
        } else {
            self.expanded.insert(id.to_string());
            Some(true)
        }
    }

    // translation lookups

    pub fn begin_lookup(&mut self, id: &str) -> bool {
        self.store.contains(id) && self.lookups.begin(id)
    }

    pub fn finish_lookup(&mut self, id: &str, lang: &str, result: Option<&str>) -> bool {
        let applied = self.lookups.finish(&mut self.store, id, lang, result);
        self.settle();
        applied
    }

    // filters

    pub fn set_search(&mut self, search: &str) {
        self.criteria.search = search.to_string();
        self.settle();
    }

    pub fn set_namespaces(&mut self, namespaces: BTreeSet<Option<Namespace>>) {
        self.criteria.namespaces = namespaces;
        self.settle();
    }

    pub fn set_missing_only(&mut self, missing_only: bool) {
        self.criteria.missing_only = missing_only;
        self.settle();
    }

    // sort & paging

    pub fn toggle_sort(&mut self, column: SortColumn) -> Option<SortKey> {
        self.sort = view::toggle_sort(self.sort, column);
        self.sort
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page_index: usize) -> usize {
        let total = self.filtered().len();
        self.pager.set_page(page_index, total);
        self.pager.page_index
    }

    /// Only sizes from the configured options are accepted.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self.page_size_options.contains(&page_size) {
            return false;
        }
        self.pager.set_page_size(page_size);
        true
    }

    // selection

    pub fn toggle_selected(&mut self, id: &str) -> Option<bool> {
        if !self.store.contains(id) {
            return None;
        }
        Some(self.selection.toggle(id))
    }

    pub fn select_all(&mut self) {
        let visible = compute_visible(self.store.rows(), &self.criteria, self.edits.editing_ids());
        self.selection.select_all(visible);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Deletes every selected row, including ones hidden by the filters.
    pub fn bulk_delete(&mut self) -> usize {
        let ids = self.selection.take();
        let removed = self.store.delete_many(&ids);
        for id in &ids {
            self.forget(id);
        }
        info!(removed, "bulk delete");
        self.settle();
        removed
    }

    pub fn selected_rows(&self) -> Vec<&PhraseRow> {
        self.store
            .rows()
            .iter()
            .filter(|r| self.selection.contains(&r.id))
            .collect()
    }

    pub fn page_view(&self) -> PageView {
        let filtered = self.filtered();
        let header = self.selection.header_state(&filtered);
        let total = filtered.len();

        let sorted = self.sorted();
        let rows = self
            .pager
            .slice(&sorted)
            .iter()
            .map(|r| RowView {
                row: (*r).clone(),
                editing: self.edits.is_editing(&r.id),
                expanded: self.expanded.contains(&r.id),
                selected: self.selection.contains(&r.id),
                loading: self.lookups.is_loading(&r.id),
            })
            .collect();

        PageView {
            rows,
            total,
            page_index: self.pager.page_index,
            page_size: self.pager.page_size,
            page_count: self.pager.page_count(total),
            page_size_options: self.page_size_options.clone(),
            sort: self.sort,
            selected_count: self.selection.len(),
            header,
            active_filters: self.criteria.active_count(),
        }
    }
}
