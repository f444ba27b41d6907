use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::model::phrase::{Namespace, PhraseRow};

/// Filters chosen in the top panel. `None` inside `namespaces` stands for "no namespace".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub search: String,
    pub namespaces: BTreeSet<Option<Namespace>>,
    pub missing_only: bool,
}

impl FilterCriteria {
    pub fn matches(&self, row: &PhraseRow) -> bool {
        let matches_search = row
            .phrase_key
            .to_lowercase()
            .contains(&self.search.to_lowercase());

        let matches_namespace =
            self.namespaces.is_empty() || self.namespaces.contains(&row.namespace);

        let matches_missing = !self.missing_only || row.has_missing_translation();

        matches_search && matches_namespace && matches_missing
    }

    /// Number of filters shown as active on the filter button. Search is not counted.
    pub fn active_count(&self) -> usize {
        [self.missing_only, !self.namespaces.is_empty()]
            .into_iter()
            .filter(|active| *active)
            .count()
    }
}

/// Rows that pass the filters, plus every row being edited, in store order.
pub fn compute_visible<'a>(
    rows: &'a [PhraseRow],
    criteria: &FilterCriteria,
    editing: &HashSet<String>,
) -> Vec<&'a PhraseRow> {
    rows.iter()
        .filter(|row| criteria.matches(row) || editing.contains(&row.id))
        .collect()
}
