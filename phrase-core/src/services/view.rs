use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::phrase::PhraseRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[serde(alias = "phraseKey")]
    PhraseKey,
    Namespace,
    #[serde(alias = "defaultTranslation")]
    DefaultTranslation,
    Description,
    Screenshot,
}

impl SortColumn {
    fn value(self, row: &PhraseRow) -> &str {
        match self {
            SortColumn::PhraseKey => &row.phrase_key,
            SortColumn::Namespace => row.namespace.map(|ns| ns.label()).unwrap_or(""),
            SortColumn::DefaultTranslation => &row.default_translation,
            SortColumn::Description => row.description.as_deref().unwrap_or(""),
            SortColumn::Screenshot => row.screenshot.as_deref().unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// Header click cycle for one column: unsorted, ascending, descending, unsorted.
pub fn toggle_sort(current: Option<SortKey>, column: SortColumn) -> Option<SortKey> {
    match current {
        Some(key) if key.column == column => match key.direction {
            SortDirection::Asc => Some(SortKey {
                column,
                direction: SortDirection::Desc,
            }),
            SortDirection::Desc => None,
        },
        _ => Some(SortKey {
            column,
            direction: SortDirection::Asc,
        }),
    }
}

/// Stable, case-insensitive sort. Ties keep their incoming order.
pub fn sort_rows(rows: &mut [&PhraseRow], key: Option<SortKey>) {
    let Some(key) = key else {
        return;
    };
    rows.sort_by(|a, b| {
        let cmp = compare_text(key.column.value(a), key.column.value(b));
        match key.direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pager {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Pulls the page index back onto the last page that exists for `total` rows.
    /// Returns true when the index moved.
    pub fn clamp(&mut self, total: usize) -> bool {
        let last = self.page_count(total).saturating_sub(1);
        if self.page_index > last {
            self.page_index = last;
            true
        } else {
            false
        }
    }

    pub fn set_page(&mut self, page_index: usize, total: usize) {
        self.page_index = page_index;
        self.clamp(total);
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Page that contains the item at `position`.
    pub fn page_of(&self, position: usize) -> usize {
        position / self.page_size
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page_index * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
