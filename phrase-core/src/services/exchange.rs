use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::model::catalog::{CatalogLanguage, LanguageCatalog};
use crate::model::phrase::PhraseRow;
use crate::services::encoding;
use crate::services::store::RowStore;

pub const DOCUMENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExchangeDocument {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub languages: Vec<CatalogLanguage>,

    #[serde(default)]
    pub phrases: Vec<PhraseRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    #[default]
    All,
    Selected,
    Filtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Append,
    Merge,
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub updated: usize,
    /// Merge matches left alone because the row is being edited.
    pub skipped: usize,
    pub encoding: String,
}

pub fn build_document<'a>(
    rows: impl IntoIterator<Item = &'a PhraseRow>,
    catalog: &LanguageCatalog,
) -> ExchangeDocument {
    ExchangeDocument {
        version: DOCUMENT_VERSION,
        languages: catalog.languages().to_vec(),
        phrases: rows.into_iter().cloned().collect(),
    }
}

pub fn write_document(path: &Path, doc: &ExchangeDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), phrases = doc.phrases.len(), "document exported");
    Ok(())
}

pub fn check_version(doc: &ExchangeDocument) -> Result<()> {
    if doc.version != DOCUMENT_VERSION {
        return Err(CoreError::invalid_payload(format!(
            "unsupported document version {}",
            doc.version
        )));
    }
    Ok(())
}

pub fn parse_document(text: &str) -> Result<ExchangeDocument> {
    let doc: ExchangeDocument = serde_json::from_str(text)?;
    check_version(&doc)?;
    Ok(doc)
}

/// Reads an export file in whatever charset it was saved with.
pub fn read_document(path: &Path) -> Result<(ExchangeDocument, String)> {
    let decoded = encoding::decode_file(path)?;
    let doc = parse_document(&decoded.text)?;
    Ok((doc, decoded.encoding))
}

/// Applies imported rows to the store.
///
/// `Append` adds every row under a fresh id. `Merge` matches rows by phrase
/// key: matches take the imported fields and non-blank translations, the
/// rest are appended. Rows with a blank key are always appended, and a match
/// whose id is in `editing` is skipped so its draft and snapshot stay intact.
pub fn apply_import(
    store: &mut RowStore,
    rows: Vec<PhraseRow>,
    mode: ImportMode,
    editing: &HashSet<String>,
) -> ImportReport {
    let mut report = ImportReport::default();

    for mut row in rows {
        row.normalize(store.catalog());

        if mode == ImportMode::Merge {
            let target = store.find_by_key(&row.phrase_key).map(|r| r.id.clone());
            if let Some(id) = target {
                if editing.contains(&id) {
                    debug!(%id, key = %row.phrase_key, "merge skipped, row is being edited");
                    report.skipped += 1;
                    continue;
                }
                if let Some(existing) = store.get_mut(&id) {
                    existing.default_translation = row.default_translation;
                    existing.description = row.description;
                    existing.screenshot = row.screenshot;
                    existing.namespace = row.namespace;
                    for (code, text) in row.translations {
                        if !text.trim().is_empty() {
                            existing.translations.insert(code, text);
                        }
                    }
                    report.updated += 1;
                    continue;
                }
            }
        }

        row.id.clear();
        store.insert(row);
        report.added += 1;
    }

    info!(
        added = report.added,
        updated = report.updated,
        skipped = report.skipped,
        "import applied"
    );
    report
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("phrases.json");
    p.set_file_name(format!("{file_name}.tmp"));
    p
}
