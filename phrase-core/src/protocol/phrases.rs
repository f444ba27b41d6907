use std::collections::BTreeSet;
use std::path::PathBuf;

use serde_json::{json, Value};

use super::{opt_str, str_field, typed_field, usize_field, Command};
use crate::error::{CoreError, Result};
use crate::model::phrase::{Namespace, PhrasePatch, PhraseRow};
use crate::services::exchange::{self, ExportScope, ImportMode, ImportReport};
use crate::services::manager::PhraseManager;
use crate::services::view::{SortColumn, SortKey};
use crate::services::{encoding, qa};

fn parse_rows_from_payload(payload: &Value) -> Result<Vec<PhraseRow>> {
    let arr = payload
        .get("rows")
        .and_then(|v| v.as_array())
        .ok_or_else(|| CoreError::invalid_payload("payload.rows must be an array"))?;

    let mut rows: Vec<PhraseRow> = Vec::with_capacity(arr.len());

    for (i, v) in arr.iter().cloned().enumerate() {
        match serde_json::from_value::<PhraseRow>(v) {
            Ok(r) => rows.push(r),
            Err(e) => {
                return Err(CoreError::invalid_payload(format!(
                    "invalid row at index {i}: {e}"
                )))
            }
        }
    }

    Ok(rows)
}

fn parse_namespaces(value: &Value) -> Result<BTreeSet<Option<Namespace>>> {
    let arr = value
        .as_array()
        .ok_or_else(|| CoreError::invalid_payload("payload.namespaces must be an array"))?;

    arr.iter()
        .map(|v| match v {
            Value::Null => Ok(None),
            Value::String(s) if s.is_empty() => Ok(None),
            Value::String(s) => Namespace::from_label(s)
                .map(Some)
                .ok_or_else(|| CoreError::invalid_payload(format!("unknown namespace: {s}"))),
            _ => Err(CoreError::invalid_payload("namespaces must be strings")),
        })
        .collect()
}

fn require_row(manager: &PhraseManager, id: &str) -> Result<()> {
    if manager.store().contains(id) {
        Ok(())
    } else {
        Err(CoreError::unknown_row(id))
    }
}

fn require_language(manager: &PhraseManager, lang: &str) -> Result<()> {
    if manager.catalog().contains(lang) {
        Ok(())
    } else {
        Err(CoreError::UnknownLanguage(lang.to_string()))
    }
}

fn edit_state(manager: &PhraseManager, id: &str) -> Value {
    json!({ "id": id, "state": manager.edits().state(id) })
}

pub fn handle(cmd: Command, manager: &mut PhraseManager, payload: &Value) -> Result<Value> {
    match cmd {
        Command::CatalogGet => Ok(json!({
            "languages": manager.catalog(),
            "namespaces": Namespace::ALL.iter().map(|ns| ns.label()).collect::<Vec<_>>(),
        })),

        Command::PhrasesList => Ok(json!({ "rows": manager.store().rows() })),

        Command::PhrasesLoad => {
            let rows = parse_rows_from_payload(payload)?;
            let count = manager.load_rows(rows);
            Ok(json!({ "count": count }))
        }

        Command::PhrasesAdd => {
            let id = manager.add_phrase();
            Ok(json!({ "id": id, "row": manager.store().get(&id), "page_index": manager.pager().page_index }))
        }

        Command::PhrasesUpdate => {
            let id = str_field(payload, "id")?;
            let patch: PhrasePatch = typed_field(payload, "fields")?;
            if let Some(map) = &patch.translations {
                for code in map.keys() {
                    require_language(manager, code)?;
                }
            }
            if !manager.update_phrase(id, &patch) {
                return Err(CoreError::unknown_row(id));
            }
            Ok(json!({ "row": manager.store().get(id) }))
        }

        Command::PhrasesSetTranslation => {
            let id = str_field(payload, "id")?;
            let lang = str_field(payload, "lang")?;
            let text = opt_str(payload, "text").unwrap_or("");
            require_language(manager, lang)?;
            if !manager.set_translation(id, lang, text) {
                return Err(CoreError::unknown_row(id));
            }
            Ok(json!({ "row": manager.store().get(id) }))
        }

        Command::PhrasesDelete => {
            let id = str_field(payload, "id")?;
            if !manager.delete_phrase(id) {
                return Err(CoreError::unknown_row(id));
            }
            Ok(json!({ "deleted": id }))
        }

        Command::EditBegin => {
            let id = str_field(payload, "id")?;
            if !manager.begin_edit(id) {
                return Err(CoreError::unknown_row(id));
            }
            Ok(edit_state(manager, id))
        }

        Command::EditCommit => {
            let id = str_field(payload, "id")?;
            require_row(manager, id)?;
            manager.commit_edit(id);
            Ok(edit_state(manager, id))
        }

        Command::EditCancel => {
            let id = str_field(payload, "id")?;
            require_row(manager, id)?;
            manager.cancel_edit(id);
            Ok(json!({
                "id": id,
                "state": manager.edits().state(id),
                "row": manager.store().get(id),
            }))
        }

        Command::FilterSet => {
            // validate every field before touching the criteria
            let search = match payload.get("search") {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s.as_str()),
                Some(_) => return Err(CoreError::invalid_payload("payload.search must be a string")),
            };
            let namespaces = payload.get("namespaces").map(parse_namespaces).transpose()?;
            let missing_only = match payload.get("missing_only") {
                None | Some(Value::Null) => None,
                Some(Value::Bool(b)) => Some(*b),
                Some(_) => {
                    return Err(CoreError::invalid_payload("payload.missing_only must be a boolean"))
                }
            };

            if let Some(search) = search {
                manager.set_search(search);
            }
            if let Some(namespaces) = namespaces {
                manager.set_namespaces(namespaces);
            }
            if let Some(flag) = missing_only {
                manager.set_missing_only(flag);
            }
            Ok(filter_state(manager))
        }

        Command::FilterGet => Ok(filter_state(manager)),

        Command::ViewGet => Ok(serde_json::to_value(manager.page_view())?),

        Command::ViewSort => {
            let column: SortColumn = typed_field(payload, "column")?;
            let sort = match payload.get("direction") {
                None => manager.toggle_sort(column),
                Some(Value::Null) => {
                    manager.set_sort(None);
                    None
                }
                Some(_) => {
                    let key = SortKey {
                        column,
                        direction: typed_field(payload, "direction")?,
                    };
                    manager.set_sort(Some(key));
                    Some(key)
                }
            };
            Ok(json!({ "sort": sort }))
        }

        Command::ViewPage => {
            let page = usize_field(payload, "page_index")?;
            manager.set_page(page);
            Ok(serde_json::to_value(manager.page_view())?)
        }

        Command::ViewPageSize => {
            let size = usize_field(payload, "page_size")?;
            if !manager.set_page_size(size) {
                return Err(CoreError::InvalidPageSize(size));
            }
            Ok(serde_json::to_value(manager.page_view())?)
        }

        Command::SelectionToggle => {
            let id = str_field(payload, "id")?;
            let selected = manager
                .toggle_selected(id)
                .ok_or_else(|| CoreError::unknown_row(id))?;
            Ok(json!({ "id": id, "selected": selected, "count": manager.selection().len() }))
        }

        Command::SelectionSelectAll => {
            manager.select_all();
            Ok(json!({ "count": manager.selection().len() }))
        }

        Command::SelectionClear => {
            manager.clear_selection();
            Ok(json!({ "count": 0 }))
        }

        Command::SelectionBulkDelete => {
            let removed = manager.bulk_delete();
            Ok(json!({ "removed": removed }))
        }

        Command::ExpandToggle => {
            let id = str_field(payload, "id")?;
            let expanded = manager
                .toggle_expanded(id)
                .ok_or_else(|| CoreError::unknown_row(id))?;
            Ok(json!({ "id": id, "expanded": expanded }))
        }

        Command::LookupBegin => {
            let id = str_field(payload, "id")?;
            require_row(manager, id)?;
            let started = manager.begin_lookup(id);
            Ok(json!({ "id": id, "started": started, "loading": true }))
        }

        Command::LookupFinish => {
            let id = str_field(payload, "id")?;
            let lang = str_field(payload, "lang")?;
            require_row(manager, id)?;
            require_language(manager, lang)?;
            let applied = manager.finish_lookup(id, lang, opt_str(payload, "text"));
            Ok(json!({
                "id": id,
                "applied": applied,
                "loading": false,
                "row": manager.store().get(id),
            }))
        }

        Command::QaRun => {
            let issues = qa::run(manager.store().rows(), manager.catalog());
            Ok(json!({ "issues": issues }))
        }

        Command::ExchangeExport => {
            let scope: ExportScope = match payload.get("scope") {
                Some(_) => typed_field(payload, "scope")?,
                None => ExportScope::default(),
            };
            let rows: Vec<&PhraseRow> = match scope {
                ExportScope::All => manager.store().rows().iter().collect(),
                ExportScope::Selected => manager.selected_rows(),
                ExportScope::Filtered => manager.filtered(),
            };
            let doc = exchange::build_document(rows, manager.catalog());

            match opt_str(payload, "path") {
                Some(path) => {
                    exchange::write_document(&PathBuf::from(path), &doc)?;
                    Ok(json!({ "path": path, "count": doc.phrases.len() }))
                }
                None => Ok(json!({ "document": doc })),
            }
        }

        Command::ExchangeImport => {
            let mode: ImportMode = match payload.get("mode") {
                Some(_) => typed_field(payload, "mode")?,
                None => ImportMode::default(),
            };
            let (doc, encoding_name) = if let Some(path) = opt_str(payload, "path") {
                exchange::read_document(&PathBuf::from(path))?
            } else if payload.get("document").is_some() {
                let doc: exchange::ExchangeDocument = typed_field(payload, "document")?;
                exchange::check_version(&doc)?;
                (doc, "utf-8".to_string())
            } else {
                return Err(CoreError::invalid_payload(
                    "payload.path or payload.document is required",
                ));
            };

            let report = manager.import_rows(doc.phrases, mode);
            Ok(serde_json::to_value(ImportReport {
                encoding: encoding_name,
                ..report
            })?)
        }

        Command::EncodingDetect => {
            let path = str_field(payload, "path")?;
            if path.is_empty() {
                return Err(CoreError::invalid_payload("payload.path is required"));
            }
            let result = encoding::detect_from_file(&PathBuf::from(path))?;
            Ok(serde_json::to_value(result)?)
        }

        _ => Err(CoreError::invalid_payload("command not handled by phrase session")),
    }
}

fn filter_state(manager: &PhraseManager) -> Value {
    json!({
        "criteria": manager.criteria(),
        "active_filters": manager.criteria().active_count(),
        "total": manager.filtered().len(),
    })
}
